// Namespaces
pub(crate) const OPF_NAMESPACE: &str = "http://www.idpf.org/2007/opf";
pub(crate) const OEB12_NAMESPACE: &str = "http://openebook.org/namespaces/oeb-package/1.0/";
pub(crate) const DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";

// General
pub(crate) const ID: &str = "id";
pub(crate) const HREF: &str = "href";

// Elements
pub(crate) const PACKAGE: &str = "package";
pub(crate) const ITEM: &str = "item";
pub(crate) const ITEMREF: &str = "itemref";
pub(crate) const SPINE: &str = "spine";
pub(crate) const REFERENCE: &str = "reference";
pub(crate) const META: &str = "meta";
pub(crate) const MEDIA_TYPE_ELEMENT: &str = "mediaType"; // EPUB 3 bindings
pub(crate) const DC_METADATA: &str = "dc-metadata"; // OEBPS 1.2
pub(crate) const X_METADATA: &str = "x-metadata"; // OEBPS 1.2

// Dublin Core elements (local names)
pub(crate) const IDENTIFIER: &str = "identifier";
pub(crate) const DATE: &str = "date";
pub(crate) const TITLE: &str = "title";
pub(crate) const LANGUAGE: &str = "language";
pub(crate) const CREATOR: &str = "creator";
pub(crate) const CONTRIBUTOR: &str = "contributor";
pub(crate) const PUBLISHER: &str = "publisher";
pub(crate) const RIGHTS: &str = "rights";
pub(crate) const SUBJECT: &str = "subject";
pub(crate) const DESCRIPTION: &str = "description";

// Package attributes
pub(crate) const UNIQUE_ID: &str = "unique-identifier";
pub(crate) const VERSION: &str = "version";

// Manifest attributes
pub(crate) const MEDIA_TYPE: &str = "media-type";
pub(crate) const FALLBACK: &str = "fallback";
pub(crate) const FALLBACK_STYLE: &str = "fallback-style";
pub(crate) const ISLAND_TYPE: &str = "island-type"; // OEBPS 1.2
pub(crate) const PROPERTIES: &str = "properties";

// Manifest item properties
pub(crate) const NAV_PROPERTY: &str = "nav";
pub(crate) const SCRIPTED_PROPERTY: &str = "scripted";

/// EPUB 3 manifest properties and the media types each applies to.
pub(crate) const ITEM_PROPERTIES: &[(&str, &[&str])] = &[
    ("cover-image", &["image/gif", "image/jpeg", "image/png", "image/svg+xml"]),
    ("mathml", &["application/xhtml+xml", "image/svg+xml"]),
    ("nav", &["application/xhtml+xml"]),
    ("remote-resources", &["application/xhtml+xml", "image/svg+xml", "text/css"]),
    ("scripted", &["application/xhtml+xml", "image/svg+xml"]),
    ("svg", &["application/xhtml+xml"]),
    ("switch", &["application/xhtml+xml", "image/svg+xml"]),
];

// Spine attributes
pub(crate) const TOC: &str = "toc";
pub(crate) const IDREF: &str = "idref";
pub(crate) const LINEAR: &str = "linear";
pub(crate) const LINEAR_NO: &str = "no";

// Itemref properties
pub(crate) const PAGE_SPREAD_LEFT: &str = "page-spread-left";
pub(crate) const PAGE_SPREAD_RIGHT: &str = "page-spread-right";
pub(crate) const LAYOUT_PRE_PAGINATED: &str = "rendition:layout-pre-paginated";
pub(crate) const LAYOUT_REFLOWABLE: &str = "rendition:layout-reflowable";

// Guide attributes
pub(crate) const GUIDE_TITLE: &str = "title";
pub(crate) const GUIDE_TYPE: &str = "type";

// Bindings attributes
pub(crate) const HANDLER: &str = "handler";

// Metadata attributes
pub(crate) const ROLE: &str = "role";
pub(crate) const PROPERTY: &str = "property";
pub(crate) const NAME: &str = "name";
pub(crate) const CONTENT: &str = "content";

// Meta values
pub(crate) const MODIFIED: &str = "dcterms:modified";
pub(crate) const RENDITION_LAYOUT: &str = "rendition:layout";
pub(crate) const PRE_PAGINATED: &str = "pre-paginated";
pub(crate) const FIXED_LAYOUT: &str = "fixed-layout";

// Media types
pub(crate) const NCX_TYPE: &str = "application/x-dtbncx+xml";
pub(crate) const HTML_TYPE: &str = "text/html";
pub(crate) const OEB1_DOCUMENT_TYPE: &str = "text/x-oeb1-document";
pub(crate) const OEB1_CSS_TYPE: &str = "text/x-oeb1-css";

/// MARC relator codes accepted in `opf:role`.
pub(crate) const MARC_RELATORS: &[&str] = &[
    "acp", "act", "adp", "aft", "anl", "anm", "ann", "ant", "app", "aqt", "arc", "ard", "arr",
    "art", "asg", "asn", "att", "auc", "aud", "aui", "aus", "aut", "bdd", "bjd", "bkd", "bkp",
    "bnd", "bpd", "bsl", "ccp", "chr", "clb", "cli", "cll", "clr", "clt", "cmm", "cmp", "cmt",
    "cng", "cnd", "cns", "coe", "col", "com", "cos", "cot", "cov", "cpc", "cpe", "cph", "cpl",
    "cpt", "cre", "crp", "crr", "csl", "csp", "cst", "ctb", "cte", "ctg", "ctr", "cts", "ctt",
    "cur", "cwt", "dfd", "dfe", "dft", "dgg", "dis", "dln", "dnc", "dnr", "dpc", "dpt", "drm",
    "drt", "dsr", "dst", "dtc", "dte", "dtm", "dto", "dub", "edt", "egr", "elg", "elt", "eng",
    "etr", "exp", "fac", "fld", "flm", "fmo", "fpy", "fnd", "frg", "gis", "grt", "hnr", "hst",
    "ill", "ilu", "ins", "inv", "itr", "ive", "ivr", "lbr", "lbt", "ldr", "led", "lee", "lel",
    "len", "let", "lgd", "lie", "lil", "lit", "lsa", "lse", "lso", "ltg", "lyr", "mcp", "mfr",
    "mdc", "mod", "mon", "mrk", "msd", "mte", "mus", "nrt", "opn", "org", "orm", "oth", "own",
    "pat", "pbd", "pbl", "pdr", "pfr", "pht", "plt", "pma", "pmn", "pop", "ppm", "ppt", "prc",
    "prd", "prf", "prg", "prm", "pro", "prt", "pta", "pte", "ptf", "pth", "ptt", "rbr", "rce",
    "rcp", "red", "ren", "res", "rev", "rps", "rpt", "rpy", "rse", "rsg", "rsp", "rst", "rth",
    "rtm", "sad", "sce", "scl", "scr", "sds", "sec", "sgn", "sht", "sng", "spk", "spn", "spy",
    "srv", "std", "stl", "stm", "stn", "str", "tcd", "tch", "ths", "trc", "trl", "tyd", "tyg",
    "vdg", "voc", "wam", "wdc", "wde", "wit",
];
