use crate::opf::{build, check, problems, read_package};
use opfcheck::{CheckSettings, EpubVersion, Severity};

#[test]
fn test_epub2_valid() {
    let opf = read_package("epub2_valid.opf");
    let diagnostics = check(EpubVersion::Epub2, &opf);
    assert_eq!(Vec::<(&str, Option<usize>)>::new(), problems(&diagnostics));

    let (document, _) = build(EpubVersion::Epub2, &opf);
    assert_eq!(8, document.item_count());
    assert_eq!(Some("BookId"), document.unique_identifier());
    assert!(document.has_unique_identifier_element());
    assert!(!document.is_legacy_syntax());

    let toc = document.toc().unwrap();
    assert_eq!(Some("ncx"), toc.id());
    assert_eq!(Some("OEBPS/toc.ncx"), toc.path());

    #[rustfmt::skip]
    let expected_spine = [
        // (idref, path, linear)
        ("cover", "OEBPS/text/cover.xhtml", false),
        ("c1", "OEBPS/text/chapter 1.xhtml", true),
        ("c2", "OEBPS/text/chapter2.xml", true),
    ];
    assert_eq!(expected_spine.len(), document.spine().len());

    for (entry, (idref, path, linear)) in document.spine().iter().zip(expected_spine) {
        let item = document.item(entry.item);

        assert_eq!(idref, entry.idref);
        assert_eq!(Some(path), item.path());
        assert_eq!(linear, item.linear());
    }

    let guide = document.guide();
    assert_eq!(2, guide.len());
    assert_eq!(Some("OEBPS/text/chapter 1.xhtml#start"), guide[1].href());
    assert_eq!(Some("OEBPS/text/chapter 1.xhtml"), guide[1].path());
}

#[test]
fn test_epub2_features() {
    let settings = CheckSettings::builder().version(EpubVersion::Epub2);
    let diagnostics = opfcheck::check(settings, &read_package("epub2_valid.opf")).unwrap();

    let features = diagnostics
        .by_severity(Severity::Info)
        .map(|d| d.issue.to_string())
        .collect::<Vec<_>>();

    #[rustfmt::skip]
    let expected = [
        "dc-title: The Example Book",
        "dc-creator: Jane Doe",
        "dc-language: en",
        "unique-identifier: urn:isbn:9780000000002",
        "dc-date: 2011-09-27",
        "dc-publisher: Example Press & Sons",
        "dc-rights: Public domain",
        "items-count: 8",
    ];
    assert_eq!(expected, features[..expected.len()]);
    assert_eq!(expected.len() + 8, features.len());
    assert!(features[expected.len()..]
        .iter()
        .all(|feature| feature.starts_with("declared-mimetype: ")));
}

#[test]
fn test_epub3_valid() {
    let opf = read_package("epub3_valid.opf");
    let diagnostics = check(EpubVersion::Epub3, &opf);
    assert_eq!(Vec::<(&str, Option<usize>)>::new(), problems(&diagnostics));

    let (document, _) = build(EpubVersion::Epub3, &opf);
    let nav = document.item_by_id("nav").unwrap();
    assert!(nav.is_nav());
    assert!(!nav.linear());

    let intro = document.item_by_id("intro").unwrap();
    assert!(intro.is_remote());
    assert_eq!(Some("https://example.com/audio/intro.mp3"), intro.path());

    let bindings = document.bindings();
    assert_eq!(1, bindings.len());
    assert_eq!("application/x-demo-widget", bindings[0].media_type);
    assert_eq!("OEBPS/widget.xhtml", bindings[0].handler_path);
    assert!(document.item(bindings[0].handler).is_scripted());
}

#[test]
fn test_epub2_broken() {
    let diagnostics = check(EpubVersion::Epub2, &read_package("epub2_broken.opf"));

    #[rustfmt::skip]
    let expected = [
        // Built while parsing
        ("opf.metadata.empty", Some(4)),
        ("opf.metadata.invalid-role", Some(5)),
        ("opf.metadata.date-invalid", Some(8)),
        // Per-item check
        ("opf.item.html-for-xhtml", Some(14)),
        ("opf.fallback.not-found", Some(15)),
        // Spine
        ("opf.spine.media-type", Some(13)),
        ("opf.spine.invalid-fallback", Some(15)),
        ("opf.spine.duplicate-reference", Some(20)),
        ("opf.unique-identifier.not-found", None),
        // Per-item check, after registering resources
        ("opf.item.html-for-xhtml", Some(14)),
        ("opf.fallback.not-found", Some(15)),
        // Guide, then the reference graph
        ("opf.guide.undeclared", Some(24)),
        ("xref.resource.undeclared", Some(24)),
    ];
    assert_eq!(expected, problems(&diagnostics).as_slice());

    let date = diagnostics.by_key("opf.metadata.date-invalid").next().unwrap();
    assert_eq!(
        vec!["2011-13-01", "month value 13 is out of range"],
        date.message_args()
    );
    assert_eq!(3, diagnostics.count(Severity::Warning));
    assert_eq!(10, diagnostics.count(Severity::Error));
}

#[test]
fn test_epub2_broken_as_epub3() {
    let diagnostics = check(EpubVersion::Epub3, &read_package("epub2_broken.opf"));

    #[rustfmt::skip]
    let expected = [
        ("opf.metadata.date-unrecommended", Some(8)),
        ("opf.fallback.not-found", Some(15)),
        ("opf.spine.no-fallback", Some(13)),
        ("opf.spine.invalid-fallback", Some(15)),
        ("opf.unique-identifier.not-found", None),
        ("opf.fallback.not-found", Some(15)),
        ("opf.guide.undeclared", Some(24)),
        ("xref.resource.undeclared", Some(24)),
    ];
    assert_eq!(expected, problems(&diagnostics).as_slice());
}

#[test]
fn test_fallback_cycles() {
    let diagnostics = check(EpubVersion::Epub3, &read_package("fallback_cycles.opf"));

    // Each resolution reports its cycle once, at the item it started from:
    // the spine check resolves `a` and `x`, resource registration resolves
    // every item twice (content and image fallback).
    #[rustfmt::skip]
    let expected = [
        ("opf.fallback.circular", Some(8)),
        ("opf.spine.invalid-fallback", Some(8)),
        ("opf.fallback.circular", Some(9)),
        ("opf.spine.invalid-fallback", Some(9)),
        ("opf.fallback.circular", Some(8)),
        ("opf.fallback.circular", Some(8)),
        ("opf.fallback.circular", Some(9)),
        ("opf.fallback.circular", Some(9)),
        ("opf.fallback.circular", Some(10)),
        ("opf.fallback.circular", Some(10)),
        ("opf.fallback.circular", Some(11)),
        ("opf.fallback.circular", Some(11)),
    ];
    assert_eq!(expected, problems(&diagnostics).as_slice());
}
