//! Version-specific rule sets.

use crate::diagnostics::Severity;
use crate::media_type;
use crate::settings::EpubVersion;

/// The differences between the EPUB 2 and EPUB 3 checks, as data.
///
/// Selected once from [`EpubVersion`]; the builder and validator consult
/// it instead of branching on the version.
///
/// # Examples
/// ```
/// # use opfcheck::{EpubVersion, RuleSet};
/// let rules = RuleSet::for_version(EpubVersion::Epub3);
///
/// assert!(rules.is_blessed_item("image/svg+xml"));
/// assert!(!rules.style_fallback_in_spine());
/// assert_eq!(["schema/30/package-30.rnc", "schema/30/package-30.sch"], rules.schemas());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct RuleSet {
    version: EpubVersion,
    blessed_item: fn(&str) -> bool,
    /// Spine fallback chains may end at a style sheet via `fallback-style`.
    pub(crate) style_fallback_in_spine: bool,
    /// Style and image media types are rejected outright on the spine.
    pub(crate) reject_style_and_image_in_spine: bool,
    /// Deprecated content document types need no fallback on the spine.
    pub(crate) deprecated_items_in_spine: bool,
    /// A missing or malformed media type ends the per-item check.
    pub(crate) strict_media_type_syntax: bool,
    /// Deprecated-type and OEBPS 1.2 warnings on manifest items.
    pub(crate) legacy_item_warnings: bool,
    /// `fallback-style` must reference a declared item.
    pub(crate) check_fallback_style: bool,
    /// Each manifest item may be referenced by the spine at most once.
    pub(crate) check_spine_duplicates: bool,
    /// Binding handlers must be scripted.
    pub(crate) check_bindings: bool,
    /// Only audio and video may be remote.
    pub(crate) restrict_remote_resources: bool,
    /// The `item`/`itemref` property vocabularies apply.
    pub(crate) check_properties: bool,
    /// The `fallback` attribute doubles as `fallback-style`.
    pub(crate) fallback_is_style_fallback: bool,
    /// `dc:title` and `dc:language` must not be empty.
    pub(crate) warn_empty_title_language: bool,
    /// `opf:role` on `dc:creator` must be a MARC relator code.
    pub(crate) check_creator_roles: bool,
    pub(crate) invalid_date: Severity,
    schemas: &'static [&'static str],
}

fn blessed_item_epub2(media_type: &str) -> bool {
    media_type::is_blessed_item(media_type, EpubVersion::Epub2)
}

fn blessed_item_epub3(media_type: &str) -> bool {
    media_type::is_blessed_item(media_type, EpubVersion::Epub3)
}

const EPUB2: RuleSet = RuleSet {
    version: EpubVersion::Epub2,
    blessed_item: blessed_item_epub2,
    style_fallback_in_spine: true,
    reject_style_and_image_in_spine: true,
    deprecated_items_in_spine: true,
    strict_media_type_syntax: false,
    legacy_item_warnings: true,
    check_fallback_style: true,
    check_spine_duplicates: true,
    check_bindings: false,
    restrict_remote_resources: false,
    check_properties: false,
    fallback_is_style_fallback: false,
    warn_empty_title_language: true,
    check_creator_roles: true,
    invalid_date: Severity::Error,
    schemas: &["schema/20/rng/opf.rng", "schema/20/sch/opf.sch"],
};

const EPUB3: RuleSet = RuleSet {
    version: EpubVersion::Epub3,
    blessed_item: blessed_item_epub3,
    style_fallback_in_spine: false,
    reject_style_and_image_in_spine: false,
    deprecated_items_in_spine: false,
    strict_media_type_syntax: true,
    legacy_item_warnings: false,
    check_fallback_style: false,
    check_spine_duplicates: false,
    check_bindings: true,
    restrict_remote_resources: true,
    check_properties: true,
    fallback_is_style_fallback: true,
    warn_empty_title_language: false,
    check_creator_roles: false,
    invalid_date: Severity::Warning,
    schemas: &["schema/30/package-30.rnc", "schema/30/package-30.sch"],
};

impl RuleSet {
    pub fn for_version(version: EpubVersion) -> Self {
        let rules = match version {
            EpubVersion::Epub2 => EPUB2,
            EpubVersion::Epub3 => EPUB3,
        };
        log::debug!("selected EPUB {version} rule set");
        rules
    }

    pub fn version(&self) -> EpubVersion {
        self.version
    }

    /// Content document types natively supported by this rule set.
    pub fn is_blessed_item(&self, media_type: &str) -> bool {
        (self.blessed_item)(media_type)
    }

    /// Types accepted at the end of a fallback chain: blessed or deprecated items.
    pub fn is_fallback_target(&self, media_type: &str) -> bool {
        self.is_blessed_item(media_type) || media_type::is_deprecated_item(media_type)
    }

    /// Types accepted at the end of a `fallback-style` link.
    pub fn is_style_target(&self, media_type: &str) -> bool {
        media_type::is_blessed_style(media_type) || media_type::is_deprecated_style(media_type)
    }

    pub fn style_fallback_in_spine(&self) -> bool {
        self.style_fallback_in_spine
    }

    /// Severity of a `dc:date` that does not follow the W3C format.
    pub fn invalid_date_severity(&self) -> Severity {
        self.invalid_date
    }

    /// Grammars an external schema validator applies to package documents
    /// of this version.
    pub fn schemas(&self) -> &'static [&'static str] {
        self.schemas
    }
}
