//! # opfcheck
//!
//! Semantic validation of EPUB package documents (`.opf`).
//!
//! Parsing a package document incrementally builds a [`Document`]: manifest
//! items, spine order, guide references, table-of-contents linkage and
//! binding handlers. A [`Validator`] then runs the version-specific rule set
//! over the completed model, resolving fallback chains (with cycle
//! detection), classifying media types and handing the manifest to a
//! [`ReferenceGraph`](xref::ReferenceGraph) for whole-package link checks.
//!
//! Malformed input never aborts a pass; every problem is reported as a
//! [`Diagnostic`].
//!
//! ## Examples
//! Checking a package document:
//! ```rust
//! use opfcheck::{CheckSettings, EpubVersion, Severity};
//!
//! let opf = br#"<package xmlns="http://www.idpf.org/2007/opf" version="2.0" unique-identifier="uid">
//!   <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
//!     <dc:identifier id="uid">urn:isbn:9780000000000</dc:identifier>
//!   </metadata>
//!   <manifest>
//!     <item id="c1" href="c1.xhtml" media-type="application/xhtml+xml"/>
//!   </manifest>
//!   <spine><itemref idref="c1"/></spine>
//! </package>"#;
//!
//! let settings = CheckSettings::builder()
//!     .version(EpubVersion::Epub2)
//!     .package_path("OEBPS/content.opf")
//!     .report_features(false);
//! let diagnostics = opfcheck::check(settings, opf).unwrap();
//!
//! assert_eq!(0, diagnostics.count(Severity::Error));
//! ```
//!
//! Building and validating separately:
//! ```rust
//! use opfcheck::{CheckSettings, PackageBuilder, Validator};
//! # let opf = br#"<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="uid"/>"#;
//!
//! let settings = CheckSettings::default();
//! let (document, mut diagnostics) = opfcheck::build_from_xml(settings.clone(), opf).unwrap();
//! diagnostics.extend(Validator::new(settings).validate(&document));
//! ```

mod builder;
mod consts;
mod datetime;
mod diagnostics;
mod errors;
mod fallback;
mod media_type;
mod package;
mod rules;
mod settings;
mod util;
mod validate;

pub mod parser;
pub mod xref;

pub use self::{
    builder::PackageBuilder,
    datetime::{DateTime, InvalidDate, Time},
    diagnostics::{Diagnostic, Diagnostics, Feature, Issue, Location, Severity},
    errors::{InvalidArgument, OpfError, OpfResult},
    fallback::FallbackResolver,
    package::{
        Binding, CrossReference, Document, GuideReference, Item, ItemIndex, ReferenceKind,
        SpineEntry,
    },
    rules::RuleSet,
    settings::{CheckSettings, CheckSettingsBuilder, EpubVersion},
    validate::Validator,
};

/// Media-type classification tables used by the rule sets.
pub mod media {
    pub use super::media_type::{
        is_blessed_audio, is_blessed_font, is_blessed_image, is_blessed_item, is_blessed_style,
        is_core_media, is_deprecated_item, is_deprecated_style, is_valid_syntax,
    };
}

/// Parses `data` with the bundled [`quick_xml`] event source and builds a [`Document`].
///
/// # Errors
/// Returns [`OpfError::Xml`] if the bytes are not well-formed XML.
/// Every other problem is reported through the returned [`Diagnostics`].
pub fn build_from_xml(
    settings: impl Into<CheckSettings>,
    data: &[u8],
) -> OpfResult<(Document, Diagnostics)> {
    let mut builder = PackageBuilder::new(settings);
    parser::xml::XmlEventSource::new(data).drive(&mut builder)?;
    Ok(builder.finish())
}

/// Builds and validates the package document `data` in one pass.
///
/// Build diagnostics come first, followed by validation diagnostics.
///
/// # Errors
/// Returns [`OpfError::Xml`] if the bytes are not well-formed XML.
pub fn check(settings: impl Into<CheckSettings>, data: &[u8]) -> OpfResult<Diagnostics> {
    let settings = settings.into();
    let (document, mut diagnostics) = build_from_xml(settings.clone(), data)?;
    diagnostics.extend(Validator::new(settings).validate(&document));
    Ok(diagnostics)
}
