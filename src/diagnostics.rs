//! Diagnostics reported while building and validating a package document.

use crate::errors::InvalidArgument;
use std::fmt::{Display, Formatter};
use std::slice::Iter as SliceIter;
use std::vec::IntoIter as VecIntoIter;

/// The severity of a [`Diagnostic`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// The package violates a rule.
    Error,
    /// The package is usable but questionable.
    Warning,
    /// Informational feature report; never a problem.
    Info,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
        })
    }
}

/// A 1-based line/column position within a source document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Publication features surfaced as [`Severity::Info`] diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    ItemsCount,
    DeclaredMimeType,
    Reference,
    UniqueIdentifier,
    DcTitle,
    DcLanguage,
    DcCreator,
    DcContributor,
    DcPublisher,
    DcRights,
    DcSubject,
    DcDescription,
    DcDate,
    ModifiedDate,
    FixedLayout,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ItemsCount => "items-count",
            Self::DeclaredMimeType => "declared-mimetype",
            Self::Reference => "reference",
            Self::UniqueIdentifier => "unique-identifier",
            Self::DcTitle => "dc-title",
            Self::DcLanguage => "dc-language",
            Self::DcCreator => "dc-creator",
            Self::DcContributor => "dc-contributor",
            Self::DcPublisher => "dc-publisher",
            Self::DcRights => "dc-rights",
            Self::DcSubject => "dc-subject",
            Self::DcDescription => "dc-description",
            Self::DcDate => "dc-date",
            Self::ModifiedDate => "modified-date",
            Self::FixedLayout => "fixed-layout",
        }
    }
}

impl Display for Feature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every message the builder and validator can report.
///
/// [`Issue::key`] and [`Issue::args`] expose the message in a
/// localization-friendly `(key, args)` form; [`Display`] renders English text.
#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ////////////////////////////////////////////////////////////////////////////////
    // Package element
    ////////////////////////////////////////////////////////////////////////////////
    #[error("unique-identifier attribute in package element must be present and have a value")]
    MissingUniqueIdentifier,

    #[error(
        "unique-identifier attribute in package element must reference an existing identifier element id"
    )]
    UniqueIdentifierNotFound,

    #[error("OPF file is using OEBPS 1.2 syntax allowing backwards compatibility")]
    LegacySyntax,

    ////////////////////////////////////////////////////////////////////////////////
    // Structural
    ////////////////////////////////////////////////////////////////////////////////
    #[error("required attribute '{attribute}' is missing on element '{element}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("duplicate manifest item id '{0}'")]
    DuplicateItemId(String),

    #[error("href '{0}' resolves outside of the container")]
    InvalidHref(String),

    #[error("Only audio and video remote resources are permitted")]
    RemoteResourceNotAllowed,

    #[error("item with id '{0}' not found")]
    ItemNotFound(String),

    #[error(
        "toc attribute references resource with non-NCX mime type; \"application/x-dtbncx+xml\" is expected"
    )]
    TocNotNcx,

    #[error("use of deprecated element '{0}'")]
    DeprecatedElement(String),

    #[error("undefined property '{0}'")]
    UndefinedProperty(String),

    #[error("property '{property}' is not applicable to media-type '{media_type}'")]
    PropertyNotApplicable {
        property: String,
        media_type: String,
    },

    #[error("itemref can't have both page-spread-right and page-spread-left properties")]
    ConflictingPageSpread,

    ////////////////////////////////////////////////////////////////////////////////
    // Metadata
    ////////////////////////////////////////////////////////////////////////////////
    #[error("role value '{0}' is not valid")]
    InvalidRole(String),

    #[error("{0} element is empty")]
    EmptyElement(String),

    #[error("date value '{value}' is not valid as per http://www.w3.org/TR/NOTE-datetime: {detail}")]
    InvalidDate { value: String, detail: String },

    #[error(
        "date value '{value}' does not follow recommended syntax as per http://www.w3.org/TR/NOTE-datetime: {detail}"
    )]
    UnrecommendedDate { value: String, detail: String },

    ////////////////////////////////////////////////////////////////////////////////
    // Bindings
    ////////////////////////////////////////////////////////////////////////////////
    #[error("'{0}' is a core media type and cannot be assigned a binding handler")]
    CoreMediaTypeBinding(String),

    #[error("media type '{media_type}' already has a binding handler: '{handler}'")]
    DuplicateBinding { media_type: String, handler: String },

    #[error(
        "Item should have the scripted property set in order to be a valid mediaType handler."
    )]
    BindingHandlerNotScripted,

    ////////////////////////////////////////////////////////////////////////////////
    // Manifest items
    ////////////////////////////////////////////////////////////////////////////////
    #[error("text/html is not appropriate for XHTML/OPS, use application/xhtml+xml instead")]
    HtmlForXhtml,

    #[error("text/html is not appropriate for OEBPS 1.2, use text/x-oeb1-document instead")]
    HtmlForOeb12,

    #[error("deprecated media-type '{0}'")]
    DeprecatedMediaType(String),

    #[error("use of OPS media-type '{media_type}' in OEBPS 1.2 context; use {preferred} instead")]
    OpsMediaTypeInOeb12 {
        media_type: String,
        preferred: &'static str,
    },

    #[error("fallback item could not be found")]
    FallbackNotFound,

    #[error("fallback-style item could not be found")]
    FallbackStyleNotFound,

    #[error("circular reference in fallback chain")]
    CircularFallback,

    #[error("fallback chain exceeds the maximum depth of {0}")]
    FallbackTooDeep(usize),

    #[error("{0}")]
    ResourceRejected(InvalidArgument),

    ////////////////////////////////////////////////////////////////////////////////
    // Spine
    ////////////////////////////////////////////////////////////////////////////////
    #[error("'{0}' is not a permissible spine media-type")]
    NotSpineMediaType(String),

    #[error("non-standard media-type '{0}' with no fallback")]
    SpineNoFallback(String),

    #[error("non-standard media-type '{0}' with fallback to non-spine-allowed media-type")]
    SpineInvalidFallback(String),

    #[error("spine contains only non-linear resources")]
    SpineOnlyNonLinear,

    #[error("spine contains multiple references to the manifest item with id {0}")]
    SpineDuplicateReference(String),

    ////////////////////////////////////////////////////////////////////////////////
    // Guide
    ////////////////////////////////////////////////////////////////////////////////
    #[error("File listed in reference element in guide was not declared in OPF manifest: {0}")]
    GuideUndeclared(String),

    #[error("Guide reference to an item that is not a Content Document: {0}")]
    GuideNotContentDocument(String),

    ////////////////////////////////////////////////////////////////////////////////
    // Reference graph
    ////////////////////////////////////////////////////////////////////////////////
    #[error("'{0}': referenced resource missing in the package")]
    ReferencedResourceMissing(String),

    #[error("'{0}': referenced resource exists, but not declared in the OPF file")]
    ReferencedResourceUndeclared(String),

    ////////////////////////////////////////////////////////////////////////////////
    // Informational
    ////////////////////////////////////////////////////////////////////////////////
    #[error("{feature}: {value}")]
    Feature { feature: Feature, value: String },
}

impl Issue {
    /// A stable, dotted message key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::MissingUniqueIdentifier => "opf.unique-identifier.missing",
            Self::UniqueIdentifierNotFound => "opf.unique-identifier.not-found",
            Self::LegacySyntax => "opf.package.legacy-syntax",
            Self::MissingAttribute { .. } => "opf.attribute.missing",
            Self::DuplicateItemId(_) => "opf.item.duplicate-id",
            Self::InvalidHref(_) => "opf.item.invalid-href",
            Self::RemoteResourceNotAllowed => "opf.item.remote-not-allowed",
            Self::ItemNotFound(_) => "opf.idref.not-found",
            Self::TocNotNcx => "opf.spine.toc-not-ncx",
            Self::DeprecatedElement(_) => "opf.element.deprecated",
            Self::UndefinedProperty(_) => "opf.property.undefined",
            Self::PropertyNotApplicable { .. } => "opf.property.not-applicable",
            Self::ConflictingPageSpread => "opf.itemref.page-spread",
            Self::InvalidRole(_) => "opf.metadata.invalid-role",
            Self::EmptyElement(_) => "opf.metadata.empty",
            Self::InvalidDate { .. } => "opf.metadata.date-invalid",
            Self::UnrecommendedDate { .. } => "opf.metadata.date-unrecommended",
            Self::CoreMediaTypeBinding(_) => "opf.bindings.core-media-type",
            Self::DuplicateBinding { .. } => "opf.bindings.duplicate",
            Self::BindingHandlerNotScripted => "opf.bindings.not-scripted",
            Self::HtmlForXhtml => "opf.item.html-for-xhtml",
            Self::HtmlForOeb12 => "opf.item.html-for-oeb12",
            Self::DeprecatedMediaType(_) => "opf.item.deprecated-media-type",
            Self::OpsMediaTypeInOeb12 { .. } => "opf.item.ops-media-type-in-oeb12",
            Self::FallbackNotFound => "opf.fallback.not-found",
            Self::FallbackStyleNotFound => "opf.fallback-style.not-found",
            Self::CircularFallback => "opf.fallback.circular",
            Self::FallbackTooDeep(_) => "opf.fallback.too-deep",
            Self::ResourceRejected(_) => "opf.item.resource-rejected",
            Self::NotSpineMediaType(_) => "opf.spine.media-type",
            Self::SpineNoFallback(_) => "opf.spine.no-fallback",
            Self::SpineInvalidFallback(_) => "opf.spine.invalid-fallback",
            Self::SpineOnlyNonLinear => "opf.spine.only-non-linear",
            Self::SpineDuplicateReference(_) => "opf.spine.duplicate-reference",
            Self::GuideUndeclared(_) => "opf.guide.undeclared",
            Self::GuideNotContentDocument(_) => "opf.guide.not-content-document",
            Self::ReferencedResourceMissing(_) => "xref.resource.missing",
            Self::ReferencedResourceUndeclared(_) => "xref.resource.undeclared",
            Self::Feature { .. } => "info.feature",
        }
    }

    /// The arguments interpolated into the message, in order.
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::MissingAttribute { element, attribute } => {
                vec![attribute.to_string(), element.to_string()]
            }
            Self::DuplicateItemId(arg)
            | Self::InvalidHref(arg)
            | Self::ItemNotFound(arg)
            | Self::DeprecatedElement(arg)
            | Self::UndefinedProperty(arg)
            | Self::InvalidRole(arg)
            | Self::EmptyElement(arg)
            | Self::CoreMediaTypeBinding(arg)
            | Self::DeprecatedMediaType(arg)
            | Self::NotSpineMediaType(arg)
            | Self::SpineNoFallback(arg)
            | Self::SpineInvalidFallback(arg)
            | Self::SpineDuplicateReference(arg)
            | Self::GuideUndeclared(arg)
            | Self::GuideNotContentDocument(arg)
            | Self::ReferencedResourceMissing(arg)
            | Self::ReferencedResourceUndeclared(arg) => vec![arg.clone()],
            Self::InvalidDate { value, detail } | Self::UnrecommendedDate { value, detail } => {
                vec![value.clone(), detail.clone()]
            }
            Self::DuplicateBinding {
                media_type,
                handler,
            } => vec![media_type.clone(), handler.clone()],
            Self::PropertyNotApplicable {
                property,
                media_type,
            } => vec![property.clone(), media_type.clone()],
            Self::OpsMediaTypeInOeb12 {
                media_type,
                preferred,
            } => vec![media_type.clone(), preferred.to_string()],
            Self::FallbackTooDeep(limit) => vec![limit.to_string()],
            Self::ResourceRejected(error) => vec![error.to_string()],
            Self::Feature { feature, value } => vec![feature.to_string(), value.clone()],
            Self::MissingUniqueIdentifier
            | Self::UniqueIdentifierNotFound
            | Self::LegacySyntax
            | Self::RemoteResourceNotAllowed
            | Self::TocNotNcx
            | Self::ConflictingPageSpread
            | Self::BindingHandlerNotScripted
            | Self::HtmlForXhtml
            | Self::HtmlForOeb12
            | Self::FallbackNotFound
            | Self::FallbackStyleNotFound
            | Self::CircularFallback
            | Self::SpineOnlyNonLinear => Vec::new(),
        }
    }
}

/// A single reported message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// The document the message concerns, if any.
    pub path: Option<String>,
    pub location: Option<Location>,
    pub issue: Issue,
}

impl Diagnostic {
    pub fn message_key(&self) -> &'static str {
        self.issue.key()
    }

    pub fn message_args(&self) -> Vec<String> {
        self.issue.args()
    }

    /// The line number, or `None` for document-level messages.
    pub fn line(&self) -> Option<usize> {
        self.location.map(|location| location.line)
    }

    pub fn column(&self) -> Option<usize> {
        self.location.map(|location| location.column)
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.severity)?;

        match (&self.path, self.location) {
            (Some(path), Some(location)) => write!(f, " ({path}:{location})")?,
            (Some(path), None) => write!(f, " ({path})")?,
            (None, Some(location)) => write!(f, " ({location})")?,
            (None, None) => {}
        }
        write!(f, ": {}", self.issue)
    }
}

/// An ordered collection of [`Diagnostic`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub(crate) fn report(
        &mut self,
        severity: Severity,
        path: Option<&str>,
        location: Option<Location>,
        issue: Issue,
    ) {
        log::trace!("{severity}: {issue}");
        self.push(Diagnostic {
            severity,
            path: path.map(str::to_owned),
            location,
            issue,
        });
    }

    pub(crate) fn error(&mut self, path: &str, location: Option<Location>, issue: Issue) {
        self.report(Severity::Error, Some(path), location, issue);
    }

    pub(crate) fn warning(&mut self, path: &str, location: Option<Location>, issue: Issue) {
        self.report(Severity::Warning, Some(path), location, issue);
    }

    pub(crate) fn feature(&mut self, path: Option<&str>, feature: Feature, value: impl Into<String>) {
        self.report(
            Severity::Info,
            path,
            None,
            Issue::Feature {
                feature,
                value: value.into(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> SliceIter<'_, Diagnostic> {
        self.0.iter()
    }

    /// The number of diagnostics with the given `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.by_severity(severity).count()
    }

    pub fn by_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(move |d| d.severity == severity)
    }

    /// All diagnostics whose issue has the given message `key`.
    pub fn by_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.0.iter().filter(move |d| d.message_key() == key)
    }

    /// Errors and warnings, excluding informational feature reports.
    pub fn problems(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.severity != Severity::Info)
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = VecIntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = SliceIter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<T: IntoIterator<Item = Diagnostic>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_key_and_args() {
        #[rustfmt::skip]
        let expected = [
            (Issue::CircularFallback, "opf.fallback.circular", vec![]),
            (Issue::ItemNotFound("t".into()), "opf.idref.not-found", vec!["t"]),
            (
                Issue::OpsMediaTypeInOeb12 { media_type: "text/css".into(), preferred: "text/x-oeb1-css" },
                "opf.item.ops-media-type-in-oeb12",
                vec!["text/css", "text/x-oeb1-css"],
            ),
            (
                Issue::InvalidDate { value: "20001".into(), detail: "20001".into() },
                "opf.metadata.date-invalid",
                vec!["20001", "20001"],
            ),
        ];

        for (issue, key, args) in expected {
            assert_eq!(key, issue.key());
            assert_eq!(args, issue.args());
        }
    }

    #[test]
    fn test_diagnostic_display() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.error(
            "OEBPS/content.opf",
            Some(Location::new(12, 5)),
            Issue::SpineNoFallback("application/octet-stream".into()),
        );
        diagnostics.feature(None, Feature::ItemsCount, "3");

        let rendered = diagnostics.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(
            [
                "ERROR (OEBPS/content.opf:12:5): non-standard media-type 'application/octet-stream' with no fallback",
                "INFO: items-count: 3",
            ],
            rendered.as_slice()
        );
        assert_eq!(1, diagnostics.count(Severity::Error));
        assert_eq!(1, diagnostics.problems().count());
        assert!(diagnostics.has_errors());
    }
}
