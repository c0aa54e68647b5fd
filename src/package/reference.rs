use crate::diagnostics::Location;
use crate::package::ItemIndex;
use crate::util::uri;

/// A `guide` `reference` (EPUB 2 landmarks).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuideReference {
    pub(crate) kind: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) href: Option<String>,
    pub(crate) location: Location,
}

impl GuideReference {
    /// The `type` attribute (`cover`, `toc`, `text`, ...).
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The resolved `href`, including any fragment.
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// The resolved `href` without its fragment; the key used for manifest lookup.
    pub fn path(&self) -> Option<&str> {
        self.href.as_deref().map(uri::strip_fragment)
    }

    pub fn location(&self) -> Location {
        self.location
    }
}

/// The kind of a [`CrossReference`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// A plain link with no expectation about the target's media type.
    Generic,
}

/// A link from the package document to another resource,
/// forwarded to the [`ReferenceGraph`](crate::xref::ReferenceGraph).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrossReference {
    pub source: String,
    pub location: Location,
    /// Resolved target, possibly with a fragment.
    pub target: String,
    pub kind: ReferenceKind,
}

/// An EPUB 3 `bindings` `mediaType` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub media_type: String,
    pub handler: ItemIndex,
    /// Path of the handler item.
    pub handler_path: String,
    pub location: Location,
}
