use crate::consts;
use crate::diagnostics::Location;
use crate::util::uri;

/// Index of an [`Item`] within its [`Document`](super::Document).
///
/// Components refer to items through this handle; the document owns them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemIndex(pub(crate) usize);

impl ItemIndex {
    pub fn get(&self) -> usize {
        self.0
    }
}

/// A manifest `item`.
///
/// Created once when its element is parsed. Only the spine and
/// table-of-contents flags change afterward, while the same document is
/// still being built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Item {
    pub(crate) id: Option<String>,
    pub(crate) path: Option<String>,
    pub(crate) media_type: Option<String>,
    pub(crate) fallback: Option<String>,
    pub(crate) fallback_style: Option<String>,
    pub(crate) island_type: Option<String>,
    pub(crate) properties: Vec<String>,
    pub(crate) is_nav: bool,
    pub(crate) is_scripted: bool,
    pub(crate) is_ncx: bool,
    pub(crate) in_spine: bool,
    pub(crate) linear: bool,
    pub(crate) location: Location,
}

////////////////////////////////////////////////////////////////////////////////
// PRIVATE API
////////////////////////////////////////////////////////////////////////////////

impl Item {
    /// Splits `raw` on whitespace, deriving the `nav` and `scripted` flags.
    pub(crate) fn set_properties(&mut self, raw: &str) {
        self.properties = raw.split_whitespace().map(str::to_owned).collect();
        self.is_nav = self.has_property(consts::NAV_PROPERTY);
        self.is_scripted = self.has_property(consts::SCRIPTED_PROPERTY);
    }

    pub(crate) fn add_to_spine(&mut self, linear: bool) {
        self.in_spine = true;
        self.linear = linear;
    }
}

////////////////////////////////////////////////////////////////////////////////
// PUBLIC API
////////////////////////////////////////////////////////////////////////////////

impl Item {
    /// The `id` attribute, if declared.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The resolved, normalized location of the resource.
    ///
    /// Remote resources keep their absolute URL.
    /// [`None`] if the `href` attribute was missing or could not be resolved.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// The raw `media-type` attribute, if declared.
    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    /// The `fallback` attribute, if declared.
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    /// The `fallback-style` attribute (EPUB 2), if declared.
    pub fn fallback_style(&self) -> Option<&str> {
        self.fallback_style.as_deref()
    }

    /// The OEBPS 1.2 `island-type` attribute, if declared.
    pub fn island_type(&self) -> Option<&str> {
        self.island_type.as_deref()
    }

    /// The whitespace-separated `properties` tokens, in declaration order.
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    pub fn has_property(&self, property: &str) -> bool {
        self.properties.iter().any(|p| p == property)
    }

    /// `true` if the item declares the `nav` property.
    pub fn is_nav(&self) -> bool {
        self.is_nav
    }

    /// `true` if the item declares the `scripted` property.
    pub fn is_scripted(&self) -> bool {
        self.is_scripted
    }

    /// `true` if the spine `toc` attribute references this item.
    pub fn is_ncx(&self) -> bool {
        self.is_ncx
    }

    /// `true` if at least one `itemref` references this item.
    pub fn in_spine(&self) -> bool {
        self.in_spine
    }

    /// Whether the (last) `itemref` referencing this item is linear.
    ///
    /// # Panics
    /// Panics if the item is not part of the spine; the value only exists
    /// for spine items.
    pub fn linear(&self) -> bool {
        assert!(
            self.in_spine,
            "`linear` is only defined for spine items (item: {:?})",
            self.id
        );
        self.linear
    }

    /// `true` if the path carries a URL scheme (`http://`, `https://`, ...).
    pub fn is_remote(&self) -> bool {
        self.path.as_deref().is_some_and(uri::has_scheme)
    }

    /// Where the `item` element was declared.
    pub fn location(&self) -> Location {
        self.location
    }
}
