//! The in-memory model of a package document.

mod item;
mod reference;

use crate::diagnostics::Location;
use crate::settings::EpubVersion;
use std::collections::HashMap;

pub use item::{Item, ItemIndex};
pub use reference::{Binding, CrossReference, GuideReference, ReferenceKind};

/// One `itemref` of the spine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpineEntry {
    pub item: ItemIndex,
    pub idref: String,
    /// Where the `itemref` element was declared.
    pub location: Location,
}

/// The item registry built from a package document.
///
/// Produced by a [`PackageBuilder`](crate::PackageBuilder) and immutable
/// once handed out.
///
/// # Ordering
/// [`Document::items`] yields manifest order, [`Document::spine`] yields
/// document order (duplicates included) and [`Document::guide`] yields
/// declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub(crate) version: EpubVersion,
    pub(crate) package_path: String,
    /// Every declared item, including those without an `href`.
    arena: Vec<Item>,
    /// Items with a path, in manifest order.
    manifest: Vec<ItemIndex>,
    by_id: HashMap<String, ItemIndex>,
    by_path: HashMap<String, ItemIndex>,
    pub(crate) spine: Vec<SpineEntry>,
    pub(crate) guide: Vec<GuideReference>,
    pub(crate) cross_references: Vec<CrossReference>,
    pub(crate) bindings: Vec<Binding>,
    pub(crate) toc: Option<ItemIndex>,
    pub(crate) unique_identifier: Option<String>,
    pub(crate) unique_identifier_found: bool,
    pub(crate) legacy_syntax: bool,
}

////////////////////////////////////////////////////////////////////////////////
// PRIVATE API
////////////////////////////////////////////////////////////////////////////////

impl Document {
    pub(crate) fn new(version: EpubVersion, package_path: String) -> Self {
        Self {
            version,
            package_path,
            arena: Vec::new(),
            manifest: Vec::new(),
            by_id: HashMap::new(),
            by_path: HashMap::new(),
            spine: Vec::new(),
            guide: Vec::new(),
            cross_references: Vec::new(),
            bindings: Vec::new(),
            toc: None,
            unique_identifier: None,
            unique_identifier_found: false,
            legacy_syntax: false,
        }
    }

    /// Registers `item`; later declarations replace earlier ones in the
    /// id and path maps.
    pub(crate) fn insert_item(&mut self, item: Item) -> ItemIndex {
        let index = ItemIndex(self.arena.len());

        if let Some(id) = &item.id {
            self.by_id.insert(id.clone(), index);
        }
        if let Some(path) = &item.path {
            self.by_path.insert(path.clone(), index);
            self.manifest.push(index);
        }
        self.arena.push(item);
        index
    }

    pub(crate) fn item_mut(&mut self, index: ItemIndex) -> &mut Item {
        &mut self.arena[index.0]
    }
}

////////////////////////////////////////////////////////////////////////////////
// PUBLIC API
////////////////////////////////////////////////////////////////////////////////

impl Document {
    /// The rule set generation this document was built for.
    pub fn version(&self) -> EpubVersion {
        self.version
    }

    /// The location of the package document within its container.
    pub fn package_path(&self) -> &str {
        &self.package_path
    }

    /// Returns the item behind `index`.
    ///
    /// # Panics
    /// Panics if `index` was produced by a different document.
    pub fn item(&self, index: ItemIndex) -> &Item {
        &self.arena[index.0]
    }

    pub fn index_by_id(&self, id: &str) -> Option<ItemIndex> {
        self.by_id.get(id).copied()
    }

    /// The item registered under `id`, if any.
    ///
    /// This is a constant (`O(1)`) operation.
    pub fn item_by_id(&self, id: &str) -> Option<&Item> {
        self.index_by_id(id).map(|index| self.item(index))
    }

    pub fn index_by_path(&self, path: &str) -> Option<ItemIndex> {
        self.by_path.get(path).copied()
    }

    /// The item registered under the normalized `path`, if any.
    pub fn item_by_path(&self, path: &str) -> Option<&Item> {
        self.index_by_path(path).map(|index| self.item(index))
    }

    /// Manifest items with a path, in manifest order.
    pub fn items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.manifest.iter().map(|index| self.item(*index))
    }

    /// The manifest indices, in manifest order.
    pub fn item_indices(&self) -> &[ItemIndex] {
        &self.manifest
    }

    pub fn item_count(&self) -> usize {
        self.manifest.len()
    }

    /// The spine in document order.
    pub fn spine(&self) -> &[SpineEntry] {
        &self.spine
    }

    /// The items referenced by the spine in document order.
    pub fn spine_items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.spine.iter().map(|entry| self.item(entry.item))
    }

    pub fn guide(&self) -> &[GuideReference] {
        &self.guide
    }

    /// Links recorded while building, to be checked against the whole package.
    pub fn cross_references(&self) -> &[CrossReference] {
        &self.cross_references
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// The item referenced by the spine `toc` attribute (EPUB 2 NCX).
    pub fn toc(&self) -> Option<&Item> {
        self.toc.map(|index| self.item(index))
    }

    /// The `unique-identifier` attribute of the `package` element.
    pub fn unique_identifier(&self) -> Option<&str> {
        self.unique_identifier.as_deref()
    }

    /// `true` if a `dc:identifier` carries the id named by
    /// [`Self::unique_identifier`].
    pub fn has_unique_identifier_element(&self) -> bool {
        self.unique_identifier_found
    }

    /// `true` if the `package` element uses the OEBPS 1.2 dialect
    /// (any namespace other than the OPF 2007 namespace).
    pub fn is_legacy_syntax(&self) -> bool {
        self.legacy_syntax
    }
}
