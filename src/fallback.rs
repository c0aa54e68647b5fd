//! Fallback chain resolution.

use crate::diagnostics::{Diagnostics, Issue};
use crate::media_type;
use crate::package::{Document, Item};
use crate::rules::RuleSet;
use std::collections::HashSet;

/// Walks `fallback` chains to decide whether an item degrades to a
/// supported type.
///
/// Every top-level call starts with an empty set of visited ids, so
/// resolving one item never affects another. A cycle is reported once,
/// at the location of the item the resolution started from, and fails
/// the whole resolution.
///
/// # Examples
/// ```
/// # use opfcheck::{CheckSettings, Diagnostics, EpubVersion, FallbackResolver, RuleSet};
/// let opf = br#"<package xmlns="http://www.idpf.org/2007/opf" unique-identifier="uid">
///   <manifest>
///     <item id="a" href="a.bin" media-type="application/octet-stream" fallback="b"/>
///     <item id="b" href="b.xhtml" media-type="application/xhtml+xml"/>
///   </manifest>
/// </package>"#;
/// let settings = CheckSettings::builder().version(EpubVersion::Epub2).build();
/// let (document, _) = opfcheck::build_from_xml(settings, opf).unwrap();
///
/// let resolver = FallbackResolver::new(&document, RuleSet::for_version(EpubVersion::Epub2), 256);
/// let mut diagnostics = Diagnostics::new();
/// let item = document.item_by_id("a").unwrap();
///
/// assert!(resolver.resolve_item_fallback(item, false, &mut diagnostics));
/// assert!(!resolver.resolve_image_fallback(item, &mut diagnostics));
/// assert!(diagnostics.is_empty());
/// ```
pub struct FallbackResolver<'a> {
    document: &'a Document,
    rules: RuleSet,
    max_depth: usize,
}

enum Outcome {
    Resolved,
    Unresolved,
    /// A cycle or an overly deep chain; already reported.
    Aborted,
}

////////////////////////////////////////////////////////////////////////////////
// PRIVATE API
////////////////////////////////////////////////////////////////////////////////

impl<'a> FallbackResolver<'a> {
    fn walk(
        &self,
        origin: &Item,
        accept: impl Fn(&str) -> bool,
        diagnostics: &mut Diagnostics,
    ) -> Outcome {
        let path = self.document.package_path();
        let mut visited = HashSet::new();
        let mut current = origin;

        loop {
            let Some(fallback) = current.fallback().map(str::trim) else {
                return Outcome::Unresolved;
            };
            if !visited.insert(fallback) {
                diagnostics.error(path, Some(origin.location()), Issue::CircularFallback);
                return Outcome::Aborted;
            }
            if visited.len() > self.max_depth {
                diagnostics.error(
                    path,
                    Some(origin.location()),
                    Issue::FallbackTooDeep(self.max_depth),
                );
                return Outcome::Aborted;
            }
            // Unresolved ids are reported by the per-item check
            let Some(next) = self.document.item_by_id(fallback) else {
                return Outcome::Unresolved;
            };
            let Some(media_type) = next.media_type() else {
                return Outcome::Unresolved;
            };
            log::trace!("fallback {:?} -> {fallback} ({media_type})", current.id());

            if accept(media_type) {
                return Outcome::Resolved;
            }
            current = next;
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// PUBLIC API
////////////////////////////////////////////////////////////////////////////////

impl<'a> FallbackResolver<'a> {
    pub fn new(document: &'a Document, rules: RuleSet, max_depth: usize) -> Self {
        Self {
            document,
            rules,
            max_depth,
        }
    }

    /// `true` if the `fallback` chain of `item` reaches a blessed or
    /// deprecated content document type.
    ///
    /// With `check_style`, an unresolved chain is still accepted when
    /// `item` itself declares a `fallback-style` to a style sheet.
    pub fn resolve_item_fallback(
        &self,
        item: &Item,
        check_style: bool,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        match self.walk(item, |media_type| self.rules.is_fallback_target(media_type), diagnostics) {
            Outcome::Resolved => true,
            Outcome::Aborted => false,
            Outcome::Unresolved if check_style => item
                .fallback_style()
                .and_then(|id| self.document.item_by_id(id.trim()))
                .and_then(Item::media_type)
                .is_some_and(|media_type| self.rules.is_style_target(media_type)),
            Outcome::Unresolved => false,
        }
    }

    /// `true` if the `fallback` chain of `item` reaches a blessed image type.
    pub fn resolve_image_fallback(&self, item: &Item, diagnostics: &mut Diagnostics) -> bool {
        matches!(
            self.walk(item, media_type::is_blessed_image, diagnostics),
            Outcome::Resolved
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Location;
    use crate::settings::EpubVersion;

    /// `(id, media type, fallback, fallback-style)`
    type Decl<'a> = (&'a str, &'a str, Option<&'a str>, Option<&'a str>);

    fn document(version: EpubVersion, items: &[Decl<'_>]) -> Document {
        let mut document = Document::new(version, "OPS/content.opf".into());

        for (line, (id, media_type, fallback, fallback_style)) in items.iter().enumerate() {
            document.insert_item(Item {
                id: Some(id.to_string()),
                path: Some(format!("OPS/{id}")),
                media_type: Some(media_type.to_string()),
                fallback: fallback.map(str::to_owned),
                fallback_style: fallback_style.map(str::to_owned),
                location: Location::new(line + 1, 1),
                ..Item::default()
            });
        }
        document
    }

    fn resolver(document: &Document, max_depth: usize) -> FallbackResolver<'_> {
        FallbackResolver::new(document, RuleSet::for_version(document.version()), max_depth)
    }

    #[test]
    fn test_multi_hop_chain() {
        #[rustfmt::skip]
        let document = document(EpubVersion::Epub2, &[
            ("a", "application/octet-stream", Some(" b "), None),
            ("b", "application/x-custom", Some("c"), None),
            ("c", "application/xhtml+xml", None, None),
        ]);
        let mut diagnostics = Diagnostics::new();
        let resolver = resolver(&document, 256);

        assert!(resolver.resolve_item_fallback(document.item_by_id("a").unwrap(), false, &mut diagnostics));
        assert!(!resolver.resolve_item_fallback(document.item_by_id("c").unwrap(), false, &mut diagnostics));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_cycles_reported_once() {
        #[rustfmt::skip]
        let document = document(EpubVersion::Epub3, &[
            ("self", "application/octet-stream", Some("self"), None),
            ("x", "application/octet-stream", Some("y"), None),
            ("y", "application/octet-stream", Some("z"), None),
            ("z", "application/octet-stream", Some("x"), None),
        ]);
        let resolver = resolver(&document, 256);

        for (id, line) in [("self", 1), ("x", 2), ("y", 3), ("z", 4)] {
            let mut diagnostics = Diagnostics::new();
            let item = document.item_by_id(id).unwrap();

            assert!(!resolver.resolve_item_fallback(item, true, &mut diagnostics));
            assert_eq!(1, diagnostics.by_key("opf.fallback.circular").count(), "{id}");
            assert_eq!(1, diagnostics.len());
            assert_eq!(Some(line), diagnostics.iter().next().unwrap().line());
        }
    }

    #[test]
    fn test_fresh_visited_set_per_call() {
        #[rustfmt::skip]
        let document = document(EpubVersion::Epub2, &[
            ("a", "application/octet-stream", Some("c"), None),
            ("b", "application/octet-stream", Some("c"), None),
            ("c", "image/png", None, None),
        ]);
        let resolver = resolver(&document, 256);
        let mut diagnostics = Diagnostics::new();

        for id in ["a", "b", "a"] {
            let item = document.item_by_id(id).unwrap();
            assert!(resolver.resolve_image_fallback(item, &mut diagnostics));
            assert!(!resolver.resolve_item_fallback(item, true, &mut diagnostics));
        }
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_style_fallback_of_original_item() {
        #[rustfmt::skip]
        let document = document(EpubVersion::Epub2, &[
            ("a", "application/octet-stream", Some("b"), Some("css")),
            ("b", "application/octet-stream", Some("missing"), Some("css")),
            ("css", "text/x-oeb1-css", None, None),
        ]);
        let resolver = resolver(&document, 256);
        let mut diagnostics = Diagnostics::new();
        let a = document.item_by_id("a").unwrap();

        assert!(resolver.resolve_item_fallback(a, true, &mut diagnostics));
        assert!(!resolver.resolve_item_fallback(a, false, &mut diagnostics));
        assert!(!resolver.resolve_image_fallback(a, &mut diagnostics));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_depth_limit() {
        #[rustfmt::skip]
        let document = document(EpubVersion::Epub3, &[
            ("a", "application/octet-stream", Some("b"), None),
            ("b", "application/octet-stream", Some("c"), None),
            ("c", "application/octet-stream", Some("d"), None),
            ("d", "application/xhtml+xml", None, None),
        ]);
        let a = document.item_by_id("a").unwrap();

        let mut diagnostics = Diagnostics::new();
        assert!(resolver(&document, 3).resolve_item_fallback(a, false, &mut diagnostics));
        assert!(diagnostics.is_empty());

        assert!(!resolver(&document, 2).resolve_item_fallback(a, false, &mut diagnostics));
        assert_eq!(1, diagnostics.by_key("opf.fallback.too-deep").count());
    }
}
