//! Whole-package cross-reference checking.
//!
//! The [`Validator`](crate::Validator) registers every manifest item and
//! every link found in the package document with a [`ReferenceGraph`],
//! then asks it once for the diagnostics of the whole package.
//!
//! [`ResourceGraph`] is the bundled in-memory implementation. Checkers
//! that also inspect content documents can supply their own graph through
//! [`Validator::validate_with`](crate::Validator::validate_with).

use crate::diagnostics::{Diagnostics, Issue, Location};
use crate::errors::InvalidArgument;
use crate::package::ReferenceKind;
use crate::util::uri;
use std::collections::{HashMap, HashSet};

/// A registry of package resources and the links between them.
pub trait ReferenceGraph {
    /// Declares the manifest resource at `path`, together with the outcome
    /// of its fallback resolution.
    ///
    /// # Errors
    /// [`InvalidArgument::DuplicateResource`]: When `path` is already registered.
    fn register_resource(
        &mut self,
        path: &str,
        media_type: Option<&str>,
        in_spine: bool,
        has_item_fallback: bool,
        has_image_fallback: bool,
    ) -> Result<(), InvalidArgument>;

    /// Records a link from `source` to the resolved `target` (which may
    /// carry a fragment).
    fn register_reference(
        &mut self,
        source: &str,
        location: Location,
        target: &str,
        kind: ReferenceKind,
    );

    /// Records `handler_path` as the binding handler of `media_type`.
    fn register_binding(&mut self, media_type: &str, handler_path: &str);

    /// Media types with a binding handler, in registration order.
    fn bindings_mime_types(&self) -> Vec<&str>;

    /// The path of the handler bound to `media_type`, if any.
    fn binding_handler_src(&self, media_type: &str) -> Option<&str>;

    /// Checks every recorded reference against the registered resources.
    fn check_references(&mut self) -> Diagnostics;
}

/// A registered manifest resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    pub media_type: Option<String>,
    pub in_spine: bool,
    pub has_item_fallback: bool,
    pub has_image_fallback: bool,
}

#[derive(Clone, Debug)]
struct Reference {
    source: String,
    location: Location,
    target: String,
}

/// In-memory [`ReferenceGraph`].
///
/// Without container entries every unregistered target is reported as
/// undeclared. With [`ResourceGraph::with_container`], targets absent
/// from the container are reported as missing instead.
///
/// # Examples
/// ```
/// # use opfcheck::Location;
/// # use opfcheck::xref::{ReferenceGraph, ResourceGraph};
/// # use opfcheck::ReferenceKind;
/// let mut graph = ResourceGraph::with_container(["OEBPS/c1.xhtml", "OEBPS/extra.xhtml"]);
/// graph.register_resource("OEBPS/c1.xhtml", Some("application/xhtml+xml"), true, false, false).unwrap();
///
/// let location = Location::new(12, 5);
/// graph.register_reference("OEBPS/content.opf", location, "OEBPS/c1.xhtml#start", ReferenceKind::Generic);
/// graph.register_reference("OEBPS/content.opf", location, "OEBPS/extra.xhtml", ReferenceKind::Generic);
/// graph.register_reference("OEBPS/content.opf", location, "OEBPS/gone.xhtml", ReferenceKind::Generic);
///
/// let keys = graph
///     .check_references()
///     .iter()
///     .map(|d| d.message_key())
///     .collect::<Vec<_>>();
/// assert_eq!(["xref.resource.undeclared", "xref.resource.missing"], keys.as_slice());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ResourceGraph {
    resources: HashMap<String, Resource>,
    references: Vec<Reference>,
    bindings: Vec<(String, String)>,
    container: Option<HashSet<String>>,
}

////////////////////////////////////////////////////////////////////////////////
// PRIVATE API
////////////////////////////////////////////////////////////////////////////////

impl ResourceGraph {
    fn check_reference(&self, reference: &Reference, diagnostics: &mut Diagnostics) {
        let path = uri::strip_query_and_fragment(&reference.target);

        if self.resources.contains_key(path) {
            return;
        }
        let issue = match &self.container {
            Some(entries) if !entries.contains(path) => {
                Issue::ReferencedResourceMissing(path.to_owned())
            }
            _ => Issue::ReferencedResourceUndeclared(path.to_owned()),
        };
        diagnostics.error(&reference.source, Some(reference.location), issue);
    }
}

////////////////////////////////////////////////////////////////////////////////
// PUBLIC API
////////////////////////////////////////////////////////////////////////////////

impl ResourceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph that knows the files present in the container.
    pub fn with_container(entries: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            container: Some(entries.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// The resource registered under `path`, if any.
    pub fn resource(&self, path: &str) -> Option<&Resource> {
        self.resources.get(path)
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }
}

impl ReferenceGraph for ResourceGraph {
    fn register_resource(
        &mut self,
        path: &str,
        media_type: Option<&str>,
        in_spine: bool,
        has_item_fallback: bool,
        has_image_fallback: bool,
    ) -> Result<(), InvalidArgument> {
        if self.resources.contains_key(path) {
            return Err(InvalidArgument::DuplicateResource(path.to_owned()));
        }
        log::trace!("resource {path} ({media_type:?})");

        self.resources.insert(
            path.to_owned(),
            Resource {
                media_type: media_type.map(str::to_owned),
                in_spine,
                has_item_fallback,
                has_image_fallback,
            },
        );
        Ok(())
    }

    fn register_reference(
        &mut self,
        source: &str,
        location: Location,
        target: &str,
        kind: ReferenceKind,
    ) {
        log::trace!("{kind:?} reference {source}:{location} -> {target}");

        self.references.push(Reference {
            source: source.to_owned(),
            location,
            target: target.to_owned(),
        });
    }

    fn register_binding(&mut self, media_type: &str, handler_path: &str) {
        self.bindings
            .push((media_type.to_owned(), handler_path.to_owned()));
    }

    fn bindings_mime_types(&self) -> Vec<&str> {
        self.bindings
            .iter()
            .map(|(media_type, _)| media_type.as_str())
            .collect()
    }

    fn binding_handler_src(&self, media_type: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(bound, _)| bound == media_type)
            .map(|(_, handler)| handler.as_str())
    }

    fn check_references(&mut self) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();

        for reference in &self.references {
            // Remote resources are outside the container
            if !uri::has_scheme(&reference.target) {
                self.check_reference(reference, &mut diagnostics);
            }
        }
        log::debug!(
            "checked {} references against {} resources",
            self.references.len(),
            self.resources.len(),
        );
        diagnostics
    }
}
