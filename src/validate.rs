//! Semantic checks over a completed [`Document`].

mod bindings;
mod guide;
mod items;
mod spine;

use crate::diagnostics::{Diagnostics, Feature, Issue, Location};
use crate::fallback::FallbackResolver;
use crate::package::{Document, Item};
use crate::rules::RuleSet;
use crate::settings::CheckSettings;
use crate::xref::{ReferenceGraph, ResourceGraph};

/// Runs the version-specific rule set over a built [`Document`].
///
/// A validator holds no state between runs: validating the same document
/// twice yields the same diagnostics.
///
/// # Examples
/// ```
/// # use opfcheck::{CheckSettings, EpubVersion, Validator};
/// let opf = br#"<package xmlns="http://www.idpf.org/2007/opf" unique-identifier="uid">
///   <manifest>
///     <item id="c1" href="c1.bin" media-type="application/octet-stream"/>
///   </manifest>
///   <spine><itemref idref="c1"/></spine>
/// </package>"#;
/// let settings = CheckSettings::builder()
///     .version(EpubVersion::Epub3)
///     .report_features(false)
///     .build();
/// let (document, _) = opfcheck::build_from_xml(settings.clone(), opf).unwrap();
///
/// let diagnostics = Validator::new(settings).validate(&document);
/// let keys = diagnostics.iter().map(|d| d.message_key()).collect::<Vec<_>>();
///
/// assert_eq!(["opf.spine.no-fallback", "opf.unique-identifier.not-found"], keys.as_slice());
/// ```
#[derive(Clone, Debug)]
pub struct Validator {
    settings: CheckSettings,
    rules: RuleSet,
}

/// State of a single validation run.
struct Pass<'a> {
    settings: &'a CheckSettings,
    rules: RuleSet,
    document: &'a Document,
    diagnostics: Diagnostics,
}

////////////////////////////////////////////////////////////////////////////////
// PRIVATE API
////////////////////////////////////////////////////////////////////////////////

impl<'a> Pass<'a> {
    fn path(&self) -> &'a str {
        self.document.package_path()
    }

    fn error(&mut self, location: Option<Location>, issue: Issue) {
        let path = self.path();
        self.diagnostics.error(path, location, issue);
    }

    fn warning(&mut self, location: Option<Location>, issue: Issue) {
        let path = self.path();
        self.diagnostics.warning(path, location, issue);
    }

    fn feature(&mut self, path: Option<&str>, feature: Feature, value: impl Into<String>) {
        if self.settings.report_features {
            self.diagnostics.feature(path, feature, value);
        }
    }

    /// A resolver with its own visited set.
    fn resolver(&self) -> FallbackResolver<'a> {
        FallbackResolver::new(self.document, self.rules, self.settings.max_fallback_depth)
    }

    fn forward_references(&self, graph: &mut dyn ReferenceGraph) {
        for reference in self.document.cross_references() {
            graph.register_reference(
                &reference.source,
                reference.location,
                &reference.target,
                reference.kind,
            );
        }
        for binding in self.document.bindings() {
            graph.register_binding(&binding.media_type, &binding.handler_path);
        }
    }

    fn check_unique_identifier(&mut self) {
        if self.document.unique_identifier().is_some()
            && !self.document.has_unique_identifier_element()
        {
            self.error(None, Issue::UniqueIdentifierNotFound);
        }
    }

    /// Registers every manifest item with `graph`, then re-runs the per-item check.
    fn register_resources(&mut self, graph: &mut dyn ReferenceGraph) {
        let document = self.document;
        self.feature(None, Feature::ItemsCount, document.item_count().to_string());

        for item in document.items() {
            self.register_resource(item, graph);

            if let (Some(path), Some(media_type)) = (item.path(), item.media_type()) {
                self.feature(Some(path), Feature::DeclaredMimeType, media_type);
            }
            self.check_item(item);
        }
    }

    fn register_resource(&mut self, item: &Item, graph: &mut dyn ReferenceGraph) {
        let Some(path) = item.path() else {
            return;
        };
        let has_item_fallback = self
            .resolver()
            .resolve_item_fallback(item, true, &mut self.diagnostics);
        let has_image_fallback = self
            .resolver()
            .resolve_image_fallback(item, &mut self.diagnostics);

        let registered = graph.register_resource(
            path,
            item.media_type(),
            item.in_spine(),
            has_item_fallback,
            has_image_fallback,
        );
        if let Err(error) = registered {
            self.error(Some(item.location()), Issue::ResourceRejected(error));
        }
    }

    fn run(mut self, graph: &mut dyn ReferenceGraph) -> Diagnostics {
        let document = self.document;
        log::debug!(
            "validating {} against the EPUB {} rule set",
            self.path(),
            self.rules.version(),
        );
        self.forward_references(graph);

        for item in document.items() {
            self.check_item(item);
        }
        self.check_spine();
        self.check_unique_identifier();
        self.register_resources(graph);
        self.check_guide();
        if self.rules.check_bindings {
            self.check_bindings(graph);
        }

        self.diagnostics.extend(graph.check_references());
        self.diagnostics
    }
}

////////////////////////////////////////////////////////////////////////////////
// PUBLIC API
////////////////////////////////////////////////////////////////////////////////

impl Validator {
    pub fn new(settings: impl Into<CheckSettings>) -> Self {
        let settings = settings.into();
        let rules = RuleSet::for_version(settings.version);

        Self { settings, rules }
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    /// Validates `document`, checking references with a fresh [`ResourceGraph`].
    pub fn validate(&self, document: &Document) -> Diagnostics {
        self.validate_with(document, &mut ResourceGraph::new())
    }

    /// Validates `document`, registering its resources and references with `graph`.
    ///
    /// The diagnostics returned by [`ReferenceGraph::check_references`] are
    /// appended last.
    pub fn validate_with(&self, document: &Document, graph: &mut dyn ReferenceGraph) -> Diagnostics {
        if document.version() != self.settings.version {
            log::warn!(
                "document built for EPUB {} validated with the EPUB {} rule set",
                document.version(),
                self.settings.version,
            );
        }

        Pass {
            settings: &self.settings,
            rules: self.rules,
            document,
            diagnostics: Diagnostics::new(),
        }
        .run(graph)
    }
}
