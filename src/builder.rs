//! Incremental construction of a [`Document`] from parse callbacks.

mod bindings;
mod guide;
mod manifest;
mod metadata;
mod spine;

use crate::consts;
use crate::diagnostics::{Diagnostics, Feature, Issue, Severity};
use crate::package::Document;
use crate::parser::{PackageHandler, ParseEvent, StartElement};
use crate::rules::RuleSet;
use crate::settings::CheckSettings;

/// Builds a [`Document`] while a package document is being parsed.
///
/// Recoverable problems (missing attributes, unresolved ids, ...) are
/// collected as diagnostics; the builder always produces a best-effort
/// model so validation can proceed.
///
/// # Examples
/// Driving the builder with owned events:
/// ```
/// # use opfcheck::{CheckSettings, Location, PackageBuilder};
/// # use opfcheck::parser::{Attribute, ParseEvent, StartElement};
/// const OPF: &str = "http://www.idpf.org/2007/opf";
///
/// let events = vec![
///     ParseEvent::Start(
///         StartElement::new("package", Some(OPF), Location::new(1, 1))
///             .with_attribute(Attribute::new("unique-identifier", "uid")),
///     ),
///     ParseEvent::Start(
///         StartElement::new("item", Some(OPF), Location::new(2, 3))
///             .with_attribute(Attribute::new("id", "c1"))
///             .with_attribute(Attribute::new("href", "text/c1.xhtml"))
///             .with_attribute(Attribute::new("media-type", "application/xhtml+xml")),
///     ),
///     ParseEvent::End,
///     ParseEvent::End,
/// ];
///
/// let (document, diagnostics) = PackageBuilder::new(CheckSettings::default()).build(events);
/// let item = document.item_by_id("c1").unwrap();
///
/// assert_eq!(Some("OEBPS/text/c1.xhtml"), item.path());
/// assert!(diagnostics.is_empty());
/// ```
pub struct PackageBuilder {
    settings: CheckSettings,
    rules: RuleSet,
    document: Document,
    diagnostics: Diagnostics,
    open: Vec<OpenElement>,
    /// A `rendition:layout` meta declared the whole publication pre-paginated.
    pre_paginated: bool,
}

struct OpenElement {
    element: StartElement,
    /// Character data, kept for metadata elements only.
    text: Option<String>,
}

enum Vocabulary {
    Package,
    DublinCore,
    Foreign,
}

////////////////////////////////////////////////////////////////////////////////
// PRIVATE API
////////////////////////////////////////////////////////////////////////////////

impl PackageBuilder {
    fn path(&self) -> &str {
        &self.settings.package_path
    }

    fn error(&mut self, element: &StartElement, issue: Issue) {
        self.diagnostics
            .error(&self.settings.package_path, Some(element.location), issue);
    }

    fn warning(&mut self, element: &StartElement, issue: Issue) {
        self.diagnostics
            .warning(&self.settings.package_path, Some(element.location), issue);
    }

    fn report(&mut self, severity: Severity, element: &StartElement, issue: Issue) {
        self.diagnostics.report(
            severity,
            Some(&self.settings.package_path),
            Some(element.location),
            issue,
        );
    }

    /// Publication-level feature, if feature reporting is enabled.
    fn feature(&mut self, path: Option<&str>, feature: Feature, value: &str) {
        if self.settings.report_features {
            self.diagnostics.feature(path, feature, value);
        }
    }

    fn vocabulary(element: &StartElement) -> Vocabulary {
        match element.namespace.as_deref() {
            None | Some(consts::OPF_NAMESPACE) | Some(consts::OEB12_NAMESPACE) => {
                Vocabulary::Package
            }
            Some(consts::DC_NAMESPACE) => Vocabulary::DublinCore,
            Some(_) => Vocabulary::Foreign,
        }
    }

    fn on_package(&mut self, element: &StartElement) {
        if !element.is_in(consts::OPF_NAMESPACE) {
            self.document.legacy_syntax = true;
            self.warning(element, Issue::LegacySyntax);
        }
        if let Some(raw) = element.attribute(consts::VERSION) {
            log::debug!("package version attribute: {raw}");
        }

        match element.attribute(consts::UNIQUE_ID).filter(|uid| !uid.is_empty()) {
            Some(uid) => self.document.unique_identifier = Some(uid.to_owned()),
            None => self.error(element, Issue::MissingUniqueIdentifier),
        }
    }

    fn on_package_element(&mut self, element: &StartElement) {
        match element.name.as_str() {
            consts::PACKAGE => self.on_package(element),
            consts::ITEM => self.on_item(element),
            consts::REFERENCE => self.on_reference(element),
            consts::SPINE => self.on_spine(element),
            consts::ITEMREF => self.on_itemref(element),
            consts::MEDIA_TYPE_ELEMENT if self.rules.check_bindings => self.on_binding(element),
            name @ (consts::DC_METADATA | consts::X_METADATA) if !self.document.legacy_syntax => {
                self.error(element, Issue::DeprecatedElement(name.to_owned()));
            }
            _ => {}
        }
    }
}

impl PackageHandler for PackageBuilder {
    fn on_element_start(&mut self, element: &StartElement) {
        let keep_text = match Self::vocabulary(element) {
            Vocabulary::Package => {
                self.on_package_element(element);
                element.name == consts::META
            }
            Vocabulary::DublinCore => {
                self.on_dc_start(element);
                true
            }
            Vocabulary::Foreign => false,
        };

        self.open.push(OpenElement {
            element: element.clone(),
            text: keep_text.then(String::new),
        });
    }

    fn on_text(&mut self, text: &str) {
        if let Some(buffer) = self.open.last_mut().and_then(|open| open.text.as_mut()) {
            buffer.push_str(text);
        }
    }

    fn on_element_end(&mut self) {
        let Some(OpenElement { element, text }) = self.open.pop() else {
            log::warn!("unbalanced element end ignored");
            return;
        };
        let text = text.unwrap_or_default();

        match Self::vocabulary(&element) {
            Vocabulary::Package if element.name == consts::META => self.on_meta_end(&element, &text),
            Vocabulary::DublinCore => self.on_dc_end(&element, &text),
            _ => {}
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// PUBLIC API
////////////////////////////////////////////////////////////////////////////////

impl PackageBuilder {
    pub fn new(settings: impl Into<CheckSettings>) -> Self {
        let settings = settings.into();
        let rules = RuleSet::for_version(settings.version);
        let document = Document::new(settings.version, settings.package_path.clone());

        Self {
            settings,
            rules,
            document,
            diagnostics: Diagnostics::new(),
            open: Vec::new(),
            pre_paginated: false,
        }
    }

    /// Feeds every event to the builder, then [finishes](Self::finish) it.
    pub fn build(mut self, events: impl IntoIterator<Item = ParseEvent>) -> (Document, Diagnostics) {
        for event in events {
            event.dispatch(&mut self);
        }
        self.finish()
    }

    /// Returns the completed model together with the diagnostics
    /// collected while building it.
    pub fn finish(self) -> (Document, Diagnostics) {
        log::debug!(
            "built {}: {} manifest items, {} spine entries, {} guide references",
            self.path(),
            self.document.item_count(),
            self.document.spine().len(),
            self.document.guide().len(),
        );
        if !self.open.is_empty() {
            log::warn!("{} elements left open", self.open.len());
        }
        (self.document, self.diagnostics)
    }
}
