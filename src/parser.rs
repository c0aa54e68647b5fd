//! The event interface between a streaming XML parser and the
//! [`PackageBuilder`](crate::PackageBuilder).
//!
//! Any parser able to resolve namespaces can drive a [`PackageHandler`].
//! [`xml::XmlEventSource`] is the bundled [`quick_xml`] adapter.

pub mod xml;

use crate::diagnostics::Location;

/// A namespace-resolved attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    /// The local name (without prefix).
    pub name: String,
    /// [`None`] for unprefixed attributes.
    pub namespace: Option<String>,
    /// The unescaped value.
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            value: value.into(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

/// A namespace-resolved start tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StartElement {
    /// The local name (without prefix).
    pub name: String,
    pub namespace: Option<String>,
    pub attributes: Vec<Attribute>,
    pub location: Location,
}

impl StartElement {
    pub fn new(name: impl Into<String>, namespace: Option<&str>, location: Location) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.map(str::to_owned),
            attributes: Vec::new(),
            location,
        }
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// The value of the unprefixed attribute `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.namespace.is_none() && attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }

    /// The value of the attribute `name` within `namespace`.
    pub fn attribute_ns(&self, namespace: &str, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| {
                attribute.namespace.as_deref() == Some(namespace) && attribute.name == name
            })
            .map(|attribute| attribute.value.as_str())
    }

    pub fn is_in(&self, namespace: &str) -> bool {
        self.namespace.as_deref() == Some(namespace)
    }
}

/// One parse callback in owned form.
///
/// Feeding a sequence of these to
/// [`PackageBuilder::build`](crate::PackageBuilder::build) is equivalent to
/// invoking the [`PackageHandler`] methods in the same order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseEvent {
    Start(StartElement),
    /// Character data of the innermost open element, entities resolved.
    Text(String),
    /// Closes the innermost open element.
    End,
}

impl ParseEvent {
    /// Invokes the matching `handler` callback.
    pub fn dispatch(&self, handler: &mut (impl PackageHandler + ?Sized)) {
        match self {
            Self::Start(element) => handler.on_element_start(element),
            Self::Text(text) => handler.on_text(text),
            Self::End => handler.on_element_end(),
        }
    }
}

/// Receives package document parse callbacks in document order.
///
/// Every [`Self::on_element_start`] is balanced by exactly one
/// [`Self::on_element_end`].
pub trait PackageHandler {
    fn on_element_start(&mut self, element: &StartElement);

    /// Character data; may be split across several calls.
    fn on_text(&mut self, text: &str);

    fn on_element_end(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_lookup() {
        let element = StartElement::new("creator", Some("http://purl.org/dc/elements/1.1/"), Location::default())
            .with_attribute(Attribute::new("role", "plain"))
            .with_attribute(Attribute::new("role", "aut").with_namespace("http://www.idpf.org/2007/opf"));

        assert_eq!(Some("plain"), element.attribute("role"));
        assert_eq!(Some("aut"), element.attribute_ns("http://www.idpf.org/2007/opf", "role"));
        assert_eq!(None, element.attribute("id"));
        assert!(element.is_in("http://purl.org/dc/elements/1.1/"));
    }

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl PackageHandler for Recorder {
        fn on_element_start(&mut self, element: &StartElement) {
            self.0.push(format!("<{}", element.name));
        }

        fn on_text(&mut self, text: &str) {
            self.0.push(text.to_owned());
        }

        fn on_element_end(&mut self) {
            self.0.push(">".to_owned());
        }
    }

    #[test]
    fn test_dispatch() {
        let events = [
            ParseEvent::Start(StartElement::new("title", None, Location::new(1, 1))),
            ParseEvent::Text("Moby Dick".into()),
            ParseEvent::End,
        ];
        let mut recorder = Recorder::default();
        events.iter().for_each(|event| event.dispatch(&mut recorder));

        assert_eq!(["<title", "Moby Dick", ">"], recorder.0.as_slice());
    }
}
