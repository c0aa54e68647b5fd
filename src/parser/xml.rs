//! [`quick_xml`] backed driver for [`PackageHandler`].

use crate::diagnostics::Location;
use crate::errors::{OpfError, OpfResult};
use crate::parser::{Attribute, PackageHandler, StartElement};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::borrow::Cow;

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
const XMLNS: &str = "xmlns";

type ByteReader<'a> = Reader<&'a [u8]>;

/// Streams a package document into a [`PackageHandler`].
///
/// Namespace prefixes are resolved against in-scope `xmlns` declarations,
/// which are not forwarded as attributes. Entity and character references
/// are resolved. Locations are 1-based; columns count bytes.
///
/// # Examples
/// ```
/// # use opfcheck::{CheckSettings, PackageBuilder};
/// # use opfcheck::parser::xml::XmlEventSource;
/// let opf = br#"<package xmlns="http://www.idpf.org/2007/opf" unique-identifier="uid"/>"#;
/// let mut builder = PackageBuilder::new(CheckSettings::default());
///
/// XmlEventSource::new(opf).drive(&mut builder).unwrap();
/// let (document, _) = builder.finish();
/// assert_eq!(Some("uid"), document.unique_identifier());
/// ```
pub struct XmlEventSource<'a> {
    data: &'a [u8],
    /// Byte offset of the first byte of each line.
    line_starts: Vec<usize>,
}

/// Prefix bindings declared by one element.
type Scope = Vec<(String, String)>;

////////////////////////////////////////////////////////////////////////////////
// PRIVATE API
////////////////////////////////////////////////////////////////////////////////

fn position(reader: &ByteReader<'_>) -> usize {
    usize::try_from(reader.buffer_position()).unwrap_or(usize::MAX)
}

fn lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

fn unescape_lossy(raw: &str) -> String {
    quick_xml::escape::unescape(raw)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_owned())
}

fn split_qname(qname: &str) -> (Option<&str>, &str) {
    match qname.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, qname),
    }
}

fn lookup<'s>(scopes: &'s [Scope], prefix: &str) -> Option<&'s str> {
    if prefix == "xml" {
        return Some(XML_NAMESPACE);
    }
    scopes
        .iter()
        .rev()
        .flat_map(|scope| scope.iter().rev())
        .find(|(declared, _)| declared == prefix)
        .map(|(_, uri)| uri.as_str())
        // `xmlns=""` undeclares the default namespace
        .filter(|uri| !uri.is_empty())
}

impl<'a> XmlEventSource<'a> {
    fn location(&self, offset: usize) -> Location {
        let line = self.line_starts.partition_point(|start| *start <= offset);
        let line_start = self.line_starts[line.saturating_sub(1)];

        Location::new(line, offset - line_start + 1)
    }

    /// Pushes the element's namespace scope and resolves its names.
    fn start_element(
        &self,
        start: &BytesStart<'_>,
        offset: usize,
        scopes: &mut Vec<Scope>,
    ) -> StartElement {
        let mut scope = Scope::new();
        let mut raw_attributes = Vec::new();

        for attribute in start.attributes().flatten() {
            let key = lossy(attribute.key.as_ref()).into_owned();
            let value = unescape_lossy(&lossy(&attribute.value));

            if key == XMLNS {
                scope.push((String::new(), value));
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                scope.push((prefix.to_owned(), value));
            } else {
                raw_attributes.push((key, value));
            }
        }
        scopes.push(scope);

        let qname = lossy(start.name().as_ref()).into_owned();
        let (prefix, local) = split_qname(&qname);
        let mut element = StartElement::new(
            local,
            lookup(scopes, prefix.unwrap_or_default()),
            self.location(offset),
        );

        for (key, value) in raw_attributes {
            let (prefix, local) = split_qname(&key);
            let mut attribute = Attribute::new(local, value);
            // Unprefixed attributes are in no namespace
            attribute.namespace = prefix
                .and_then(|prefix| lookup(scopes, prefix))
                .map(str::to_owned);
            element.attributes.push(attribute);
        }
        element
    }
}

////////////////////////////////////////////////////////////////////////////////
// PUBLIC API
////////////////////////////////////////////////////////////////////////////////

impl<'a> XmlEventSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                data.iter()
                    .enumerate()
                    .filter(|(_, byte)| **byte == b'\n')
                    .map(|(index, _)| index + 1),
            )
            .collect();

        Self { data, line_starts }
    }

    /// Reads the whole document, invoking `handler` for every element and
    /// every run of character data.
    ///
    /// # Errors
    /// Returns [`OpfError::Xml`] at the first well-formedness error.
    /// Callbacks already delivered are not undone.
    pub fn drive(&self, handler: &mut (impl PackageHandler + ?Sized)) -> OpfResult<()> {
        let mut reader = Reader::from_reader(self.data);
        let mut scopes = Vec::new();

        loop {
            let offset = position(&reader);

            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    let element = self.start_element(&start, offset, &mut scopes);
                    log::trace!("start <{}> at {}", element.name, element.location);
                    handler.on_element_start(&element);
                }
                Ok(Event::Empty(start)) => {
                    let element = self.start_element(&start, offset, &mut scopes);
                    log::trace!("empty <{}> at {}", element.name, element.location);
                    handler.on_element_start(&element);
                    scopes.pop();
                    handler.on_element_end();
                }
                Ok(Event::End(_)) => {
                    scopes.pop();
                    handler.on_element_end();
                }
                Ok(Event::Text(text)) => {
                    let text = text.decode().unwrap_or_else(|_| lossy(text.as_ref()));
                    handler.on_text(&text);
                }
                Ok(Event::CData(cdata)) => {
                    let text = cdata.decode().unwrap_or_else(|_| lossy(cdata.as_ref()));
                    handler.on_text(&text);
                }
                Ok(Event::GeneralRef(reference)) => {
                    let name = lossy(reference.as_ref());
                    handler.on_text(&unescape_lossy(&format!("&{name};")));
                }
                Ok(Event::Eof) => break,
                // Declarations, comments and processing instructions
                Ok(_) => {}
                Err(source) => {
                    return Err(OpfError::Xml {
                        position: position(&reader),
                        source,
                    });
                }
            }
        }
        Ok(())
    }
}
