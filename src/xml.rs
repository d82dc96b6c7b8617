//! Namespace-agnostic XML element tree
//!
//! DMN documents are read into a small owned tree keyed by local names and
//! written back from the same structure. Reading and writing use quick-xml
//! events.

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::export::ExportError;
use crate::import::ImportError;

/// One XML element with its attributes, namespace declarations, text and children
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    /// Local name (prefix stripped)
    pub name: String,
    /// Non-namespace attributes by local name, in document order
    pub attributes: Vec<(String, String)>,
    /// Namespace declarations as (prefix, uri); the default namespace has an empty prefix
    pub namespaces: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    /// Concatenated text and CDATA content
    pub text: String,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, skipping empty values
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            return;
        }
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of the named child, if that child exists
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).map(|c| c.text.clone())
    }

    pub fn push(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// Append a `<name>text</name>` child
    pub fn push_text_child(&mut self, name: &str, text: &str) {
        let mut child = XmlElement::new(name);
        child.text = text.to_string();
        self.children.push(child);
    }
}

fn parse_error(e: impl std::fmt::Display) -> ImportError {
    ImportError::DMNParseError(e.to_string())
}

fn serialization_error(e: impl std::fmt::Display) -> ExportError {
    ExportError::SerializationError(e.to_string())
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement, ImportError> {
    let mut element = XmlElement::new(String::from_utf8_lossy(start.local_name().as_ref()));
    for attr in start.attributes() {
        let attr = attr.map_err(parse_error)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(parse_error)?.into_owned();
        if key == "xmlns" {
            element.namespaces.push((String::new(), value));
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            element.namespaces.push((prefix.to_string(), value));
        } else {
            let local = key.rsplit(':').next().unwrap_or(key.as_str()).to_string();
            element.attributes.push((local, value));
        }
    }
    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), ImportError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => {
            return Err(ImportError::DMNParseError(
                "Document has more than one root element".to_string(),
            ));
        }
        None => *root = Some(element),
    }
    Ok(())
}

/// Parse an XML document into its root element
///
/// # Arguments
///
/// * `xml_content` - The XML document as a string.
///
/// # Returns
///
/// The root `XmlElement`, or `ImportError::DMNParseError` when the
/// document is malformed or empty.
pub fn parse_document(xml_content: &str) -> Result<XmlElement, ImportError> {
    let mut reader = Reader::from_str(xml_content);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => stack.push(element_from_start(&e)?),
            Ok(Event::Empty(e)) => {
                let element = element_from_start(&e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| parse_error("Unexpected closing tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(t)) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&t.unescape().map_err(parse_error)?);
                }
            }
            Ok(Event::CData(c)) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => continue,
            Err(e) => {
                return Err(parse_error(format!(
                    "XML parsing error at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
        }
    }

    if !stack.is_empty() {
        return Err(parse_error("Unexpected end of document"));
    }
    root.ok_or_else(|| parse_error("Document has no root element"))
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> Result<(), ExportError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (prefix, uri) in &element.namespaces {
        let key = if prefix.is_empty() {
            "xmlns".to_string()
        } else {
            format!("xmlns:{}", prefix)
        };
        start.push_attribute((key.as_str(), uri.as_str()));
    }
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() && element.text.is_empty() {
        writer
            .write_event(Event::Empty(start))
            .map_err(serialization_error)?;
        return Ok(());
    }

    writer
        .write_event(Event::Start(start))
        .map_err(serialization_error)?;
    if !element.text.is_empty() {
        writer
            .write_event(Event::Text(BytesText::new(&element.text)))
            .map_err(serialization_error)?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(serialization_error)?;
    Ok(())
}

/// Serialize an element tree as an indented UTF-8 XML document
pub fn write_document(root: &XmlElement) -> Result<String, ExportError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(serialization_error)?;
    write_element(&mut writer, root)?;
    String::from_utf8(writer.into_inner()).map_err(serialization_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_local_names_and_namespaces() {
        let xml = r#"<?xml version="1.0"?>
<dmn:definitions xmlns:dmn="urn:dmn" xmlns:feel="urn:feel" id="x">
  <dmn:decision id="d" name="D"><dmn:question>Why &amp; how</dmn:question></dmn:decision>
  <dmn:inputData id="i"/>
</dmn:definitions>"#;
        let root = parse_document(xml).unwrap();
        assert_eq!(root.name, "definitions");
        assert_eq!(root.attr("id"), Some("x"));
        assert_eq!(root.namespaces.len(), 2);
        let decision = root.child("decision").unwrap();
        assert_eq!(decision.child_text("question").as_deref(), Some("Why & how"));
        assert_eq!(root.children_named("inputData").count(), 1);
    }

    #[test]
    fn rejects_unbalanced_document() {
        assert!(parse_document("<a><b></a>").is_err());
        assert!(parse_document("").is_err());
    }

    #[test]
    fn writes_and_reads_back() {
        let mut root = XmlElement::new("definitions").with_attr("id", "r");
        root.namespaces.push((String::new(), "urn:dmn".to_string()));
        root.push_text_child("text", "a < b");
        let xml = write_document(&root).unwrap();
        let parsed = parse_document(&xml).unwrap();
        assert_eq!(parsed, root);
    }
}
