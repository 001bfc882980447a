//! Owned element tree built from quick-xml events.
//!
//! Elements and attributes are matched by local name, so `p:sp` and `sp`
//! are the same element and `r:embed` is found as `embed`.

use deck_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// A node inside an element.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An XML element with its attributes and children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    /// Local name, without namespace prefix.
    pub name: String,
    /// Attributes as (local name, unescaped value), in document order.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Parse a document and return its root element.
    pub fn parse(xml: &str) -> Result<XmlElement> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(false);

        // Synthetic holder for the root; popped off at the end.
        let mut stack: Vec<XmlElement> = vec![XmlElement::default()];

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    stack.push(element_from_start(e)?);
                }
                Ok(Event::Empty(ref e)) => {
                    let element = element_from_start(e)?;
                    push_child(&mut stack, XmlNode::Element(element));
                }
                Ok(Event::End(_)) => {
                    if stack.len() < 2 {
                        return Err(Error::XmlError("Unexpected closing tag".to_string()));
                    }
                    if let Some(element) = stack.pop() {
                        push_child(&mut stack, XmlNode::Element(element));
                    }
                }
                Ok(Event::Text(ref e)) => {
                    if stack.len() > 1 {
                        let text = e
                            .unescape()
                            .map_err(|e| Error::XmlError(format!("Invalid text content: {}", e)))?;
                        push_child(&mut stack, XmlNode::Text(text.into_owned()));
                    }
                }
                Ok(Event::CData(ref e)) => {
                    if stack.len() > 1 {
                        let text = String::from_utf8_lossy(e).into_owned();
                        push_child(&mut stack, XmlNode::Text(text));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error at position {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                }
                // Declarations, comments, processing instructions, doctype
                _ => {}
            }
        }

        if stack.len() != 1 {
            return Err(Error::XmlError("Unclosed element at end of document".to_string()));
        }

        stack
            .pop()
            .and_then(|holder| holder.children.into_iter().find_map(XmlNode::into_element))
            .ok_or_else(|| Error::XmlError("Document has no root element".to_string()))
    }

    /// First direct child element with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.name == name)
    }

    /// Direct child elements with the given local name.
    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.elements().filter(move |e| e.name == name)
    }

    /// All direct child elements.
    pub fn elements(&self) -> impl DoubleEndedIterator<Item = &XmlElement> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// Follow a path of direct children, e.g. `["spPr", "xfrm", "off"]`.
    pub fn path(&self, names: &[&str]) -> Option<&XmlElement> {
        names
            .iter()
            .try_fold(self, |element, name| element.child(name))
    }

    /// All descendant elements (excluding self) in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.elements().rev().collect(),
        }
    }

    /// Descendant elements with the given local name, in document order.
    pub fn descendants_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.descendants().filter(move |e| e.name == name)
    }

    /// First descendant element with the given local name.
    pub fn find_descendant(&self, name: &str) -> Option<&XmlElement> {
        self.descendants().find(|e| e.name == name)
    }

    /// Attribute value by local name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Concatenated direct text content.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }
}

impl XmlNode {
    fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        }
    }

    fn into_element(self) -> Option<XmlElement> {
        match self {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        }
    }
}

/// Pre-order iterator over descendant elements.
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.elements().rev());
        Some(element)
    }
}

fn push_child(stack: &mut [XmlElement], node: XmlNode) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

fn element_from_start(e: &BytesStart<'_>) -> Result<XmlElement> {
    let name = String::from_utf8_lossy(local_name(e.name().as_ref())).into_owned();

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::XmlError(format!("Invalid attribute: {}", e)))?;
        let key = String::from_utf8_lossy(local_name(attr.key.as_ref())).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::XmlError(format!("Invalid attribute value: {}", e)))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(XmlElement {
        name,
        attributes,
        children: Vec::new(),
    })
}

/// Extract the local name from a potentially namespaced XML name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }

    #[test]
    fn test_parse_tree() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="urn:a" xmlns:p="urn:p">
  <p:cSld>
    <a:t xml:space="preserve"> Tom &amp; Jerry </a:t>
    <a:blip r:embed="rId2"/>
  </p:cSld>
</p:sld>"#;
        let root = XmlElement::parse(xml).unwrap();
        assert_eq!(root.name, "sld");

        let t = root.path(&["cSld", "t"]).unwrap();
        assert_eq!(t.text(), " Tom & Jerry ");
        assert_eq!(t.attr("space"), Some("preserve"));

        let blip = root.find_descendant("blip").unwrap();
        assert_eq!(blip.attr("embed"), Some("rId2"));
        assert!(blip.children.is_empty());
    }

    #[test]
    fn test_descendants_in_document_order() {
        let xml = "<root><a n=\"1\"><a n=\"2\"/></a><b><a n=\"3\"/></b><a n=\"4\"/></root>";
        let root = XmlElement::parse(xml).unwrap();
        let order: Vec<&str> = root
            .descendants_named("a")
            .filter_map(|e| e.attr("n"))
            .collect();
        assert_eq!(order, vec!["1", "2", "3", "4"]);
        assert_eq!(root.children("a").count(), 2);
    }

    #[test]
    fn test_attribute_order_does_not_matter() {
        let a = XmlElement::parse(r#"<off x="1" y="2"/>"#).unwrap();
        let b = XmlElement::parse(r#"<off   y="2"
            x="1" />"#)
        .unwrap();
        assert_eq!(a.attr("x"), b.attr("x"));
        assert_eq!(a.attr("y"), b.attr("y"));
    }

    #[test]
    fn test_malformed_markup_is_an_error() {
        assert!(matches!(
            XmlElement::parse("<a><b></a>"),
            Err(Error::XmlError(_))
        ));
        assert!(matches!(XmlElement::parse("<a>"), Err(Error::XmlError(_))));
        assert!(matches!(XmlElement::parse(""), Err(Error::XmlError(_))));
    }
}
