//! A small owned XML element tree.
//!
//! The serializer builds an [`XmlDocument`] in memory and only turns it into
//! text once the whole project has been walked, so a failed save never
//! leaves half-written output. The deserializer parses text into the same
//! tree before reconstructing entities.

use std::io::{Cursor, Write};

use indexmap::IndexMap;
use quick_xml::{
    Reader, Writer,
    escape::unescape,
    events::{BytesDecl, BytesEnd, BytesStart, Event},
};

use crate::error::{LoadError, SaveError};

/// An XML element with ordered attributes and child elements.
///
/// Text content is not modelled; the PyUT format stores everything in
/// attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    name: String,
    attributes: IndexMap<String, String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute (builder style).
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Appends a child (builder style).
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Direct children with the given tag name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// The first direct child with the given tag name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }
}

/// Output formatting for [`XmlDocument::write_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Spaces per nesting level; 0 writes everything on one line.
    pub indent: usize,
    /// Whether to emit `<?xml version="1.0" encoding="utf-8"?>`.
    pub declaration: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            declaration: true,
        }
    }
}

/// A complete XML document: one root element.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    root: Element,
}

impl XmlDocument {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Parses XML text into a tree.
    ///
    /// Declarations, comments, processing instructions and text nodes are
    /// skipped. Entity and character references in attribute values are
    /// unescaped.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Syntax`] for malformed input, mismatched tags,
    /// more than one root element or no root element at all.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => stack.push(element_from_start(&start)?),
                Ok(Event::Empty(start)) => {
                    let element = element_from_start(&start)?;
                    close_element(&mut stack, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| LoadError::Syntax("unexpected closing tag".to_string()))?;
                    close_element(&mut stack, &mut root, element)?;
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => {
                    return Err(LoadError::Syntax(format!(
                        "{err} (at byte {})",
                        reader.buffer_position()
                    )));
                }
            }
        }

        if let Some(open) = stack.last() {
            return Err(LoadError::Syntax(format!(
                "element <{}> is never closed",
                open.name
            )));
        }

        root.map(Self::new)
            .ok_or_else(|| LoadError::Syntax("document has no root element".to_string()))
    }

    /// Writes the document as XML text.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Write`] if the underlying writer fails.
    pub fn write_to<W: Write>(&self, out: W, options: &WriteOptions) -> Result<(), SaveError> {
        let mut writer = if options.indent > 0 {
            Writer::new_with_indent(out, b' ', options.indent)
        } else {
            Writer::new(out)
        };

        if options.declaration {
            writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
                .map_err(write_error)?;
        }

        write_element(&mut writer, &self.root)
    }

    /// Renders the document to a `String`.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Write`] if rendering fails.
    pub fn to_xml_string(&self, options: &WriteOptions) -> Result<String, SaveError> {
        let mut buffer = Cursor::new(Vec::new());
        self.write_to(&mut buffer, options)?;
        String::from_utf8(buffer.into_inner()).map_err(write_error)
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, LoadError> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| LoadError::Syntax(err.to_string()))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attribute.value);
        let value = unescape(&raw).map_err(|err| LoadError::Syntax(err.to_string()))?;
        element.set_attribute(key, value.into_owned());
    }

    Ok(element)
}

fn close_element(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), LoadError> {
    match stack.last_mut() {
        Some(parent) => parent.push(element),
        None if root.is_some() => {
            return Err(LoadError::Syntax(format!(
                "second root element <{}>",
                element.name
            )));
        }
        None => *root = Some(element),
    }
    Ok(())
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<(), SaveError> {
    let mut start = BytesStart::new(element.name());
    for (key, value) in element.attributes() {
        start.push_attribute((key, value));
    }

    if element.children.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(write_error);
    }

    writer.write_event(Event::Start(start)).map_err(write_error)?;
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name())))
        .map_err(write_error)
}

fn write_error(err: impl std::fmt::Display) -> SaveError {
    SaveError::Write(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements_and_attributes() {
        let xml = r#"<?xml version="1.0"?>
            <Root a="1" b="two">
                <Child name="first"/>
                <Other/>
                <Child name="second"><Leaf/></Child>
            </Root>"#;

        let document = XmlDocument::parse(xml).expect("valid XML");
        let root = document.root();
        assert_eq!(root.name(), "Root");
        assert_eq!(root.attribute("a"), Some("1"));
        assert_eq!(root.attribute("b"), Some("two"));
        assert_eq!(root.children().len(), 3);

        let names: Vec<_> = root
            .children_named("Child")
            .filter_map(|child| child.attribute("name"))
            .collect();
        assert_eq!(names, ["first", "second"]);
        assert!(root.child("Other").is_some());
    }

    #[test]
    fn test_parse_unescapes_attribute_values() {
        let document = XmlDocument::parse(r#"<N name="a &lt; b &amp;&#10;c"/>"#).unwrap();
        assert_eq!(document.root().attribute("name"), Some("a < b &\nc"));
    }

    #[test]
    fn test_parse_rejects_mismatched_tags() {
        let err = XmlDocument::parse("<A><B></A>").unwrap_err();
        assert!(matches!(err, LoadError::Syntax(_)));
    }

    #[test]
    fn test_parse_rejects_unclosed_root() {
        let err = XmlDocument::parse("<A><B/>").unwrap_err();
        assert!(matches!(err, LoadError::Syntax(_)));
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        let err = XmlDocument::parse("   ").unwrap_err();
        assert_eq!(
            err,
            LoadError::Syntax("document has no root element".to_string())
        );
    }

    #[test]
    fn test_write_escapes_and_preserves_order() {
        let document = XmlDocument::new(
            Element::new("Root")
                .with_attribute("z", "last<")
                .with_attribute("a", "\"quoted\"")
                .with_child(Element::new("Leaf")),
        );
        let text = document
            .to_xml_string(&WriteOptions {
                indent: 0,
                declaration: false,
            })
            .unwrap();

        assert_eq!(
            text,
            r#"<Root z="last&lt;" a="&quot;quoted&quot;"><Leaf/></Root>"#
        );
    }

    #[test]
    fn test_write_then_parse_keeps_tree() {
        let original = XmlDocument::new(
            Element::new("Root").with_attribute("name", "a & b").with_child(
                Element::new("Child")
                    .with_attribute("x", "1.0")
                    .with_child(Element::new("Leaf")),
            ),
        );
        let text = original.to_xml_string(&WriteOptions::default()).unwrap();
        assert!(text.starts_with("<?xml"));
        assert_eq!(XmlDocument::parse(&text).unwrap(), original);
    }
}
