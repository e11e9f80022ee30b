//! Owned XML element tree
//!
//! Element payloads are read from and written to [`XmlNode`] values. A node
//! keeps its qualified name, its attributes in document order and its mixed
//! content (child elements and text), which is enough to carry content this
//! crate does not model through a parse → write cycle unchanged.

use std::io::Write;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::config::XmlConfig;
use crate::error::{Result, WmlError};

/// An XML element with its attributes and content
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlNode {
    /// Qualified element name (e.g. `w:p`)
    pub name: String,
    /// Attributes in document order as (qualified name, unescaped value)
    pub attributes: Vec<(String, String)>,
    /// Child elements and text
    pub children: Vec<XmlChild>,
}

/// Content of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlChild {
    /// A nested element
    Element(XmlNode),
    /// Unescaped character data
    Text(String),
}

impl XmlNode {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse the root element of an XML document
    pub fn parse(xml: &[u8]) -> Result<Self> {
        Self::parse_with(xml, &XmlConfig::default())
    }

    /// Parse the root element of an XML document with explicit options
    pub fn parse_with(xml: &[u8], config: &XmlConfig) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        // Elements opened but not yet closed; the last one is the innermost
        let mut stack: Vec<XmlNode> = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    stack.push(Self::from_start(e)?);
                }
                Event::Empty(ref e) => {
                    let node = Self::from_start(e)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlChild::Element(node)),
                        None => return Ok(node),
                    }
                }
                Event::End(_) => {
                    // quick-xml checks that end tags match their start tags
                    let node = stack.pop().ok_or_else(|| {
                        WmlError::InvalidStructure("unexpected end tag".to_string())
                    })?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlChild::Element(node)),
                        None => return Ok(node),
                    }
                }
                Event::Text(ref e) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = e.unescape()?;
                        let preserve = parent.attr("xml:space") == Some("preserve");
                        if config.keep_whitespace || preserve || !text.trim().is_empty() {
                            parent.push_text(&text);
                        }
                    }
                }
                Event::CData(ref e) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.push_text(&String::from_utf8_lossy(e));
                    }
                }
                Event::Eof => {
                    return Err(WmlError::InvalidStructure(match stack.last() {
                        Some(open) => format!("unclosed element <{}>", open.name),
                        None => "document has no root element".to_string(),
                    }));
                }
                // Declarations, comments, processing instructions, doctypes
                _ => {}
            }
            buf.clear();
        }
    }

    fn from_start(e: &BytesStart) -> Result<Self> {
        let mut node = Self::new(String::from_utf8_lossy(e.name().as_ref()));
        for attr in e.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            node.attributes.push((key, value));
        }
        Ok(node)
    }

    /// Append text, merging with a preceding text child
    fn push_text(&mut self, text: &str) {
        if let Some(XmlChild::Text(existing)) = self.children.last_mut() {
            existing.push_str(text);
        } else {
            self.children.push(XmlChild::Text(text.to_string()));
        }
    }

    /// Local part of the element name (`p` for `w:p`)
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }

    /// Namespace prefix of the element name, if any
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    /// Get an attribute value
    ///
    /// Matches the qualified name first, then falls back to comparing local
    /// names so that documents using a different prefix still resolve.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .or_else(|| {
                let local = local_part(name);
                self.attributes
                    .iter()
                    .find(|(key, _)| !key.starts_with("xmlns") && local_part(key) == local)
            })
            .map(|(_, value)| value.as_str())
    }

    /// Get a required attribute value
    pub fn required_attr(&self, name: &str) -> Result<&str> {
        self.attr(name).ok_or_else(|| WmlError::MissingAttribute {
            element: self.name.clone(),
            attribute: name.to_string(),
        })
    }

    /// Set an attribute, replacing an existing one with the same name
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Set an attribute only when a value is present
    pub fn set_opt_attr(&mut self, name: &str, value: Option<impl ToString>) {
        if let Some(value) = value {
            self.set_attr(name, value.to_string());
        }
    }

    /// Builder form of [`XmlNode::set_attr`]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder form that appends a child element
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(XmlChild::Element(child));
        self
    }

    /// Builder form that appends text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlChild::Text(text.into()));
        self
    }

    /// Iterate over child elements, skipping text
    pub fn elements(&self) -> impl Iterator<Item = &XmlNode> {
        self.children.iter().filter_map(|child| match child {
            XmlChild::Element(node) => Some(node),
            XmlChild::Text(_) => None,
        })
    }

    /// First child element with the given local name
    pub fn child(&self, local_name: &str) -> Option<&XmlNode> {
        self.elements().find(|node| node.local_name() == local_name)
    }

    /// Concatenated text of this element and all descendants
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlChild::Element(node) => node.collect_text(out),
                XmlChild::Text(text) => out.push_str(text),
            }
        }
    }

    /// Write this element under its own name
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for child in &self.children {
            match child {
                XmlChild::Element(node) => node.write_to(writer)?,
                XmlChild::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            }
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }

    /// Render this element as an XML fragment without a declaration
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        self.write_to(&mut writer)?;
        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }
}

/// Local part of a qualified name
pub fn local_part(name: &str) -> &str {
    name.rsplit_once(':').map(|(_, local)| local).unwrap_or(name)
}
