//! Block content payloads
//!
//! Paragraphs, custom XML blocks, alternate-format chunks and tracked run
//! changes are modelled by their own attributes; everything inside them is
//! kept as an [`XmlChild`] list so that content this crate does not interpret
//! survives a round trip. Tables, structured document tags and math are kept
//! entirely opaque.

use crate::attrs::{on_off_element, on_off_node, opt_long_hex, opt_string, to_hex};
use crate::error::Result;
use crate::fonts::Fonts;
use crate::markup::TrackChange;
use crate::measure::{HpsMeasure, SignedTwipsMeasure};
use crate::node::{local_part, XmlChild, XmlNode};

/// Revision-save identifiers carried by a paragraph, in schema order
const RSID_ATTRIBUTES: [&str; 5] = ["w:rsidRPr", "w:rsidR", "w:rsidDel", "w:rsidP", "w:rsidRDefault"];

/// Whether `key` is one of the rsid attributes, under any prefix
fn is_rsid_attribute(key: &str) -> bool {
    !key.starts_with("xmlns")
        && RSID_ATTRIBUTES
            .iter()
            .any(|rsid| local_part(rsid) == local_part(key))
}

/// A paragraph (`CT_P`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Paragraph {
    /// Revision id of the paragraph mark's formatting
    pub rsid_r_pr: Option<[u8; 4]>,
    /// Revision id of the paragraph's creation
    pub rsid_r: Option<[u8; 4]>,
    /// Revision id of the paragraph mark's deletion
    pub rsid_del: Option<[u8; 4]>,
    /// Revision id of the paragraph properties
    pub rsid_p: Option<[u8; 4]>,
    /// Default revision id for runs
    pub rsid_r_default: Option<[u8; 4]>,
    /// Attributes outside the WordprocessingML core (e.g. `w14:paraId`)
    pub extra_attributes: Vec<(String, String)>,
    /// Paragraph properties, runs and inline markup
    pub content: Vec<XmlChild>,
}

impl Paragraph {
    /// Create a paragraph holding a single run of text
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut paragraph = Self::default();
        paragraph.push_run(&Run::new(text));
        paragraph
    }

    pub fn from_node(node: &XmlNode) -> Result<Self> {
        let extra_attributes = node
            .attributes
            .iter()
            .filter(|(key, _)| !is_rsid_attribute(key))
            .cloned()
            .collect();

        Ok(Self {
            rsid_r_pr: opt_long_hex(node, "w:rsidRPr")?,
            rsid_r: opt_long_hex(node, "w:rsidR")?,
            rsid_del: opt_long_hex(node, "w:rsidDel")?,
            rsid_p: opt_long_hex(node, "w:rsidP")?,
            rsid_r_default: opt_long_hex(node, "w:rsidRDefault")?,
            extra_attributes,
            content: node.children.clone(),
        })
    }

    pub fn to_node(&self, name: &str) -> XmlNode {
        let mut node = XmlNode::new(name);
        let rsids = [
            self.rsid_r_pr,
            self.rsid_r,
            self.rsid_del,
            self.rsid_p,
            self.rsid_r_default,
        ];
        for (attr, rsid) in RSID_ATTRIBUTES.iter().zip(rsids) {
            node.set_opt_attr(attr, rsid.map(|bytes| to_hex(&bytes)));
        }
        node.attributes.extend(self.extra_attributes.iter().cloned());
        node.children = self.content.clone();
        node
    }

    /// Runs that are direct children of the paragraph
    pub fn runs(&self) -> Result<Vec<Run>> {
        self.content
            .iter()
            .filter_map(|child| match child {
                XmlChild::Element(node) if node.local_name() == "r" => Some(Run::from_node(node)),
                _ => None,
            })
            .collect()
    }

    /// Append a run after the existing content
    pub fn push_run(&mut self, run: &Run) {
        self.content.push(XmlChild::Element(run.to_node("w:r")));
    }

    /// Visible text, including text inside hyperlinks and tracked insertions
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.content {
            if let XmlChild::Element(node) = child {
                collect_run_text(node, &mut out);
            }
        }
        out
    }
}

/// Collect text from `w:t`, `w:tab` and `w:br` below `node`
fn collect_run_text(node: &XmlNode, out: &mut String) {
    match node.local_name() {
        "t" => out.push_str(&node.text()),
        "tab" => out.push('\t'),
        "br" | "cr" => out.push('\n'),
        // Properties never carry visible text
        "pPr" | "rPr" => {}
        _ => {
            for child in node.elements() {
                collect_run_text(child, out);
            }
        }
    }
}

/// A view of a text run (`CT_R`) with the formatting this crate understands
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Run {
    pub text: String,
    pub bold: Option<bool>,
    pub fonts: Option<Fonts>,
    /// Font size
    pub size: Option<HpsMeasure>,
    /// Character spacing adjustment
    pub spacing: Option<SignedTwipsMeasure>,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn from_node(node: &XmlNode) -> Result<Self> {
        let mut run = Self::default();

        if let Some(props) = node.child("rPr") {
            for prop in props.elements() {
                match prop.local_name() {
                    "b" => run.bold = Some(on_off_element(prop)?),
                    "rFonts" => run.fonts = Some(Fonts::from_node(prop)?),
                    "sz" => run.size = Some(HpsMeasure::from_node(prop)?),
                    "spacing" => run.spacing = Some(SignedTwipsMeasure::from_node(prop)?),
                    _ => {}
                }
            }
        }

        for child in node.elements() {
            collect_run_text(child, &mut run.text);
        }
        Ok(run)
    }

    pub fn to_node(&self, name: &str) -> XmlNode {
        let mut node = XmlNode::new(name);

        // rPr children follow the schema sequence: rFonts, b, ..., spacing, ..., sz
        let mut props = XmlNode::new("w:rPr");
        if let Some(fonts) = &self.fonts {
            props = props.with_child(fonts.to_node("w:rFonts"));
        }
        if let Some(bold) = self.bold {
            props = props.with_child(on_off_node("w:b", bold));
        }
        if let Some(spacing) = &self.spacing {
            props = props.with_child(spacing.to_node("w:spacing"));
        }
        if let Some(size) = &self.size {
            props = props.with_child(size.to_node("w:sz"));
        }
        if !props.children.is_empty() {
            node = node.with_child(props);
        }

        if !self.text.is_empty() {
            let mut t = XmlNode::new("w:t");
            if self.text.trim() != self.text {
                t.set_attr("xml:space", "preserve");
            }
            node = node.with_child(t.with_text(self.text.as_str()));
        }
        node
    }
}

/// Block-level custom XML element (`CT_CustomXmlBlock`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomXmlBlock {
    /// Namespace of the custom element
    pub uri: Option<String>,
    /// Name of the custom element
    pub element: String,
    /// `w:customXmlPr` and the wrapped block content
    pub content: Vec<XmlChild>,
}

impl CustomXmlBlock {
    pub fn from_node(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            uri: opt_string(node, "w:uri"),
            element: node.required_attr("w:element")?.to_string(),
            content: node.children.clone(),
        })
    }

    pub fn to_node(&self, name: &str) -> XmlNode {
        let mut node = XmlNode::new(name);
        node.set_opt_attr("w:uri", self.uri.as_deref());
        node.set_attr("w:element", self.element.as_str());
        node.children = self.content.clone();
        node
    }
}

/// Content imported from an external part (`CT_AltChunk`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AltChunk {
    /// Relationship id of the imported part
    pub rel_id: Option<String>,
    pub content: Vec<XmlChild>,
}

impl AltChunk {
    pub fn from_node(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            rel_id: opt_string(node, "r:id"),
            content: node.children.clone(),
        })
    }

    pub fn to_node(&self, name: &str) -> XmlNode {
        let mut node = XmlNode::new(name);
        node.set_opt_attr("r:id", self.rel_id.as_deref());
        node.children = self.content.clone();
        node
    }
}

/// Tracked insertion, deletion or move of runs (`CT_RunTrackChange`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunTrackChange {
    pub change: TrackChange,
    /// The affected runs
    pub content: Vec<XmlChild>,
}

impl RunTrackChange {
    pub fn from_node(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            change: TrackChange::from_node(node)?,
            content: node.children.clone(),
        })
    }

    pub fn to_node(&self, name: &str) -> XmlNode {
        let mut node = self.change.to_node(name);
        node.children = self.content.clone();
        node
    }
}

/// Content carried through unchanged (tables, structured document tags, math)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpaqueBlock {
    pub attributes: Vec<(String, String)>,
    pub content: Vec<XmlChild>,
}

impl OpaqueBlock {
    pub fn from_node(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            attributes: node.attributes.clone(),
            content: node.children.clone(),
        })
    }

    pub fn to_node(&self, name: &str) -> XmlNode {
        XmlNode {
            name: name.to_string(),
            attributes: self.attributes.clone(),
            children: self.content.clone(),
        }
    }

    /// Text of all descendants
    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(|child| match child {
                XmlChild::Element(node) => node.text(),
                XmlChild::Text(text) => text.clone(),
            })
            .collect()
    }
}
