//! Comments part parsing and generation (word/comments.xml)
//!
//! [`Comments`] is the `w:comments` root; each [`Comment`] carries its
//! metadata and a [`ChoiceSequence`] of block-level content.
//!
//! # Example
//!
//! ```ignore
//! use wml_ooxml::{BlockKind, Comments};
//!
//! let mut comments = Comments::parse(archive.comments_xml()?)?;
//!
//! // Drop the first bookmark of every comment
//! for comment in comments.iter_mut() {
//!     comment.content_mut().remove_at(BlockKind::BookmarkStart, 0);
//! }
//!
//! let reply = comments.add("Reviewer");
//! reply.add_paragraph("Fixed in the next revision.");
//!
//! let xml = comments.to_xml()?;
//! ```

use std::io::Write;

use quick_xml::events::{BytesDecl, Event};
use quick_xml::Writer;

use crate::attrs::opt_string;
use crate::block::BlockLevelElement;
use crate::choice::ChoiceSequence;
use crate::config::XmlConfig;
use crate::content::Paragraph;
use crate::error::{Result, WmlError};
use crate::node::XmlNode;

/// WordprocessingML main namespace
pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
/// Office Math namespace
pub const M_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/math";
/// Relationships namespace
pub const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// A single comment (`CT_Comment`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Comment id, referenced by `w:commentReference` in the document body
    pub id: String,
    pub author: String,
    /// `ST_DateTime`, kept as written
    pub date: Option<String>,
    pub initials: Option<String>,
    content: ChoiceSequence<BlockLevelElement>,
}

impl Comment {
    /// Create an empty comment
    pub fn new(id: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            date: None,
            initials: None,
            content: ChoiceSequence::new(),
        }
    }

    /// Builder: set the date
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Builder: set the author's initials
    pub fn with_initials(mut self, initials: impl Into<String>) -> Self {
        self.initials = Some(initials.into());
        self
    }

    /// Parse a `w:comment` element
    pub fn from_node(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            id: node.required_attr("w:id")?.to_string(),
            author: node.required_attr("w:author")?.to_string(),
            date: opt_string(node, "w:date"),
            initials: opt_string(node, "w:initials"),
            content: ChoiceSequence::parse_children(node)?,
        })
    }

    /// Build the `w:comment` element
    pub fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("w:comment")
            .with_attr("w:id", self.id.as_str())
            .with_attr("w:author", self.author.as_str());
        node.set_opt_attr("w:date", self.date.as_deref());
        node.set_opt_attr("w:initials", self.initials.as_deref());
        for child in self.content.to_nodes() {
            node = node.with_child(child);
        }
        node
    }

    /// Block-level content in document order
    pub fn content(&self) -> &ChoiceSequence<BlockLevelElement> {
        &self.content
    }

    /// Mutable block-level content
    pub fn content_mut(&mut self) -> &mut ChoiceSequence<BlockLevelElement> {
        &mut self.content
    }

    /// Paragraphs of the comment in document order
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.content
            .iter()
            .filter_map(BlockLevelElement::as_paragraph)
    }

    /// Append a paragraph holding `text`
    pub fn add_paragraph(&mut self, text: impl Into<String>) -> &mut Self {
        self.content
            .push(BlockLevelElement::P(Paragraph::with_text(text)));
        self
    }

    /// Plain text of all paragraphs, one line each
    pub fn text(&self) -> String {
        self.paragraphs()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// The comments part (`CT_Comments`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comments {
    /// Root attributes, namespace declarations included
    root_attributes: Vec<(String, String)>,
    comments: Vec<Comment>,
}

impl Default for Comments {
    fn default() -> Self {
        Self {
            root_attributes: vec![
                ("xmlns:w".to_string(), W_NS.to_string()),
                ("xmlns:m".to_string(), M_NS.to_string()),
                ("xmlns:r".to_string(), R_NS.to_string()),
            ],
            comments: Vec::new(),
        }
    }
}

impl Comments {
    /// Create an empty comments part
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse comments from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        Self::parse_with(xml, &XmlConfig::default())
    }

    /// Parse comments from XML bytes with explicit options
    pub fn parse_with(xml: &[u8], config: &XmlConfig) -> Result<Self> {
        let root = XmlNode::parse_with(xml, config)?;
        Self::from_node(&root)
    }

    /// Parse a `w:comments` element
    pub fn from_node(root: &XmlNode) -> Result<Self> {
        if root.local_name() != "comments" {
            return Err(WmlError::InvalidStructure(format!(
                "expected <w:comments> root, found <{}>",
                root.name
            )));
        }

        let mut comments = Vec::new();
        for child in root.elements() {
            if child.local_name() == "comment" {
                comments.push(Comment::from_node(child)?);
            } else {
                log::warn!("Skipping <{}> in comments part", child.name);
            }
        }

        let mut parsed = Self {
            root_attributes: root.attributes.clone(),
            comments,
        };
        parsed.declare_namespaces();
        Ok(parsed)
    }

    /// Make sure the prefixes this crate writes are declared on the root
    fn declare_namespaces(&mut self) {
        for (prefix, uri) in [("xmlns:w", W_NS), ("xmlns:m", M_NS), ("xmlns:r", R_NS)] {
            if !self.root_attributes.iter().any(|(key, _)| key == prefix) {
                self.root_attributes.push((prefix.to_string(), uri.to_string()));
            }
        }
    }

    /// Number of comments
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    /// Whether there are no comments
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Iterate over comments in document order
    pub fn iter(&self) -> std::slice::Iter<'_, Comment> {
        self.comments.iter()
    }

    /// Iterate mutably over comments in document order
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Comment> {
        self.comments.iter_mut()
    }

    /// Find a comment by id
    pub fn get(&self, id: &str) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }

    /// Find a comment by id for editing
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Comment> {
        self.comments.iter_mut().find(|c| c.id == id)
    }

    /// Remove a comment by id
    pub fn remove(&mut self, id: &str) -> Option<Comment> {
        let pos = self.comments.iter().position(|c| c.id == id)?;
        Some(self.comments.remove(pos))
    }

    /// Append an existing comment
    pub fn push(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// The id a newly added comment would get
    ///
    /// One past the largest non-negative numeric id in use, starting at 0.
    /// When that would overflow, the smallest unused non-negative id.
    pub fn next_id(&self) -> String {
        let mut used: Vec<i64> = self
            .comments
            .iter()
            .filter_map(|c| c.id.parse::<i64>().ok())
            .filter(|id| *id >= 0)
            .collect();
        used.sort_unstable();
        used.dedup();

        let next = match used.last() {
            None => 0,
            Some(max) => max.checked_add(1).unwrap_or_else(|| {
                used.iter()
                    .zip(0i64..)
                    .find(|(id, n)| **id != *n)
                    .map_or(used.len() as i64, |(_, n)| n)
            }),
        };
        next.to_string()
    }

    /// Append a new, empty comment with the next free id
    pub fn add(&mut self, author: impl Into<String>) -> &mut Comment {
        let comment = Comment::new(self.next_id(), author);
        self.comments.push(comment);
        let last = self.comments.len() - 1;
        &mut self.comments[last]
    }

    /// Build the `w:comments` element
    pub fn to_node(&self) -> XmlNode {
        let mut root = XmlNode::new("w:comments");
        root.attributes = self.root_attributes.clone();
        for comment in &self.comments {
            root = root.with_child(comment.to_node());
        }
        root
    }

    /// Write the part, declaration included, to any writer
    pub fn write_to<W: Write>(&self, inner: W, config: &XmlConfig) -> Result<()> {
        let mut writer = match config.indent_byte()? {
            Some((byte, size)) => Writer::new_with_indent(inner, byte, size),
            None => Writer::new(inner),
        };

        if config.declaration {
            let standalone = config.standalone.then_some("yes");
            writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), standalone)))?;
        }
        self.to_node().write_to(&mut writer)?;
        Ok(())
    }

    /// Serialize with default options
    pub fn to_xml(&self) -> Result<String> {
        self.to_xml_with(&XmlConfig::default())
    }

    /// Serialize with explicit options
    pub fn to_xml_with(&self, config: &XmlConfig) -> Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf, config)?;
        String::from_utf8(buf)
            .map_err(|e| WmlError::InvalidStructure(format!("generated XML is not UTF-8: {}", e)))
    }
}

impl<'a> IntoIterator for &'a Comments {
    type Item = &'a Comment;
    type IntoIter = std::slice::Iter<'a, Comment>;

    fn into_iter(self) -> Self::IntoIter {
        self.comments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockKind;
    use crate::markup::Bookmark;

    const COMMENTS_XML: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:comments xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:w14="http://schemas.microsoft.com/office/word/2010/wordml">
  <w:comment w:id="0" w:author="Ann Smith" w:date="2024-03-01T10:00:00Z" w:initials="AS">
    <w:p w14:paraId="11111111"><w:r><w:t>First line</w:t></w:r></w:p>
    <w:bookmarkStart w:id="1" w:name="note"/>
    <w:p><w:r><w:t>Second line</w:t></w:r></w:p>
    <w:bookmarkEnd w:id="1"/>
  </w:comment>
  <w:comment w:id="3" w:author="Bob">
    <w:p><w:r><w:t>Agreed</w:t></w:r></w:p>
  </w:comment>
</w:comments>"#;

    #[test]
    fn test_parse_comments() {
        let comments = Comments::parse(COMMENTS_XML).unwrap();
        assert_eq!(comments.len(), 2);

        let first = comments.get("0").unwrap();
        assert_eq!(first.author, "Ann Smith");
        assert_eq!(first.date.as_deref(), Some("2024-03-01T10:00:00Z"));
        assert_eq!(first.initials.as_deref(), Some("AS"));
        assert_eq!(first.content().len(), 4);
        assert_eq!(first.content().count_of_kind(BlockKind::P), 2);
        assert_eq!(first.text(), "First line\nSecond line");

        let second = comments.get("3").unwrap();
        assert_eq!(second.initials, None);
        assert_eq!(second.text(), "Agreed");
    }

    #[test]
    fn test_rejects_wrong_root() {
        let err = Comments::parse(br#"<w:document><w:body/></w:document>"#).unwrap_err();
        assert!(matches!(err, WmlError::InvalidStructure(_)));
    }

    #[test]
    fn test_comment_requires_author() {
        let xml = br#"<w:comments><w:comment w:id="1"/></w:comments>"#;
        assert!(matches!(
            Comments::parse(xml),
            Err(WmlError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_skips_foreign_children() {
        let xml = br#"<w:comments><w:foo/><w:comment w:id="1" w:author="A"/></w:comments>"#;
        let comments = Comments::parse(xml).unwrap();
        assert_eq!(comments.len(), 1);
    }

    #[test]
    fn test_roundtrip_preserves_order_and_namespaces() {
        let comments = Comments::parse(COMMENTS_XML).unwrap();
        let xml = comments.to_xml().unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
        assert!(xml.contains(r#"xmlns:w14="http://schemas.microsoft.com/office/word/2010/wordml""#));
        assert!(xml.contains(&format!(r#"xmlns:m="{}""#, M_NS)));
        assert!(xml.contains(r#"<w:p w14:paraId="11111111">"#));

        let p = xml.find("First line").unwrap();
        let bm = xml.find("<w:bookmarkStart").unwrap();
        let p2 = xml.find("Second line").unwrap();
        let be = xml.find("<w:bookmarkEnd").unwrap();
        assert!(p < bm && bm < p2 && p2 < be);

        let reparsed = Comments::parse(xml.as_bytes()).unwrap();
        assert_eq!(reparsed, comments);
    }

    #[test]
    fn test_add_allocates_next_id() {
        let mut comments = Comments::parse(COMMENTS_XML).unwrap();
        assert_eq!(comments.next_id(), "4");

        let comment = comments.add("Carol");
        comment.add_paragraph("New note");
        assert_eq!(comment.id, "4");
        assert_eq!(comments.get("4").unwrap().text(), "New note");

        assert_eq!(Comments::new().next_id(), "0");
    }

    #[test]
    fn test_next_id_at_largest_id() {
        let mut comments = Comments::new();
        comments.push(Comment::new(i64::MAX.to_string(), "A"));
        assert_eq!(comments.next_id(), "0");

        comments.push(Comment::new("0", "B"));
        comments.push(Comment::new("1", "C"));
        assert_eq!(comments.next_id(), "2");
        assert_eq!(comments.add("D").id, "2");
    }

    #[test]
    fn test_next_id_ignores_negative_and_text_ids() {
        let mut comments = Comments::new();
        comments.push(Comment::new("-4", "A"));
        comments.push(Comment::new("note", "B"));
        assert_eq!(comments.next_id(), "0");
    }

    #[test]
    fn test_add_paragraph_chains() {
        let mut comment = Comment::new("0", "Ann");
        comment.add_paragraph("one").add_paragraph("two");
        assert_eq!(comment.content().kinds(), vec![BlockKind::P, BlockKind::P]);
        assert_eq!(comment.text(), "one\ntwo");
    }

    #[test]
    fn test_remove_comment() {
        let mut comments = Comments::parse(COMMENTS_XML).unwrap();
        let removed = comments.remove("0").unwrap();
        assert_eq!(removed.author, "Ann Smith");
        assert!(comments.remove("0").is_none());
        assert_eq!(comments.len(), 1);
    }

    #[test]
    fn test_edit_content_through_sequence() {
        let mut comments = Comments::parse(COMMENTS_XML).unwrap();
        let comment = comments.get_mut("0").unwrap();

        if let Some(BlockLevelElement::BookmarkStart(bookmark)) =
            comment.content_mut().get_at_mut(BlockKind::BookmarkStart, 0)
        {
            bookmark.name = "renamed".to_string();
        }
        comment
            .content_mut()
            .replace(
                BlockKind::BookmarkStart,
                0,
                BlockLevelElement::BookmarkStart(Bookmark::new("1", "final")),
            )
            .unwrap();

        let xml = comments.to_xml().unwrap();
        assert!(xml.contains(r#"<w:bookmarkStart w:id="1" w:name="final"/>"#));
    }

    #[test]
    fn test_new_comment_output() {
        let mut comments = Comments::new();
        comments.push(Comment::new("0", "Ann").with_initials("A").with_date("2024-01-01T00:00:00Z"));
        comments.get_mut("0").unwrap().add_paragraph("Hi");

        let config = XmlConfig {
            declaration: false,
            ..Default::default()
        };
        assert_eq!(
            comments.to_xml_with(&config).unwrap(),
            format!(
                concat!(
                    r#"<w:comments xmlns:w="{}" xmlns:m="{}" xmlns:r="{}">"#,
                    r#"<w:comment w:id="0" w:author="Ann" w:date="2024-01-01T00:00:00Z" w:initials="A">"#,
                    r#"<w:p><w:r><w:t>Hi</w:t></w:r></w:p>"#,
                    r#"</w:comment></w:comments>"#
                ),
                W_NS, M_NS, R_NS
            )
        );
    }

    #[test]
    fn test_standalone_flag() {
        let config = XmlConfig {
            standalone: false,
            ..Default::default()
        };
        let xml = Comments::new().to_xml_with(&config).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    }

    #[test]
    fn test_indented_output_reparses() {
        let comments = Comments::parse(COMMENTS_XML).unwrap();
        let xml = comments
            .to_xml_with(&XmlConfig::new().with_indent(' ', 2))
            .unwrap();
        assert!(xml.contains("\n  <w:comment"));
        assert_eq!(Comments::parse(xml.as_bytes()).unwrap(), comments);
    }
}
