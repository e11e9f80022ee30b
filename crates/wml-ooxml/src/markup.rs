//! Annotation markers: ranges, bookmarks, permissions, proofing marks and
//! revision records
//!
//! These are the empty marker elements that delimit regions of a document
//! (`w:bookmarkStart`/`w:bookmarkEnd`, `w:commentRangeStart`, ...) and the
//! attribute bags shared by tracked changes.

use crate::attrs::{opt_decimal, opt_simple, opt_string, simple_type_str, SimpleType};
use crate::error::Result;
use crate::node::XmlNode;

/// Side to which a marker moves when displaced by custom XML (`ST_DisplacedByCustomXml`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplacedByCustomXml {
    Next,
    Prev,
}

impl SimpleType for DisplacedByCustomXml {
    const TYPE_NAME: &'static str = "ST_DisplacedByCustomXml";
    const VALUES: &'static [(Self, &'static str)] = &[
        (DisplacedByCustomXml::Next, "next"),
        (DisplacedByCustomXml::Prev, "prev"),
    ];
}

/// Editor group allowed to edit a permission range (`ST_EdGrp`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorGroup {
    None,
    Everyone,
    Administrators,
    Contributors,
    Editors,
    Owners,
    Current,
}

impl SimpleType for EditorGroup {
    const TYPE_NAME: &'static str = "ST_EdGrp";
    const VALUES: &'static [(Self, &'static str)] = &[
        (EditorGroup::None, "none"),
        (EditorGroup::Everyone, "everyone"),
        (EditorGroup::Administrators, "administrators"),
        (EditorGroup::Contributors, "contributors"),
        (EditorGroup::Editors, "editors"),
        (EditorGroup::Owners, "owners"),
        (EditorGroup::Current, "current"),
    ];
}

/// Kind of proofing mark (`ST_ProofErr`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProofErrType {
    #[default]
    SpellStart,
    SpellEnd,
    GramStart,
    GramEnd,
}

impl SimpleType for ProofErrType {
    const TYPE_NAME: &'static str = "ST_ProofErr";
    const VALUES: &'static [(Self, &'static str)] = &[
        (ProofErrType::SpellStart, "spellStart"),
        (ProofErrType::SpellEnd, "spellEnd"),
        (ProofErrType::GramStart, "gramStart"),
        (ProofErrType::GramEnd, "gramEnd"),
    ];
}

/// An element identified only by `w:id` (`CT_Markup`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Markup {
    pub id: String,
}

impl Markup {
    pub fn from_node(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            id: node.required_attr("w:id")?.to_string(),
        })
    }

    pub fn to_node(&self, name: &str) -> XmlNode {
        XmlNode::new(name).with_attr("w:id", self.id.as_str())
    }
}

/// The end (or start) of an annotated range (`CT_MarkupRange`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkupRange {
    pub id: String,
    pub displaced_by_custom_xml: Option<DisplacedByCustomXml>,
}

impl MarkupRange {
    pub fn from_node(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            id: node.required_attr("w:id")?.to_string(),
            displaced_by_custom_xml: opt_simple(node, "w:displacedByCustomXml")?,
        })
    }

    pub fn to_node(&self, name: &str) -> XmlNode {
        let mut node = XmlNode::new(name).with_attr("w:id", self.id.as_str());
        node.set_opt_attr(
            "w:displacedByCustomXml",
            self.displaced_by_custom_xml.map(simple_type_str),
        );
        node
    }
}

/// Start of a bookmark (`CT_Bookmark`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bookmark {
    pub id: String,
    pub name: String,
    pub displaced_by_custom_xml: Option<DisplacedByCustomXml>,
    /// First table column covered, for bookmarks inside tables
    pub col_first: Option<i64>,
    /// Last table column covered
    pub col_last: Option<i64>,
}

impl Bookmark {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn from_node(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            id: node.required_attr("w:id")?.to_string(),
            name: node.required_attr("w:name")?.to_string(),
            displaced_by_custom_xml: opt_simple(node, "w:displacedByCustomXml")?,
            col_first: opt_decimal(node, "w:colFirst")?,
            col_last: opt_decimal(node, "w:colLast")?,
        })
    }

    pub fn to_node(&self, name: &str) -> XmlNode {
        let mut node = XmlNode::new(name)
            .with_attr("w:id", self.id.as_str())
            .with_attr("w:name", self.name.as_str());
        node.set_opt_attr(
            "w:displacedByCustomXml",
            self.displaced_by_custom_xml.map(simple_type_str),
        );
        node.set_opt_attr("w:colFirst", self.col_first);
        node.set_opt_attr("w:colLast", self.col_last);
        node
    }
}

/// Start of a move source or destination range (`CT_MoveBookmark`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveBookmark {
    pub bookmark: Bookmark,
    pub author: String,
    pub date: Option<String>,
}

impl MoveBookmark {
    pub fn from_node(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            bookmark: Bookmark::from_node(node)?,
            author: node.required_attr("w:author")?.to_string(),
            date: opt_string(node, "w:date"),
        })
    }

    pub fn to_node(&self, name: &str) -> XmlNode {
        let mut node = self
            .bookmark
            .to_node(name)
            .with_attr("w:author", self.author.as_str());
        node.set_opt_attr("w:date", self.date.as_deref());
        node
    }
}

/// Revision metadata: who changed what, and when (`CT_TrackChange`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackChange {
    pub id: String,
    pub author: String,
    /// `ST_DateTime`, kept as written
    pub date: Option<String>,
}

impl TrackChange {
    pub fn new(id: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            date: None,
        }
    }

    pub fn from_node(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            id: node.required_attr("w:id")?.to_string(),
            author: node.required_attr("w:author")?.to_string(),
            date: opt_string(node, "w:date"),
        })
    }

    pub fn to_node(&self, name: &str) -> XmlNode {
        let mut node = XmlNode::new(name)
            .with_attr("w:id", self.id.as_str())
            .with_attr("w:author", self.author.as_str());
        node.set_opt_attr("w:date", self.date.as_deref());
        node
    }
}

/// Start of an editing permission range (`CT_PermStart`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PermStart {
    pub id: String,
    pub displaced_by_custom_xml: Option<DisplacedByCustomXml>,
    pub editor_group: Option<EditorGroup>,
    /// Single user allowed to edit
    pub editor: Option<String>,
    pub col_first: Option<i64>,
    pub col_last: Option<i64>,
}

impl PermStart {
    pub fn from_node(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            id: node.required_attr("w:id")?.to_string(),
            displaced_by_custom_xml: opt_simple(node, "w:displacedByCustomXml")?,
            editor_group: opt_simple(node, "w:edGrp")?,
            editor: opt_string(node, "w:ed"),
            col_first: opt_decimal(node, "w:colFirst")?,
            col_last: opt_decimal(node, "w:colLast")?,
        })
    }

    pub fn to_node(&self, name: &str) -> XmlNode {
        let mut node = XmlNode::new(name).with_attr("w:id", self.id.as_str());
        node.set_opt_attr(
            "w:displacedByCustomXml",
            self.displaced_by_custom_xml.map(simple_type_str),
        );
        node.set_opt_attr("w:edGrp", self.editor_group.map(simple_type_str));
        node.set_opt_attr("w:ed", self.editor.as_deref());
        node.set_opt_attr("w:colFirst", self.col_first);
        node.set_opt_attr("w:colLast", self.col_last);
        node
    }
}

/// Start or end of a spelling or grammar error (`CT_ProofErr`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProofErr {
    pub err_type: ProofErrType,
}

impl ProofErr {
    pub fn from_node(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            err_type: ProofErrType::parse(node.required_attr("w:type")?)?,
        })
    }

    pub fn to_node(&self, name: &str) -> XmlNode {
        XmlNode::new(name).with_attr("w:type", simple_type_str(self.err_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WmlError;

    #[test]
    fn test_bookmark() {
        let node = XmlNode::parse(
            br#"<w:bookmarkStart w:id="4" w:name="_Toc1" w:colFirst="0" w:colLast="2" w:displacedByCustomXml="prev"/>"#,
        )
        .unwrap();
        let bookmark = Bookmark::from_node(&node).unwrap();
        assert_eq!(bookmark.id, "4");
        assert_eq!(bookmark.name, "_Toc1");
        assert_eq!(bookmark.col_first, Some(0));
        assert_eq!(bookmark.col_last, Some(2));
        assert_eq!(
            bookmark.displaced_by_custom_xml,
            Some(DisplacedByCustomXml::Prev)
        );

        assert_eq!(
            bookmark.to_node("w:bookmarkStart").to_xml().unwrap(),
            r#"<w:bookmarkStart w:id="4" w:name="_Toc1" w:displacedByCustomXml="prev" w:colFirst="0" w:colLast="2"/>"#
        );
    }

    #[test]
    fn test_bookmark_requires_name() {
        let node = XmlNode::new("w:bookmarkStart").with_attr("w:id", "1");
        assert!(matches!(
            Bookmark::from_node(&node),
            Err(WmlError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_move_bookmark() {
        let node = XmlNode::parse(
            br#"<w:moveFromRangeStart w:id="7" w:name="move1" w:author="Ann" w:date="2024-01-02T03:04:05Z"/>"#,
        )
        .unwrap();
        let mv = MoveBookmark::from_node(&node).unwrap();
        assert_eq!(mv.bookmark.name, "move1");
        assert_eq!(mv.author, "Ann");
        assert_eq!(mv.date.as_deref(), Some("2024-01-02T03:04:05Z"));
        assert_eq!(mv.to_node("w:moveFromRangeStart"), node);
    }

    #[test]
    fn test_markup_range_optional_displacement() {
        let range = MarkupRange {
            id: "3".to_string(),
            displaced_by_custom_xml: None,
        };
        assert_eq!(
            range.to_node("w:commentRangeEnd").to_xml().unwrap(),
            r#"<w:commentRangeEnd w:id="3"/>"#
        );
    }

    #[test]
    fn test_perm_start() {
        let node = XmlNode::parse(br#"<w:permStart w:id="1" w:edGrp="everyone"/>"#).unwrap();
        let perm = PermStart::from_node(&node).unwrap();
        assert_eq!(perm.editor_group, Some(EditorGroup::Everyone));
        assert_eq!(perm.editor, None);
        assert_eq!(perm.to_node("w:permStart"), node);

        let bad = XmlNode::new("w:permStart")
            .with_attr("w:id", "1")
            .with_attr("w:edGrp", "nobody");
        assert!(PermStart::from_node(&bad).is_err());
    }

    #[test]
    fn test_proof_err() {
        let node = XmlNode::parse(br#"<w:proofErr w:type="gramEnd"/>"#).unwrap();
        let err = ProofErr::from_node(&node).unwrap();
        assert_eq!(err.err_type, ProofErrType::GramEnd);
        assert_eq!(err.to_node("w:proofErr"), node);
    }

    #[test]
    fn test_track_change() {
        let change = TrackChange::new("12", "Bob");
        assert_eq!(
            change.to_node("w:customXmlInsRangeStart").to_xml().unwrap(),
            r#"<w:customXmlInsRangeStart w:id="12" w:author="Bob"/>"#
        );
    }
}
