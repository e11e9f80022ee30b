//! Block-level content of a comment (`EG_BlockLevelElts`)
//!
//! A comment body is a choice group of thirty element kinds: paragraphs and
//! tables, structured document tags, range markers for bookmarks, comments,
//! permissions and moves, tracked changes, math, and imported chunks.
//! [`BlockKind`] is the closed set of those kinds; [`BlockLevelElement`]
//! carries one payload tagged by its kind.

use std::fmt;

use crate::choice::{ChoiceItem, ChoiceKind};
use crate::content::{AltChunk, CustomXmlBlock, OpaqueBlock, Paragraph, RunTrackChange};
use crate::error::Result;
use crate::markup::{
    Bookmark, Markup, MarkupRange, MoveBookmark, PermStart, ProofErr, TrackChange,
};
use crate::node::XmlNode;

/// Declares the kind enum, the tagged item enum and their dispatch tables
/// from one list of `Kind => "element name", Payload;` entries.
macro_rules! block_level_elements {
    ($( $(#[$meta:meta])* $kind:ident => $name:literal, $payload:ty; )*) => {
        /// Kind of a block-level element
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum BlockKind {
            $( $(#[$meta])* $kind, )*
        }

        impl ChoiceKind for BlockKind {
            const ALL: &'static [Self] = &[ $( BlockKind::$kind, )* ];

            fn element_name(self) -> &'static str {
                match self {
                    $( BlockKind::$kind => $name, )*
                }
            }
        }

        /// A block-level element with its payload
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum BlockLevelElement {
            $( $(#[$meta])* $kind($payload), )*
        }

        impl ChoiceItem for BlockLevelElement {
            type Kind = BlockKind;

            fn kind(&self) -> BlockKind {
                match self {
                    $( BlockLevelElement::$kind(_) => BlockKind::$kind, )*
                }
            }

            fn new_of_kind(kind: BlockKind) -> Self {
                match kind {
                    $( BlockKind::$kind => BlockLevelElement::$kind(<$payload>::default()), )*
                }
            }

            fn from_node(kind: BlockKind, node: &XmlNode) -> Result<Self> {
                Ok(match kind {
                    $( BlockKind::$kind => BlockLevelElement::$kind(<$payload>::from_node(node)?), )*
                })
            }

            fn to_node(&self) -> XmlNode {
                match self {
                    $( BlockLevelElement::$kind(value) => value.to_node($name), )*
                }
            }
        }
    };
}

block_level_elements! {
    /// Block-level custom XML element
    CustomXml => "w:customXml", CustomXmlBlock;
    /// Block-level structured document tag
    Sdt => "w:sdt", OpaqueBlock;
    /// Paragraph
    P => "w:p", Paragraph;
    /// Table
    Tbl => "w:tbl", OpaqueBlock;
    /// Spelling or grammar mark
    ProofErr => "w:proofErr", ProofErr;
    /// Start of an editing permission range
    PermStart => "w:permStart", PermStart;
    /// End of an editing permission range
    PermEnd => "w:permEnd", MarkupRange;
    BookmarkStart => "w:bookmarkStart", Bookmark;
    BookmarkEnd => "w:bookmarkEnd", MarkupRange;
    /// Start of a move source range
    MoveFromRangeStart => "w:moveFromRangeStart", MoveBookmark;
    MoveFromRangeEnd => "w:moveFromRangeEnd", MarkupRange;
    /// Start of a move destination range
    MoveToRangeStart => "w:moveToRangeStart", MoveBookmark;
    MoveToRangeEnd => "w:moveToRangeEnd", MarkupRange;
    CommentRangeStart => "w:commentRangeStart", MarkupRange;
    CommentRangeEnd => "w:commentRangeEnd", MarkupRange;
    /// Custom XML insertion markers
    CustomXmlInsRangeStart => "w:customXmlInsRangeStart", TrackChange;
    CustomXmlInsRangeEnd => "w:customXmlInsRangeEnd", Markup;
    /// Custom XML deletion markers
    CustomXmlDelRangeStart => "w:customXmlDelRangeStart", TrackChange;
    CustomXmlDelRangeEnd => "w:customXmlDelRangeEnd", Markup;
    /// Custom XML move source markers
    CustomXmlMoveFromRangeStart => "w:customXmlMoveFromRangeStart", TrackChange;
    CustomXmlMoveFromRangeEnd => "w:customXmlMoveFromRangeEnd", Markup;
    /// Custom XML move destination markers
    CustomXmlMoveToRangeStart => "w:customXmlMoveToRangeStart", TrackChange;
    CustomXmlMoveToRangeEnd => "w:customXmlMoveToRangeEnd", Markup;
    /// Inserted runs
    Ins => "w:ins", RunTrackChange;
    /// Deleted runs
    Del => "w:del", RunTrackChange;
    /// Move source runs
    MoveFrom => "w:moveFrom", RunTrackChange;
    /// Move destination runs
    MoveTo => "w:moveTo", RunTrackChange;
    /// Office Math paragraph
    OMathPara => "m:oMathPara", OpaqueBlock;
    /// Office Math expression
    OMath => "m:oMath", OpaqueBlock;
    /// Content imported from another part
    AltChunk => "w:altChunk", AltChunk;
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}

impl BlockLevelElement {
    /// The paragraph payload, if this is a paragraph
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            BlockLevelElement::P(paragraph) => Some(paragraph),
            _ => None,
        }
    }

    /// Mutable paragraph payload, if this is a paragraph
    pub fn as_paragraph_mut(&mut self) -> Option<&mut Paragraph> {
        match self {
            BlockLevelElement::P(paragraph) => Some(paragraph),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirty_kinds_with_unique_names() {
        assert_eq!(BlockKind::ALL.len(), 30);
        let mut names: Vec<&str> = BlockKind::ALL.iter().map(|k| k.element_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 30);
    }

    #[test]
    fn test_element_names() {
        assert_eq!(BlockKind::P.element_name(), "w:p");
        assert_eq!(BlockKind::Tbl.element_name(), "w:tbl");
        assert_eq!(BlockKind::OMath.element_name(), "m:oMath");
        assert_eq!(BlockKind::OMathPara.element_name(), "m:oMathPara");
        assert_eq!(
            BlockKind::CustomXmlMoveToRangeEnd.element_name(),
            "w:customXmlMoveToRangeEnd"
        );
        assert_eq!(BlockKind::AltChunk.to_string(), "w:altChunk");
    }

    #[test]
    fn test_kind_lookup() {
        assert_eq!(BlockKind::from_element_name("w:p"), Some(BlockKind::P));
        assert_eq!(BlockKind::from_element_name("oMathPara"), Some(BlockKind::OMathPara));
        assert_eq!(BlockKind::from_element_name("w:r"), None);
    }

    #[test]
    fn test_new_of_kind_matches_kind() {
        for kind in BlockKind::ALL {
            assert_eq!(BlockLevelElement::new_of_kind(*kind).kind(), *kind);
        }
    }

    #[test]
    fn test_written_under_kind_name() {
        for kind in BlockKind::ALL {
            let node = BlockLevelElement::new_of_kind(*kind).to_node();
            assert_eq!(node.name, kind.element_name());
        }
    }

    #[test]
    fn test_shared_payload_dispatch() {
        let node = XmlNode::parse(br#"<w:commentRangeStart w:id="0"/>"#).unwrap();
        let element = BlockLevelElement::from_node(BlockKind::CommentRangeStart, &node).unwrap();
        assert_eq!(element.kind(), BlockKind::CommentRangeStart);
        assert_eq!(element.to_node(), node);

        // Same payload type, different kind and name
        let end = BlockLevelElement::from_node(BlockKind::BookmarkEnd, &node).unwrap();
        assert_eq!(end.to_node().name, "w:bookmarkEnd");
    }

    #[test]
    fn test_as_paragraph() {
        let mut element = BlockLevelElement::P(Paragraph::with_text("hi"));
        assert_eq!(element.as_paragraph().map(Paragraph::text), Some("hi".to_string()));
        element.as_paragraph_mut().unwrap().rsid_r = Some([0, 0, 0, 1]);

        let table = BlockLevelElement::new_of_kind(BlockKind::Tbl);
        assert!(table.as_paragraph().is_none());
    }
}
