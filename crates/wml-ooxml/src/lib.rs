//! # wml-ooxml
//!
//! WordprocessingML comment parts, with ordered choice-group content.
//!
//! This crate provides functionality to:
//! - Read and write `word/comments.xml`, standalone or inside a DOCX package
//! - Access a comment's interleaved block content in document order or by
//!   kind ("the second bookmark start")
//! - Insert, replace and remove content without disturbing the relative
//!   order of everything else
//!
//! ## Example: Editing Comments
//!
//! ```no_run
//! use wml_ooxml::{BlockKind, Comments, OoxmlArchive};
//!
//! let mut archive = OoxmlArchive::open("review.docx")?;
//! let mut comments = match archive.comments_xml() {
//!     Some(xml) => Comments::parse(xml)?,
//!     None => Comments::new(),
//! };
//!
//! for comment in comments.iter_mut() {
//!     comment.content_mut().remove_all(BlockKind::BookmarkStart);
//!     comment.content_mut().remove_all(BlockKind::BookmarkEnd);
//! }
//!
//! archive.set_comments_xml(comments.to_xml()?);
//! archive.write_to_file("review-clean.docx")?;
//! # Ok::<(), wml_ooxml::WmlError>(())
//! ```

pub mod archive;
pub mod attrs;
pub mod block;
pub mod choice;
pub mod comment;
pub mod config;
pub mod content;
pub mod error;
pub mod fonts;
pub mod markup;
pub mod measure;
pub mod node;

pub use archive::{OoxmlArchive, COMMENTS_PATH};
pub use block::{BlockKind, BlockLevelElement};
pub use choice::{ChoiceItem, ChoiceKind, ChoiceSequence};
pub use comment::{Comment, Comments};
pub use config::{IndentConfig, XmlConfig};
pub use content::{AltChunk, CustomXmlBlock, OpaqueBlock, Paragraph, Run, RunTrackChange};
pub use error::{Result, WmlError};
pub use fonts::{FontHint, Fonts, ThemeFont};
pub use markup::{
    Bookmark, DisplacedByCustomXml, EditorGroup, Markup, MarkupRange, MoveBookmark, PermStart,
    ProofErr, ProofErrType, TrackChange,
};
pub use measure::{HpsMeasure, SignedTwipsMeasure};
pub use node::{XmlChild, XmlNode};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
