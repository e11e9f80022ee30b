//! wml CLI - Command-line interface library
//!
//! This library provides the CLI functionality for wml:
//! - Inspect: Summarize the comments of a document
//! - Normalize: Parse and re-serialize a comments part
//! - Strip: Remove every element of one kind from all comments
//!
//! Every command accepts either a bare `comments.xml` or a `.docx` package.
//!
//! # Library Usage
//!
//! ```ignore
//! use wml_cli::{inspect_report, strip_command};
//!
//! let report = inspect_report(&input)?;
//! strip_command(&input, "w:bookmarkStart", Some(&output))?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Per-comment summary as JSON
//! wml inspect review.docx --format json
//!
//! # Pretty-print a comments part with settings from a file
//! wml normalize comments.xml --config wml.toml
//!
//! # Drop all bookmarks from the comments of a package
//! wml strip review.docx --kind w:bookmarkStart -o clean.docx
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{inspect_command, inspect_report, load_input, normalize_command, strip_command};
pub use app::{run_cli, CommentReport, Input, OutputFormat};
