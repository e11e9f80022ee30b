//! Serialization options
//!
//! [`XmlConfig`] controls how parts are read and written: whether the XML
//! declaration is emitted, whether whitespace-only text survives parsing and
//! whether output is indented. It is usually kept next to a document as a
//! small TOML file:
//!
//! ```toml
//! declaration = true
//! standalone = true
//! keep_whitespace = false
//!
//! [indent]
//! char = " "
//! size = 2
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WmlError};

/// Options for reading and writing WordprocessingML parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlConfig {
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>` before the root element
    #[serde(default = "default_true")]
    pub declaration: bool,

    /// Add `standalone="yes"` to the declaration
    #[serde(default = "default_true")]
    pub standalone: bool,

    /// Keep whitespace-only text nodes when parsing
    #[serde(default)]
    pub keep_whitespace: bool,

    /// Indent output; compact when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent: Option<IndentConfig>,
}

/// Indentation used when writing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndentConfig {
    /// Indentation character
    #[serde(default = "default_indent_char")]
    pub char: char,

    /// Number of characters per nesting level
    #[serde(default = "default_indent_size")]
    pub size: usize,
}

fn default_true() -> bool {
    true
}

fn default_indent_char() -> char {
    ' '
}

fn default_indent_size() -> usize {
    2
}

impl Default for XmlConfig {
    fn default() -> Self {
        Self {
            declaration: true,
            standalone: true,
            keep_whitespace: false,
            indent: None,
        }
    }
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            char: default_indent_char(),
            size: default_indent_size(),
        }
    }
}

impl XmlConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable indentation with the given character and width
    pub fn with_indent(mut self, char: char, size: usize) -> Self {
        self.indent = Some(IndentConfig { char, size });
        self
    }

    /// Parse from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// The indentation byte, if indentation is enabled
    ///
    /// quick-xml indents with a single byte, so only ASCII characters are
    /// accepted.
    pub(crate) fn indent_byte(&self) -> Result<Option<(u8, usize)>> {
        match &self.indent {
            None => Ok(None),
            Some(indent) if indent.char.is_ascii() => Ok(Some((indent.char as u8, indent.size))),
            Some(indent) => Err(WmlError::invalid_value(
                "indent.char",
                indent.char.to_string(),
            )),
        }
    }
}
