//! Error types for WordprocessingML operations

use thiserror::Error;

/// Errors that can occur while reading, editing or writing WordprocessingML
#[derive(Error, Debug)]
pub enum WmlError {
    /// Error reading or writing the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing XML content
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute in XML content
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// A replacement value does not match the kind of the slot it targets
    #[error("Kind mismatch: expected <{expected}>, found <{found}>")]
    KindMismatch {
        /// Element name of the targeted slot kind
        expected: &'static str,
        /// Element name of the supplied value
        found: &'static str,
    },

    /// Required attribute absent from an element
    #[error("Missing attribute {attribute} on <{element}>")]
    MissingAttribute {
        /// Element carrying the attribute
        element: String,
        /// Qualified attribute name
        attribute: String,
    },

    /// Attribute or element value outside its simple type
    #[error("Invalid value {value:?} for {name}")]
    InvalidValue {
        /// Attribute or type name
        name: String,
        /// The offending value
        value: String,
    },

    /// Invalid document structure
    #[error("Invalid document structure: {0}")]
    InvalidStructure(String),

    /// Required file not found in archive
    #[error("Required file not found: {0}")]
    MissingFile(String),

    /// TOML configuration could not be read
    #[error("Config error: {0}")]
    ConfigRead(#[from] toml::de::Error),

    /// TOML configuration could not be written
    #[error("Config error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

impl WmlError {
    /// Shorthand for an [`WmlError::InvalidValue`]
    pub fn invalid_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Result type for WordprocessingML operations
pub type Result<T> = std::result::Result<T, WmlError>;
