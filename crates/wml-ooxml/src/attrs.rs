//! Attribute value coercion for WordprocessingML simple types
//!
//! Covers the handful of simple types the element payloads need:
//! `ST_OnOff`, `ST_LongHexNumber` (and other hex binaries),
//! `ST_DecimalNumber`, and closed string enumerations.

use crate::error::{Result, WmlError};
use crate::node::XmlNode;

/// A closed string enumeration from the schema
///
/// Implementors map each variant to its exact attribute spelling.
pub trait SimpleType: Sized + Copy + 'static {
    /// Schema type name, used in error messages
    const TYPE_NAME: &'static str;
    /// Every value paired with its spelling
    const VALUES: &'static [(Self, &'static str)];

    /// Parse an attribute value
    fn parse(value: &str) -> Result<Self> {
        Self::VALUES
            .iter()
            .find(|(_, text)| *text == value)
            .map(|(variant, _)| *variant)
            .ok_or_else(|| WmlError::invalid_value(Self::TYPE_NAME, value))
    }
}

/// Spelling of a [`SimpleType`] value
pub fn simple_type_str<T: SimpleType + PartialEq>(value: T) -> &'static str {
    T::VALUES
        .iter()
        .find(|(variant, _)| *variant == value)
        .map(|(_, text)| *text)
        .unwrap_or_default()
}

/// Parse an optional enumerated attribute
pub fn opt_simple<T: SimpleType>(node: &XmlNode, name: &str) -> Result<Option<T>> {
    node.attr(name).map(T::parse).transpose()
}

/// Parse an `ST_OnOff` value
pub fn parse_on_off(value: &str) -> Result<bool> {
    match value {
        "1" | "true" | "on" => Ok(true),
        "0" | "false" | "off" => Ok(false),
        _ => Err(WmlError::invalid_value("ST_OnOff", value)),
    }
}

/// Read a `CT_OnOff` toggle element such as `<w:b/>`
///
/// A missing `w:val` means the toggle is on.
pub fn on_off_element(node: &XmlNode) -> Result<bool> {
    node.attr("w:val").map(parse_on_off).unwrap_or(Ok(true))
}

/// Build a `CT_OnOff` toggle element
///
/// The default (on) is written as a bare element.
pub fn on_off_node(name: &str, value: bool) -> XmlNode {
    let node = XmlNode::new(name);
    if value {
        node
    } else {
        node.with_attr("w:val", "0")
    }
}

/// Parse a hex binary value (e.g. `00AB12CD`)
pub fn parse_hex_bytes(value: &str) -> Result<Vec<u8>> {
    if value.len() % 2 != 0 || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(WmlError::invalid_value("ST_HexBinary", value));
    }
    (0..value.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&value[i..i + 2], 16)
                .map_err(|_| WmlError::invalid_value("ST_HexBinary", value))
        })
        .collect()
}

/// Format bytes as uppercase hex
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}

/// Parse an `ST_LongHexNumber` (exactly four bytes)
pub fn parse_long_hex(value: &str) -> Result<[u8; 4]> {
    let bytes = parse_hex_bytes(value)?;
    <[u8; 4]>::try_from(bytes.as_slice())
        .map_err(|_| WmlError::invalid_value("ST_LongHexNumber", value))
}

/// Parse an optional `ST_LongHexNumber` attribute
pub fn opt_long_hex(node: &XmlNode, name: &str) -> Result<Option<[u8; 4]>> {
    node.attr(name).map(parse_long_hex).transpose()
}

/// Parse an `ST_DecimalNumber`
pub fn parse_decimal(value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| WmlError::invalid_value("ST_DecimalNumber", value))
}

/// Parse an optional `ST_DecimalNumber` attribute
pub fn opt_decimal(node: &XmlNode, name: &str) -> Result<Option<i64>> {
    node.attr(name).map(parse_decimal).transpose()
}

/// Read an optional string attribute
pub fn opt_string(node: &XmlNode, name: &str) -> Option<String> {
    node.attr(name).map(str::to_string)
}
