//! Measurement elements
//!
//! WordprocessingML measures are either plain integers in the type's native
//! unit or universal measures such as `1.5in` or `12pt`. Values are always
//! normalized to the native unit and written back as integers.

use crate::attrs::parse_decimal;
use crate::error::{Result, WmlError};
use crate::node::XmlNode;

/// Twips per unit of each universal measure suffix
const UNITS: &[(&str, f64)] = &[
    ("mm", 144.0 / 2.54),
    ("cm", 1440.0 / 2.54),
    ("in", 1440.0),
    ("pt", 20.0),
    ("pc", 240.0),
    ("pi", 240.0),
];

/// Parse an `ST_UniversalMeasure` into twips
pub fn parse_universal_measure(value: &str) -> Result<f64> {
    let value = value.trim();
    let (number, factor) = UNITS
        .iter()
        .find_map(|(unit, factor)| value.strip_suffix(unit).map(|n| (n, *factor)))
        .ok_or_else(|| WmlError::invalid_value("ST_UniversalMeasure", value))?;

    let number: f64 = number
        .parse()
        .map_err(|_| WmlError::invalid_value("ST_UniversalMeasure", value))?;
    if !number.is_finite() {
        return Err(WmlError::invalid_value("ST_UniversalMeasure", value));
    }
    Ok(number * factor)
}

/// A size in half-points (`CT_HpsMeasure`, e.g. `<w:sz w:val="24"/>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HpsMeasure {
    /// Half-points
    pub val: u64,
}

impl HpsMeasure {
    /// Create a measure from a point size
    pub fn from_points(points: f64) -> Self {
        Self {
            val: (points * 2.0).round().max(0.0) as u64,
        }
    }

    /// Size in points
    pub fn points(&self) -> f64 {
        self.val as f64 / 2.0
    }

    /// Parse an `ST_HpsMeasure`
    pub fn parse(value: &str) -> Result<Self> {
        if let Ok(val) = value.trim().parse::<u64>() {
            return Ok(Self { val });
        }
        let twips = parse_universal_measure(value)?;
        if twips <= 0.0 {
            return Err(WmlError::invalid_value("ST_HpsMeasure", value));
        }
        Ok(Self {
            val: (twips / 10.0).round() as u64,
        })
    }

    /// Read from an element carrying `w:val`
    pub fn from_node(node: &XmlNode) -> Result<Self> {
        Self::parse(node.required_attr("w:val")?)
    }

    /// Build an element carrying `w:val`
    pub fn to_node(&self, name: &str) -> XmlNode {
        XmlNode::new(name).with_attr("w:val", self.val.to_string())
    }
}

/// A signed length in twips (`CT_SignedTwipsMeasure`, e.g. `<w:spacing w:val="-20"/>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignedTwipsMeasure {
    /// Twentieths of a point
    pub val: i64,
}

impl SignedTwipsMeasure {
    /// Length in points
    pub fn points(&self) -> f64 {
        self.val as f64 / 20.0
    }

    /// Parse an `ST_SignedTwipsMeasure`
    pub fn parse(value: &str) -> Result<Self> {
        if let Ok(val) = parse_decimal(value) {
            return Ok(Self { val });
        }
        let twips = parse_universal_measure(value)?;
        Ok(Self {
            val: twips.round() as i64,
        })
    }

    /// Read from an element carrying `w:val`
    pub fn from_node(node: &XmlNode) -> Result<Self> {
        Self::parse(node.required_attr("w:val")?)
    }

    /// Build an element carrying `w:val`
    pub fn to_node(&self, name: &str) -> XmlNode {
        XmlNode::new(name).with_attr("w:val", self.val.to_string())
    }
}
