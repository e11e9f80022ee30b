//! Run fonts (`CT_Fonts`, the `w:rFonts` element)

use crate::attrs::{opt_simple, opt_string, simple_type_str, SimpleType};
use crate::error::Result;
use crate::node::XmlNode;

/// Which font slot to prefer for ambiguous characters (`ST_Hint`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontHint {
    Default,
    EastAsia,
    ComplexScript,
}

impl SimpleType for FontHint {
    const TYPE_NAME: &'static str = "ST_Hint";
    const VALUES: &'static [(Self, &'static str)] = &[
        (FontHint::Default, "default"),
        (FontHint::EastAsia, "eastAsia"),
        (FontHint::ComplexScript, "cs"),
    ];
}

/// A font slot of the document theme (`ST_Theme`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeFont {
    MajorEastAsia,
    MajorBidi,
    MajorAscii,
    MajorHAnsi,
    MinorEastAsia,
    MinorBidi,
    MinorAscii,
    MinorHAnsi,
}

impl SimpleType for ThemeFont {
    const TYPE_NAME: &'static str = "ST_Theme";
    const VALUES: &'static [(Self, &'static str)] = &[
        (ThemeFont::MajorEastAsia, "majorEastAsia"),
        (ThemeFont::MajorBidi, "majorBidi"),
        (ThemeFont::MajorAscii, "majorAscii"),
        (ThemeFont::MajorHAnsi, "majorHAnsi"),
        (ThemeFont::MinorEastAsia, "minorEastAsia"),
        (ThemeFont::MinorBidi, "minorBidi"),
        (ThemeFont::MinorAscii, "minorAscii"),
        (ThemeFont::MinorHAnsi, "minorHAnsi"),
    ];
}

/// Fonts used for the four character classes of a run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fonts {
    pub hint: Option<FontHint>,
    /// ASCII (U+0000–U+007F)
    pub ascii: Option<String>,
    /// High ANSI
    pub h_ansi: Option<String>,
    pub east_asia: Option<String>,
    /// Complex script
    pub cs: Option<String>,
    pub ascii_theme: Option<ThemeFont>,
    pub h_ansi_theme: Option<ThemeFont>,
    pub east_asia_theme: Option<ThemeFont>,
    pub cs_theme: Option<ThemeFont>,
}

impl Fonts {
    /// Use one font for every character class
    pub fn uniform(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            ascii: Some(name.clone()),
            h_ansi: Some(name.clone()),
            east_asia: Some(name.clone()),
            cs: Some(name),
            ..Default::default()
        }
    }

    pub fn from_node(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            hint: opt_simple(node, "w:hint")?,
            ascii: opt_string(node, "w:ascii"),
            h_ansi: opt_string(node, "w:hAnsi"),
            east_asia: opt_string(node, "w:eastAsia"),
            cs: opt_string(node, "w:cs"),
            ascii_theme: opt_simple(node, "w:asciiTheme")?,
            h_ansi_theme: opt_simple(node, "w:hAnsiTheme")?,
            east_asia_theme: opt_simple(node, "w:eastAsiaTheme")?,
            cs_theme: opt_simple(node, "w:cstheme")?,
        })
    }

    pub fn to_node(&self, name: &str) -> XmlNode {
        let mut node = XmlNode::new(name);
        node.set_opt_attr("w:hint", self.hint.map(simple_type_str));
        node.set_opt_attr("w:ascii", self.ascii.as_deref());
        node.set_opt_attr("w:hAnsi", self.h_ansi.as_deref());
        node.set_opt_attr("w:eastAsia", self.east_asia.as_deref());
        node.set_opt_attr("w:cs", self.cs.as_deref());
        node.set_opt_attr("w:asciiTheme", self.ascii_theme.map(simple_type_str));
        node.set_opt_attr("w:hAnsiTheme", self.h_ansi_theme.map(simple_type_str));
        node.set_opt_attr("w:eastAsiaTheme", self.east_asia_theme.map(simple_type_str));
        node.set_opt_attr("w:cstheme", self.cs_theme.map(simple_type_str));
        node
    }
}
