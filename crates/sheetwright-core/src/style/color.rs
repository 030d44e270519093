//! Color representation

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Color representation
///
/// XLSX stores colors either as ARGB hex (`rgb="FFCCCCCC"`), as a theme slot with a
/// tint, or as an index into the legacy palette. All three are kept as read so that a
/// load/save cycle writes them back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    /// Automatic/default color
    #[default]
    Auto,

    /// RGB color (no alpha)
    Rgb { r: u8, g: u8, b: u8 },

    /// ARGB color with alpha channel
    Argb { a: u8, r: u8, g: u8, b: u8 },

    /// Theme color with tint (stored as a percentage, -100..=100)
    Theme { index: u8, tint: i8 },

    /// Indexed color (legacy palette)
    Indexed(u8),
}

impl Color {
    /// Create an RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Create an ARGB color
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color::Argb { a, r, g, b }
    }

    /// Create a theme color
    pub const fn theme(index: u8, tint: i8) -> Self {
        Color::Theme { index, tint }
    }

    /// Create from a hex string (`"#CCCCCC"`, `"CCCCCC"` or `"FFCCCCCC"`)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            6 => Some(Color::Rgb {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
            }),
            8 => Some(Color::Argb {
                a: byte(0)?,
                r: byte(2)?,
                g: byte(4)?,
                b: byte(6)?,
            }),
            _ => None,
        }
    }

    /// ARGB hex string as written in `rgb="..."` attributes
    ///
    /// Returns `None` for colors that are not stored as RGB (auto, theme, indexed).
    pub fn to_argb_hex(&self) -> Option<String> {
        match self {
            Color::Rgb { r, g, b } => Some(format!("FF{:02X}{:02X}{:02X}", r, g, b)),
            Color::Argb { a, r, g, b } => Some(format!("{:02X}{:02X}{:02X}{:02X}", a, r, g, b)),
            _ => None,
        }
    }

    /// Check if color is automatic/default
    pub fn is_auto(&self) -> bool {
        matches!(self, Color::Auto)
    }

    pub const BLACK: Color = Color::Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const RED: Color = Color::Rgb { r: 255, g: 0, b: 0 };
    /// Header background used by the default manager options (`#CCCCCC`)
    pub const HEADER_GRAY: Color = Color::Rgb {
        r: 0xCC,
        g: 0xCC,
        b: 0xCC,
    };
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Auto => write!(f, "auto"),
            Color::Rgb { r, g, b } => write!(f, "#{:02X}{:02X}{:02X}", r, g, b),
            Color::Argb { a, r, g, b } => write!(f, "#{:02X}{:02X}{:02X}{:02X}", a, r, g, b),
            Color::Theme { index, tint } => write!(f, "theme({}, {}%)", index, tint),
            Color::Indexed(i) => write!(f, "indexed({})", i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#CCCCCC"), Some(Color::HEADER_GRAY));
        assert_eq!(Color::from_hex("00FF00"), Some(Color::rgb(0, 255, 0)));
        assert_eq!(
            Color::from_hex("#80FFFFFF"),
            Some(Color::argb(128, 255, 255, 255))
        );
        assert_eq!(Color::from_hex("XYZXYZ"), None);
        assert_eq!(Color::from_hex("FFF"), None);
        assert_eq!(Color::from_hex("ééé"), None);
    }

    #[test]
    fn test_to_argb_hex() {
        assert_eq!(Color::RED.to_argb_hex().as_deref(), Some("FFFF0000"));
        assert_eq!(
            Color::argb(128, 255, 255, 255).to_argb_hex().as_deref(),
            Some("80FFFFFF")
        );
        assert_eq!(Color::theme(1, 0).to_argb_hex(), None);
        assert_eq!(Color::Auto.to_argb_hex(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::HEADER_GRAY.to_string(), "#CCCCCC");
        assert_eq!(Color::Indexed(64).to_string(), "indexed(64)");
    }
}
