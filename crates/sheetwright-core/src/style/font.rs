//! Font settings of a cell style

use super::Color;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Typeface used when a style does not name one
pub const DEFAULT_FONT_NAME: &str = "Calibri";
/// Size in points used when a style does not give one
pub const DEFAULT_FONT_SIZE: f64 = 11.0;

/// Font of a cell
///
/// Only single underlines are modelled; any other underline kind read from a file
/// becomes `underline = true`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FontStyle {
    pub name: String,
    /// Size in points
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    pub color: Color,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            name: DEFAULT_FONT_NAME.to_string(),
            size: DEFAULT_FONT_SIZE,
            bold: false,
            italic: false,
            underline: false,
            strike: false,
            color: Color::Auto,
        }
    }
}

// f64 size: hash the bits so equal fonts share a pool slot
impl std::hash::Hash for FontStyle {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.size.to_bits().hash(state);
        (self.bold, self.italic, self.underline, self.strike).hash(state);
        self.color.hash(state);
    }
}

impl Eq for FontStyle {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_font() {
        let font = FontStyle::default();
        assert_eq!(font.name, "Calibri");
        assert_eq!(font.size, 11.0);
        assert!(!font.bold && !font.underline && !font.strike);
        assert_eq!(font.color, Color::Auto);
    }
}
