//! Cell styling types
//!
//! This module contains types for cell formatting:
//! - [`Style`] - Complete cell style
//! - [`FontStyle`] - Font settings
//! - [`FillStyle`] - Background fill
//! - [`BorderStyle`] - Cell borders
//! - [`Alignment`] - Text alignment
//! - [`NumberFormat`] - Display format
//! - [`Color`] - Color representation

mod alignment;
mod border;
mod color;
mod fill;
mod font;
mod number_format;
mod pool;

pub use alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
pub use border::{BorderEdge, BorderLineStyle, BorderStyle};
pub use color::Color;
pub use fill::{FillStyle, PatternType};
pub use font::FontStyle;
pub use number_format::NumberFormat;
pub use pool::StylePool;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete cell style
///
/// Styles are deduplicated per worksheet via [`StylePool`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Style {
    pub font: FontStyle,
    pub fill: FillStyle,
    pub border: BorderStyle,
    pub alignment: Alignment,
    pub number_format: NumberFormat,
}

impl Style {
    /// Create a new default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Bold, centred, grey (`#CCCCCC`) header cell with a thin border
    pub fn header() -> Self {
        Self::new()
            .bold(true)
            .alignment(Alignment::center())
            .fill_color(Color::HEADER_GRAY)
            .border(BorderStyle::thin())
    }

    /// Set font to bold
    pub fn bold(mut self, bold: bool) -> Self {
        self.font.bold = bold;
        self
    }

    /// Set font to italic
    pub fn italic(mut self, italic: bool) -> Self {
        self.font.italic = italic;
        self
    }

    /// Underline the text
    pub fn underline(mut self, underline: bool) -> Self {
        self.font.underline = underline;
        self
    }

    /// Strike the text through
    pub fn strike(mut self, strike: bool) -> Self {
        self.font.strike = strike;
        self
    }

    /// Set font size in points
    pub fn font_size(mut self, size: f64) -> Self {
        self.font.size = size;
        self
    }

    /// Set font name
    pub fn font_name<S: Into<String>>(mut self, name: S) -> Self {
        self.font.name = name.into();
        self
    }

    /// Set font color
    pub fn font_color(mut self, color: Color) -> Self {
        self.font.color = color;
        self
    }

    /// Set fill color (solid fill)
    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill = FillStyle::Solid { color };
        self
    }

    /// Set the border
    pub fn border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    /// Set the alignment
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the number format from a format code
    pub fn number_format(mut self, code: &str) -> Self {
        self.number_format = NumberFormat::from_code(code);
        self
    }

    /// Set horizontal alignment
    pub fn horizontal_alignment(mut self, align: HorizontalAlignment) -> Self {
        self.alignment.horizontal = align;
        self
    }

    /// Set vertical alignment
    pub fn vertical_alignment(mut self, align: VerticalAlignment) -> Self {
        self.alignment.vertical = align;
        self
    }

    /// Enable text wrapping
    pub fn wrap_text(mut self, wrap: bool) -> Self {
        self.alignment.wrap_text = wrap;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_style() {
        let style = Style::header();
        assert!(style.font.bold);
        assert_eq!(style.alignment.horizontal, HorizontalAlignment::Center);
        assert_eq!(style.fill, FillStyle::solid(Color::HEADER_GRAY));
        assert_eq!(style.border, BorderStyle::thin());
        assert!(style.number_format.is_general());
    }

    #[test]
    fn test_number_format_builder() {
        let style = Style::new().number_format("#,##0");
        assert_eq!(style.number_format, NumberFormat::BuiltIn(3));
    }
}
