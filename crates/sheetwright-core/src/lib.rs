//! # sheetwright-core
//!
//! Core data structures for the sheetwright spreadsheet toolkit.
//!
//! This crate provides the fundamental types used throughout sheetwright:
//! - [`CellValue`] - Represents cell values (numbers, text, booleans, preserved formulas)
//! - [`CellAddress`] and [`CellRange`] - Cell addressing and ranges
//! - [`column_letter_to_index`], [`column_index_to_letter`], [`parse_a1`], [`format_a1`] -
//!   coordinate translation between the three addressing schemes
//! - [`Style`] - Cell formatting (fonts, fills, borders, alignment, number formats)
//! - [`Workbook`], [`Worksheet`] - The main document structures
//!
//! All rows and columns are **1-based**, exactly as they appear in a spreadsheet UI.
//!
//! ## Example
//!
//! ```rust
//! use sheetwright_core::{Workbook, CellValue};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//!
//! // Using A1 references
//! sheet.set_cell_value("A1", "Hello").unwrap();
//! sheet.set_cell_value("B1", 42.0).unwrap();
//!
//! // Or using row/column numbers (1-based)
//! sheet.set_cell_value_at(2, 1, CellValue::text("World")).unwrap();
//! sheet.set_cell_value_at(2, 2, CellValue::Number(3.5)).unwrap();
//!
//! assert_eq!(sheet.get_value("A2").unwrap(), CellValue::text("World"));
//! ```

pub mod cell;
pub mod error;
pub mod style;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{
    column_index_to_letter, column_letter_to_index, format_a1, parse_a1, CellAddress, CellData,
    CellRange, CellValue, SharedString,
};
pub use error::{Error, Result};
pub use workbook::Workbook;
pub use worksheet::{is_valid_column_width, Worksheet};

// Re-export all style types for convenience
pub use style::{
    Alignment, BorderEdge, BorderLineStyle, BorderStyle, Color, FillStyle, FontStyle,
    HorizontalAlignment, NumberFormat, PatternType, Style, StylePool, VerticalAlignment,
};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit, column `XFD`)
pub const MAX_COLS: u32 = 16_384;

/// Widest column Excel accepts, in characters
pub const MAX_COLUMN_WIDTH: f64 = 255.0;

/// Maximum length of a sheet name, in characters
pub const MAX_SHEET_NAME_LEN: usize = 31;
