//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The value stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A range of cells (e.g., "A1:B10")
//! - [`CellData`] - Complete cell data including value and style
//! - the coordinate translation functions ([`parse_a1`], [`format_a1`], ...)

mod address;
mod storage;
mod value;

pub use address::{
    column_index_to_letter, column_letter_to_index, format_a1, parse_a1, CellAddress, CellRange,
    CellRangeIterator,
};
pub use storage::{CellData, CellStorage};
pub use value::{CellValue, SharedString};
