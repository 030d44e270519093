//! # sheetwright-xlsx
//!
//! XLSX (Office Open XML) reader and writer for sheetwright.
//!
//! Text is written as inline strings; shared strings, cached formula results and
//! column widths are understood when reading files produced by other tools.

pub mod error;
pub mod reader;
pub mod writer;

mod styles;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
pub use writer::XlsxWriter;
