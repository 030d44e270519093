//! # sheetwright
//!
//! A small convenience layer for reading and writing `.xlsx` workbooks.
//!
//! [`WorkbookManager`] owns one [`Workbook`] and exposes cell-level operations where a
//! column may be given as an index (`3`) or as letters (`"C"`), and cells as `"C2"`.
//!
//! ## Features
//!
//! - Create sheets with a styled header row
//! - Write cells by (row, column), (row, letters) or A1 reference, with display formats
//! - Read single cells and rectangular ranges
//! - Load and save XLSX files (Office Open XML)
//! - Formulas in loaded files are preserved with their cached results (never evaluated)
//!
//! ## Example
//!
//! ```rust
//! use sheetwright::prelude::*;
//!
//! let mut excel = WorkbookManager::new();
//! excel.create_sheet("データ", ["ID", "名前", "値"]).unwrap();
//!
//! excel.write_cell_a1("データ", "A3", 2).unwrap();
//! excel.write_cell_a1("データ", "B3", "サンプル2").unwrap();
//!
//! let rows = excel.read_range("データ", 3, "A", 3, "B").unwrap();
//! assert_eq!(rows, vec![vec![CellValue::Number(2.0), CellValue::text("サンプル2")]]);
//!
//! // excel.save_as("sample.xlsx").unwrap();
//! ```

pub mod error;
pub mod manager;
pub mod options;
pub mod prelude;

pub use error::{Error, ErrorKind, Result};
pub use manager::{Column, WorkbookManager};
pub use options::{ManagerOptions, WriteOptions, DEFAULT_HEADER_COLUMN_WIDTH};

// Re-export core types
pub use sheetwright_core::{
    column_index_to_letter, column_letter_to_index, format_a1, parse_a1, Alignment, BorderEdge,
    BorderLineStyle, BorderStyle, CellAddress, CellData, CellRange, CellValue, Color, FillStyle,
    FontStyle, HorizontalAlignment, NumberFormat, PatternType, SharedString, Style, StylePool,
    VerticalAlignment, Workbook, Worksheet, MAX_COLS, MAX_COLUMN_WIDTH, MAX_ROWS,
    MAX_SHEET_NAME_LEN,
};

// Re-export I/O types
pub use sheetwright_xlsx::{XlsxError, XlsxReader, XlsxWriter};

use std::path::Path;

/// Extension trait for Workbook to add file I/O
pub trait WorkbookExt: Sized {
    /// Open a workbook from an `.xlsx` file
    fn open<P: AsRef<Path>>(path: P) -> Result<Self>;

    /// Save the workbook to an `.xlsx` file
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

impl WorkbookExt for Workbook {
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook> {
        let path = path.as_ref();
        XlsxReader::read_file(path).map_err(|source| Error::Load {
            path: path.to_path_buf(),
            source,
        })
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        XlsxWriter::write_file(self, path).map_err(|source| Error::Save {
            path: path.to_path_buf(),
            source,
        })
    }
}
