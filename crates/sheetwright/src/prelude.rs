//! Prelude module - common imports for sheetwright users
//!
//! ```rust
//! use sheetwright::prelude::*;
//! ```

pub use crate::{
    // Style types
    Alignment,
    BorderLineStyle,
    BorderStyle,
    CellAddress,
    CellRange,
    // Cell types
    CellValue,
    Color,
    Column,
    // Error types
    Error,
    ErrorKind,
    FillStyle,
    FontStyle,
    HorizontalAlignment,
    ManagerOptions,
    NumberFormat,
    Result,
    Style,
    VerticalAlignment,
    // Main types
    Workbook,
    // Extension traits
    WorkbookExt,
    WorkbookManager,
    Worksheet,
    WriteOptions,
    // I/O types
    XlsxReader,
    XlsxWriter,
    // Sheet bounds
    MAX_COLS,
    MAX_COLUMN_WIDTH,
    MAX_ROWS,
};
