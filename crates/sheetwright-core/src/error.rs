//! Error types for sheetwright-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sheetwright-core
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Malformed column letters or A1 reference
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// Row or column outside `1..=MAX_ROWS` / `1..=MAX_COLS`
    #[error("Invalid coordinate: row {row}, column {col}")]
    InvalidCoordinate { row: i64, col: i64 },

    /// Column width that is negative, not finite, or above `MAX_COLUMN_WIDTH`
    #[error("Invalid width {width} for column {col}")]
    InvalidColumnWidth { col: u32, width: f64 },

    /// Range whose end lies before its start
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Sheet index out of bounds
    #[error("Sheet index {0} out of bounds (count: {1})")]
    SheetOutOfBounds(usize, usize),

    /// Sheet not found by name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),
}

impl Error {
    /// Create an [`Error::InvalidReference`] from anything printable
    pub fn invalid_reference<S: Into<String>>(msg: S) -> Self {
        Error::InvalidReference(msg.into())
    }

    /// Create an [`Error::InvalidCoordinate`]
    pub fn invalid_coordinate(row: impl Into<i64>, col: impl Into<i64>) -> Self {
        Error::InvalidCoordinate {
            row: row.into(),
            col: col.into(),
        }
    }
}
