//! Error type for the sheetwright facade

use std::path::PathBuf;

use sheetwright_xlsx::XlsxError;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`WorkbookManager`](crate::WorkbookManager) and [`WorkbookExt`](crate::WorkbookExt)
#[derive(Debug, Error)]
pub enum Error {
    /// Error from the workbook model (references, coordinates, sheet names)
    #[error(transparent)]
    Core(#[from] sheetwright_core::Error),

    /// Reading a workbook file failed
    #[error("failed to load '{}': {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },

    /// Writing a workbook file failed
    #[error("failed to save '{}': {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },

    /// `save` was called on a manager that has no file path
    #[error("no file path to save to; use save_as")]
    MissingPath,
}

/// Broad classification of an [`Error`], for callers that branch on the cause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Referenced sheet name absent
    SheetNotFound,
    /// Malformed column letters or A1 string, or letters beyond `XFD`
    InvalidReference,
    /// Row or column < 1 or beyond the sheet bounds, or an unusable column width
    InvalidCoordinate,
    /// End before start in a range read
    InvalidRange,
    /// Load or save failed, or there is no path to save to
    IoFailure,
    /// A sheet with that name already exists
    DuplicateSheet,
    /// Empty, too long, or forbidden characters
    InvalidSheetName,
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        use sheetwright_core::Error as Core;

        match self {
            Error::Core(e) => match e {
                Core::InvalidReference(_) => ErrorKind::InvalidReference,
                Core::InvalidCoordinate { .. } | Core::InvalidColumnWidth { .. } => {
                    ErrorKind::InvalidCoordinate
                }
                Core::InvalidRange(_) => ErrorKind::InvalidRange,
                Core::SheetNotFound(_) | Core::SheetOutOfBounds(..) => ErrorKind::SheetNotFound,
                Core::InvalidSheetName(_) => ErrorKind::InvalidSheetName,
                Core::DuplicateSheetName(_) => ErrorKind::DuplicateSheet,
            },
            Error::Load { .. } | Error::Save { .. } | Error::MissingPath => ErrorKind::IoFailure,
        }
    }
}
