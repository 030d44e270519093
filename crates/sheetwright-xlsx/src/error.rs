//! Errors raised while reading or writing an xlsx package

use thiserror::Error;

/// Result type for xlsx operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

#[derive(Debug, Error)]
pub enum XlsxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a zip archive, or an entry is damaged
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The archive is not an OOXML package, or the workbook cannot be stored as one
    #[error("Invalid XLSX format: {0}")]
    InvalidFormat(String),

    /// A part the workbook refers to is absent from the archive
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// A cell or style entry carries a value that cannot be interpreted
    #[error("Bad value in {part}: {message}")]
    Parse { part: String, message: String },

    /// The model rejected what the file describes (sheet name, cell position)
    #[error(transparent)]
    Model(#[from] sheetwright_core::Error),
}

impl XlsxError {
    pub(crate) fn parse<P: Into<String>, M: Into<String>>(part: P, message: M) -> Self {
        XlsxError::Parse {
            part: part.into(),
            message: message.into(),
        }
    }
}
