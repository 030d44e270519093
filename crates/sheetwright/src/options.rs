//! Configuration for [`WorkbookManager`](crate::WorkbookManager)

use sheetwright_core::{BorderStyle, Style};

/// Width given to header columns by default, in characters
pub const DEFAULT_HEADER_COLUMN_WIDTH: f64 = 15.0;

/// How the manager decorates the cells it writes
///
/// The default gives header rows a bold, centred, grey style with 15-character columns and
/// puts a thin border on every written cell. [`ManagerOptions::plain`] turns all of that off.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerOptions {
    /// Style applied to header cells written by `create_sheet`
    pub header_style: Option<Style>,
    /// Width set on every header column
    pub header_column_width: Option<f64>,
    /// Border merged into every cell written by `write_cell*` and `write_rows`
    pub cell_border: Option<BorderStyle>,
}

impl ManagerOptions {
    /// No header style, no column widths, no borders
    pub fn plain() -> Self {
        Self {
            header_style: None,
            header_column_width: None,
            cell_border: None,
        }
    }

    pub fn with_header_style(mut self, style: Option<Style>) -> Self {
        self.header_style = style;
        self
    }

    pub fn with_header_column_width(mut self, width: Option<f64>) -> Self {
        self.header_column_width = width;
        self
    }

    pub fn with_cell_border(mut self, border: Option<BorderStyle>) -> Self {
        self.cell_border = border;
        self
    }
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            header_style: Some(Style::header()),
            header_column_width: Some(DEFAULT_HEADER_COLUMN_WIDTH),
            cell_border: Some(BorderStyle::thin()),
        }
    }
}

/// Per-call options for `write_cell_with` / `write_cell_a1_with`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Display format code such as `#,##0`; `None` or empty leaves the format unchanged
    pub number_format: Option<String>,
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display format code
    pub fn number_format<S: Into<String>>(mut self, code: S) -> Self {
        self.number_format = Some(code.into());
        self
    }

    /// The format code, if one was given and it is non-empty
    pub(crate) fn format_code(&self) -> Option<&str> {
        self.number_format.as_deref().filter(|code| !code.is_empty())
    }
}
