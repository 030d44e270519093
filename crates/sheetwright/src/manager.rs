//! [`WorkbookManager`]: the cell-level convenience API over a [`Workbook`]

use std::fmt;
use std::path::{Path, PathBuf};

use sheetwright_core::{
    column_letter_to_index, is_valid_column_width, parse_a1, BorderStyle, CellAddress,
    CellRange, CellValue, NumberFormat, Workbook, Worksheet, MAX_COLS, MAX_ROWS,
};

use crate::error::{Error, Result};
use crate::options::{ManagerOptions, WriteOptions};
use crate::WorkbookExt;

/// A column given either by 1-based index or by letters (`"A"`, `"AA"`, ...)
///
/// Integer and string types convert into it, so the manager's methods take
/// `impl Into<Column>`:
///
/// ```
/// use sheetwright::Column;
///
/// assert_eq!(Column::from(3).resolve(1).unwrap(), 3);
/// assert_eq!(Column::from("AA").resolve(1).unwrap(), 27);
/// assert!(Column::from("1A").resolve(1).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Column {
    /// 1-based column index
    Index(i64),
    /// Uppercase column letters
    Letters(String),
}

impl Column {
    /// Resolve to a 1-based index in `1..=MAX_COLS`
    ///
    /// `row` is only used to describe the position in an out-of-range error.
    pub fn resolve(&self, row: u32) -> Result<u32> {
        match self {
            Column::Index(n) => u32::try_from(*n)
                .ok()
                .filter(|&col| (1..=MAX_COLS).contains(&col))
                .ok_or_else(|| sheetwright_core::Error::invalid_coordinate(row, *n).into()),
            Column::Letters(letters) => {
                let col = column_letter_to_index(letters)?;
                if col > MAX_COLS {
                    return Err(sheetwright_core::Error::invalid_reference(format!(
                        "column '{}' is beyond XFD",
                        letters
                    ))
                    .into());
                }
                Ok(col)
            }
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Index(n) => write!(f, "{}", n),
            Column::Letters(s) => write!(f, "{}", s),
        }
    }
}

macro_rules! column_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Column {
            fn from(n: $t) -> Self {
                Column::Index(i64::from(n))
            }
        })*
    };
}

column_from_int!(i32, i64, u16, u32);

impl From<usize> for Column {
    fn from(n: usize) -> Self {
        Column::Index(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<&str> for Column {
    fn from(s: &str) -> Self {
        Column::Letters(s.to_string())
    }
}

impl From<String> for Column {
    fn from(s: String) -> Self {
        Column::Letters(s)
    }
}

impl From<&String> for Column {
    fn from(s: &String) -> Self {
        Column::Letters(s.clone())
    }
}

impl From<char> for Column {
    fn from(c: char) -> Self {
        Column::Letters(c.to_string())
    }
}

/// Owns one workbook and the path it is saved to
///
/// All rows and columns are 1-based. Every method that takes a sheet name fails with
/// `SheetNotFound` before looking at its other arguments.
///
/// ```
/// use sheetwright::prelude::*;
///
/// let mut excel = WorkbookManager::new();
/// excel.create_sheet("データ", ["ID", "名前", "値"]).unwrap();
///
/// excel.write_cell("データ", 2, 1, 1).unwrap();
/// excel.write_cell("データ", 2, "B", "サンプル1").unwrap();
/// excel
///     .write_cell_with("データ", 2, 3, 1000, &WriteOptions::new().number_format("#,##0"))
///     .unwrap();
///
/// assert_eq!(excel.read_cell_a1("データ", "B2").unwrap(), CellValue::text("サンプル1"));
/// assert_eq!(excel.cell_format("データ", 2, "C").unwrap().as_deref(), Some("#,##0"));
/// ```
#[derive(Debug)]
pub struct WorkbookManager {
    workbook: Workbook,
    path: Option<PathBuf>,
    options: ManagerOptions,
}

impl WorkbookManager {
    /// Fresh in-memory workbook (one sheet, `Sheet1`) with no file path
    pub fn new() -> Self {
        Self::from_workbook(Workbook::new())
    }

    /// Wrap an existing workbook; it has no file path until [`save_as`](Self::save_as)
    pub fn from_workbook(workbook: Workbook) -> Self {
        Self {
            workbook,
            path: None,
            options: ManagerOptions::default(),
        }
    }

    /// Load `path` if it exists, otherwise start a fresh workbook that will be saved there
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let workbook = if path.exists() {
            let workbook = Workbook::open(path)?;
            log::info!("Loaded existing workbook '{}'", path.display());
            workbook
        } else {
            log::info!("Creating new workbook '{}'", path.display());
            Workbook::new()
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            ..Self::from_workbook(workbook)
        })
    }

    /// Load `path`, failing when it is missing or unreadable
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let workbook = Workbook::open(path)?;
        log::info!("Loaded workbook '{}'", path.display());

        Ok(Self {
            path: Some(path.to_path_buf()),
            ..Self::from_workbook(workbook)
        })
    }

    /// Replace the decoration options
    pub fn with_options(mut self, options: ManagerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ManagerOptions {
        &self.options
    }

    /// The underlying workbook
    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    /// The underlying workbook, for edits this API does not cover
    pub fn workbook_mut(&mut self) -> &mut Workbook {
        &mut self.workbook
    }

    pub fn into_workbook(self) -> Workbook {
        self.workbook
    }

    /// Path used by [`save`](Self::save)
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.workbook.sheet_names()
    }

    /// Whether a sheet of that name exists; like every lookup, ignores letter case
    pub fn has_sheet(&self, name: &str) -> bool {
        self.workbook.sheet(name).is_ok()
    }

    // === Sheets ===

    /// Create a sheet and write `headers` into row 1 from column 1
    ///
    /// Header cells get the configured header style and their columns the configured
    /// width. Fails with `DuplicateSheet` when the name is taken (case-insensitively).
    /// Headers and width are checked first, so a failed call adds no sheet.
    pub fn create_sheet<I, V>(&mut self, name: &str, headers: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let headers: Vec<CellValue> = headers.into_iter().map(Into::into).collect();
        if headers.len() > MAX_COLS as usize {
            return Err(
                sheetwright_core::Error::invalid_coordinate(1, i64::from(MAX_COLS) + 1).into(),
            );
        }
        if let Some(width) = self.options.header_column_width {
            if !is_valid_column_width(width) {
                return Err(sheetwright_core::Error::InvalidColumnWidth { col: 1, width }.into());
            }
        }

        self.workbook.add_worksheet_with_name(name)?;
        let sheet = self.workbook.sheet_mut(name)?;

        let count = headers.len();
        for (col, header) in (1u32..).zip(headers) {
            sheet.set_cell_value_at(1, col, header)?;
            if let Some(style) = &self.options.header_style {
                sheet.set_cell_style_at(1, col, style)?;
            }
            if let Some(width) = self.options.header_column_width {
                sheet.set_column_width(col, width)?;
            }
        }

        log::debug!("Created sheet '{}' with {} header(s)", name, count);
        Ok(())
    }

    /// Create a sheet with no header row
    pub fn add_sheet(&mut self, name: &str) -> Result<()> {
        self.create_sheet(name, std::iter::empty::<CellValue>())
    }

    // === Writing ===

    /// Write a block of rows starting at `start_row`, column 1
    ///
    /// Cells written before a failing one stay written. A block running past the last
    /// sheet row fails with `InvalidCoordinate` at the first row that does not fit.
    pub fn write_rows<R, I, V>(&mut self, sheet: &str, rows: R, start_row: u32) -> Result<()>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let border = self.options.cell_border.as_ref();
        let ws = self.workbook.sheet_mut(sheet)?;
        CellAddress::checked(start_row, 1)?;

        let mut count = 0usize;
        let mut row = start_row;
        for values in rows {
            if row > MAX_ROWS {
                return Err(sheetwright_core::Error::invalid_coordinate(row, 1).into());
            }
            for (col, value) in (1u32..).zip(values) {
                put_cell(ws, row, col, value.into(), border, None)?;
                count += 1;
            }
            // row <= MAX_ROWS here
            row += 1;
        }

        log::debug!("Wrote {} cell(s) to '{}' from row {}", count, sheet, start_row);
        Ok(())
    }

    /// Write one cell; `column` is an index or letters
    pub fn write_cell<C, V>(&mut self, sheet: &str, row: u32, column: C, value: V) -> Result<()>
    where
        C: Into<Column>,
        V: Into<CellValue>,
    {
        self.write_cell_with(sheet, row, column, value, &WriteOptions::default())
    }

    /// Write one cell, applying `options` (display format)
    pub fn write_cell_with<C, V>(
        &mut self,
        sheet: &str,
        row: u32,
        column: C,
        value: V,
        options: &WriteOptions,
    ) -> Result<()>
    where
        C: Into<Column>,
        V: Into<CellValue>,
    {
        let border = self.options.cell_border.as_ref();
        let ws = self.workbook.sheet_mut(sheet)?;
        let col = column.into().resolve(row)?;
        let addr = CellAddress::checked(row, col)?;

        put_cell(ws, addr.row, addr.col, value.into(), border, options.format_code())?;
        log::debug!("Wrote {}!{}", sheet, addr);
        Ok(())
    }

    /// Write one cell addressed as `"B3"`
    pub fn write_cell_a1<V: Into<CellValue>>(
        &mut self,
        sheet: &str,
        reference: &str,
        value: V,
    ) -> Result<()> {
        self.write_cell_a1_with(sheet, reference, value, &WriteOptions::default())
    }

    /// Write one cell addressed as `"B3"`, applying `options`
    pub fn write_cell_a1_with<V: Into<CellValue>>(
        &mut self,
        sheet: &str,
        reference: &str,
        value: V,
        options: &WriteOptions,
    ) -> Result<()> {
        let border = self.options.cell_border.as_ref();
        let ws = self.workbook.sheet_mut(sheet)?;
        let (row, col) = parse_a1(reference)?;

        put_cell(ws, row, col, value.into(), border, options.format_code())?;
        log::debug!("Wrote {}!{}", sheet, reference);
        Ok(())
    }

    // === Reading ===

    /// Value of one cell; [`CellValue::Empty`] if it was never written
    pub fn read_cell<C: Into<Column>>(&self, sheet: &str, row: u32, column: C) -> Result<CellValue> {
        let ws = self.workbook.sheet(sheet)?;
        let addr = resolve_address(row, column)?;
        Ok(ws.get_value_at(addr.row, addr.col))
    }

    /// Value of the cell at `"B3"`
    pub fn read_cell_a1(&self, sheet: &str, reference: &str) -> Result<CellValue> {
        let ws = self.workbook.sheet(sheet)?;
        let (row, col) = parse_a1(reference)?;
        Ok(ws.get_value_at(row, col))
    }

    /// Values of an inclusive rectangle, one `Vec` per row in ascending order
    ///
    /// Fails with `InvalidRange` when an end lies before its start.
    pub fn read_range<C1, C2>(
        &self,
        sheet: &str,
        row_start: u32,
        column_start: C1,
        row_end: u32,
        column_end: C2,
    ) -> Result<Vec<Vec<CellValue>>>
    where
        C1: Into<Column>,
        C2: Into<Column>,
    {
        let ws = self.workbook.sheet(sheet)?;
        let start = resolve_address(row_start, column_start)?;
        let end = resolve_address(row_end, column_end)?;
        let range = CellRange::ordered(start, end)?;
        Ok(ws.range_values(&range))
    }

    /// Values of a range written as `"A2:C3"`
    pub fn read_range_a1(&self, sheet: &str, range: &str) -> Result<Vec<Vec<CellValue>>> {
        let ws = self.workbook.sheet(sheet)?;
        let (start, end) = CellRange::parse_corners(range)?;
        let range = CellRange::ordered(start, end)?;
        Ok(ws.range_values(&range))
    }

    /// Display format code of a cell, or `None` for `General`
    pub fn cell_format<C: Into<Column>>(
        &self,
        sheet: &str,
        row: u32,
        column: C,
    ) -> Result<Option<String>> {
        let ws = self.workbook.sheet(sheet)?;
        let addr = resolve_address(row, column)?;
        Ok(ws
            .cell_style_at(addr.row, addr.col)
            .map(|style| &style.number_format)
            .filter(|format| !format.is_general())
            .map(|format| format.format_string().to_string()))
    }

    // === Persistence ===

    /// Save to [`path`](Self::path)
    pub fn save(&self) -> Result<()> {
        let path = self.path.as_deref().ok_or(Error::MissingPath)?;
        self.workbook.save(path)?;
        log::info!("Saved workbook to '{}'", path.display());
        Ok(())
    }

    /// Save to `path` and make it the manager's path
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.workbook.save(path)?;
        log::info!("Saved workbook to '{}'", path.display());
        self.path = Some(path.to_path_buf());
        Ok(())
    }
}

impl Default for WorkbookManager {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_address<C: Into<Column>>(row: u32, column: C) -> Result<CellAddress> {
    let col = column.into().resolve(row)?;
    Ok(CellAddress::checked(row, col)?)
}

/// Set a value and merge the border / display format into the cell's style
fn put_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u32,
    value: CellValue,
    border: Option<&BorderStyle>,
    format: Option<&str>,
) -> Result<()> {
    sheet.set_cell_value_at(row, col, value)?;

    if border.is_some() || format.is_some() {
        sheet.update_cell_style_at(row, col, |style| {
            if let Some(border) = border {
                style.border = border.clone();
            }
            if let Some(code) = format {
                style.number_format = NumberFormat::from_code(code);
            }
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_column_resolve() {
        assert_eq!(Column::from(1u16).resolve(1).unwrap(), 1);
        assert_eq!(Column::from('Z').resolve(1).unwrap(), 26);
        assert_eq!(Column::from("XFD").resolve(1).unwrap(), MAX_COLS);

        assert_eq!(
            Column::from(0).resolve(4).unwrap_err().kind(),
            ErrorKind::InvalidCoordinate
        );
        assert_eq!(
            Column::from(-3i64).resolve(4).unwrap_err().kind(),
            ErrorKind::InvalidCoordinate
        );
        assert_eq!(
            Column::from(MAX_COLS + 1).resolve(4).unwrap_err().kind(),
            ErrorKind::InvalidCoordinate
        );
        assert_eq!(
            Column::from("XFE").resolve(1).unwrap_err().kind(),
            ErrorKind::InvalidReference
        );
        assert_eq!(
            Column::from("b").resolve(1).unwrap_err().kind(),
            ErrorKind::InvalidReference
        );
        assert_eq!(Column::from("AB").to_string(), "AB");
    }

    #[test]
    fn test_sheet_checked_before_column() {
        let mut excel = WorkbookManager::new();
        let err = excel.write_cell("Missing", 1, "1A", 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SheetNotFound);
    }

    #[test]
    fn test_plain_options_leave_style_alone() {
        let mut excel = WorkbookManager::new().with_options(ManagerOptions::plain());
        excel.create_sheet("S", ["h"]).unwrap();
        excel.write_cell("S", 2, 1, 5).unwrap();

        let ws = excel.workbook().sheet("S").unwrap();
        assert!(ws.cell_style_at(1, 1).is_none());
        assert!(ws.cell_style_at(2, 1).is_none());
        assert!(ws.custom_column_widths().is_empty());
    }

    #[test]
    fn test_format_merges_with_header_style() {
        let mut excel = WorkbookManager::new();
        excel.create_sheet("S", ["Total"]).unwrap();
        excel
            .write_cell_a1_with("S", "A1", 10, &WriteOptions::new().number_format("0.00"))
            .unwrap();

        let style = excel
            .workbook()
            .sheet("S")
            .unwrap()
            .cell_style_at(1, 1)
            .unwrap();
        assert!(style.font.bold);
        assert_eq!(style.number_format.format_string(), "0.00");
    }
}
