//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellData, CellRange, CellStorage, CellValue};
use crate::error::{Error, Result};
use crate::style::{Style, StylePool};
use crate::{MAX_COLS, MAX_COLUMN_WIDTH, MAX_ROWS};

/// Whether `width` can be stored as a column width
pub fn is_valid_column_width(width: f64) -> bool {
    (0.0..=MAX_COLUMN_WIDTH).contains(&width)
}

/// A worksheet (single sheet in a workbook)
///
/// Rows and columns are 1-based. Every mutating call checks that the position lies in
/// `1..=MAX_ROWS` x `1..=MAX_COLS`.
#[derive(Debug)]
pub struct Worksheet {
    name: String,
    cells: CellStorage,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Cell Access ===

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&CellData>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cells.get(addr.row, addr.col))
    }

    /// Get cell value by address; `Empty` if never written
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    /// Get cell value by row and column; `Empty` if never written
    pub fn get_value_at(&self, row: u32, col: u32) -> CellValue {
        self.cells
            .get(row, col)
            .map(|c| c.value.clone())
            .unwrap_or_default()
    }

    /// Values of a rectangular range, one `Vec` per row in ascending row order
    pub fn range_values(&self, range: &CellRange) -> Vec<Vec<CellValue>> {
        (range.start.row..=range.end.row)
            .map(|row| {
                (range.start.col..=range.end.col)
                    .map(|col| self.get_value_at(row, col))
                    .collect()
            })
            .collect()
    }

    /// Get a cell's style index by row/column.
    ///
    /// Returns 0 if the cell does not exist or has the default style.
    pub fn cell_style_index_at(&self, row: u32, col: u32) -> u32 {
        self.cells.get(row, col).map(|c| c.style_index).unwrap_or(0)
    }

    /// Get a style by its index in this worksheet's style pool.
    pub fn style_by_index(&self, style_index: u32) -> Option<&Style> {
        self.cells.style_pool().get(style_index)
    }

    /// Get the non-default style applied to a cell, if any.
    pub fn cell_style_at(&self, row: u32, col: u32) -> Option<&Style> {
        match self.cell_style_index_at(row, col) {
            0 => None,
            idx => self.style_by_index(idx),
        }
    }

    /// Get the non-default style applied to a cell by address, if any.
    pub fn cell_style(&self, address: &str) -> Result<Option<&Style>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell_style_at(addr.row, addr.col))
    }

    // === Cell Modification ===

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by row and column, keeping the cell's style
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u32,
        value: V,
    ) -> Result<()> {
        validate_cell_position(row, col)?;
        self.cells.set_value(row, col, value.into());
        Ok(())
    }

    /// Set a cell formula by address string
    pub fn set_cell_formula(&mut self, address: &str, formula: &str) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_formula_at(addr.row, addr.col, formula)
    }

    /// Set a cell formula by row and column. A leading `=` is dropped.
    pub fn set_cell_formula_at(&mut self, row: u32, col: u32, formula: &str) -> Result<()> {
        validate_cell_position(row, col)?;
        let text = formula.strip_prefix('=').unwrap_or(formula);
        self.cells.set_value(row, col, CellValue::formula(text));
        Ok(())
    }

    /// Set a cell style by address string
    pub fn set_cell_style(&mut self, address: &str, style: &Style) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_style_at(addr.row, addr.col, style)
    }

    /// Replace a cell's style, keeping its value
    pub fn set_cell_style_at(&mut self, row: u32, col: u32, style: &Style) -> Result<()> {
        validate_cell_position(row, col)?;
        let style_index = self.cells.style_pool_mut().get_or_insert(style.clone());
        self.cells.set_style(row, col, style_index);
        Ok(())
    }

    /// Modify a cell's current style in place, keeping its value
    ///
    /// ```
    /// use sheetwright_core::{BorderStyle, NumberFormat, Worksheet};
    ///
    /// let mut sheet = Worksheet::new("Data");
    /// sheet.update_cell_style_at(2, 1, |s| s.border = BorderStyle::thin()).unwrap();
    /// sheet.update_cell_style_at(2, 1, |s| s.number_format = NumberFormat::thousands()).unwrap();
    ///
    /// let style = sheet.cell_style_at(2, 1).unwrap();
    /// assert_eq!(style.border, BorderStyle::thin());
    /// assert_eq!(style.number_format.format_string(), "#,##0");
    /// ```
    pub fn update_cell_style_at<F>(&mut self, row: u32, col: u32, edit: F) -> Result<()>
    where
        F: FnOnce(&mut Style),
    {
        validate_cell_position(row, col)?;
        let base = self.cell_style_index_at(row, col);
        let style_index = self.cells.style_pool_mut().derive(base, edit);
        self.cells.set_style(row, col, style_index);
        Ok(())
    }

    // === Dimensions ===

    /// Get the used range (bounds of all stored cells)
    pub fn used_range(&self) -> Option<CellRange> {
        self.cells
            .used_bounds()
            .map(|(min_row, min_col, max_row, max_col)| {
                CellRange::from_indices(min_row, min_col, max_row, max_col)
            })
    }

    /// Width of a column in characters
    pub fn column_width(&self, col: u32) -> f64 {
        self.cells.column_width(col)
    }

    /// Set the width of a column in characters
    ///
    /// The width must lie in `0.0..=MAX_COLUMN_WIDTH`.
    pub fn set_column_width(&mut self, col: u32, width: f64) -> Result<()> {
        if col < 1 || col > MAX_COLS {
            return Err(Error::invalid_coordinate(1, col));
        }
        if !is_valid_column_width(width) {
            return Err(Error::InvalidColumnWidth { col, width });
        }
        self.cells.set_column_width(col, width);
        Ok(())
    }

    /// Columns with a custom width
    pub fn custom_column_widths(&self) -> &BTreeMap<u32, f64> {
        self.cells.custom_column_widths()
    }

    // === Iteration ===

    /// Get the number of stored cells
    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    /// Check if the worksheet is empty
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over all stored cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u32, &CellData)> {
        self.cells.iter()
    }

    /// Style pool referenced by the cells' style indices
    pub fn style_pool(&self) -> &StylePool {
        self.cells.style_pool()
    }
}

fn validate_cell_position(row: u32, col: u32) -> Result<()> {
    if row < 1 || row > MAX_ROWS || col < 1 || col > MAX_COLS {
        return Err(Error::invalid_coordinate(row, col));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{BorderStyle, NumberFormat};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_worksheet() {
        let ws = Worksheet::new("データ");
        assert_eq!(ws.name(), "データ");
        assert!(ws.is_empty());
        assert!(ws.used_range().is_none());
    }

    #[test]
    fn test_set_cell_values() {
        let mut ws = Worksheet::new("Test");

        ws.set_cell_value("A1", "Hello").unwrap();
        ws.set_cell_value("B1", 42.0).unwrap();
        ws.set_cell_value("C1", true).unwrap();

        assert_eq!(ws.get_value("A1").unwrap().as_text(), Some("Hello"));
        assert_eq!(ws.get_value("B1").unwrap().as_number(), Some(42.0));
        assert_eq!(ws.get_value("C1").unwrap().as_bool(), Some(true));
        assert_eq!(ws.get_value_at(1, 2), CellValue::Number(42.0));
        assert_eq!(ws.get_value("Z9").unwrap(), CellValue::Empty);
    }

    #[test]
    fn test_position_bounds() {
        let mut ws = Worksheet::new("Test");

        assert_eq!(
            ws.set_cell_value_at(0, 1, 1),
            Err(Error::InvalidCoordinate { row: 0, col: 1 })
        );
        assert!(ws.set_cell_value_at(1, 0, 1).is_err());
        assert!(ws.set_cell_value_at(MAX_ROWS + 1, 1, 1).is_err());
        assert!(ws.set_cell_value_at(1, MAX_COLS + 1, 1).is_err());
        assert!(ws.set_cell_value_at(MAX_ROWS, MAX_COLS, 1).is_ok());
        assert!(matches!(
            ws.set_cell_value("1A", 1),
            Err(Error::InvalidReference(_))
        ));
    }

    #[test]
    fn test_set_cell_formula() {
        let mut ws = Worksheet::new("Test");

        ws.set_cell_formula("A1", "=SUM(B1:B10)").unwrap();

        let value = ws.get_value("A1").unwrap();
        assert!(value.is_formula());
        assert_eq!(value.formula_text(), Some("SUM(B1:B10)"));
    }

    #[test]
    fn test_update_style_keeps_value() {
        let mut ws = Worksheet::new("Test");

        ws.set_cell_value_at(2, 2, 1234.0).unwrap();
        ws.update_cell_style_at(2, 2, |s| s.border = BorderStyle::thin())
            .unwrap();
        ws.update_cell_style_at(2, 2, |s| s.number_format = NumberFormat::thousands())
            .unwrap();

        assert_eq!(ws.get_value_at(2, 2), CellValue::Number(1234.0));
        let style = ws.cell_style_at(2, 2).unwrap();
        assert_eq!(style.border, BorderStyle::thin());
        assert_eq!(style.number_format, NumberFormat::BuiltIn(3));

        // Writing a new value does not drop the style
        ws.set_cell_value_at(2, 2, 5.0).unwrap();
        assert!(ws.cell_style_at(2, 2).is_some());
    }

    #[test]
    fn test_range_values() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell_value("A2", 1).unwrap();
        ws.set_cell_value("C3", "x").unwrap();

        let range = CellRange::parse("A2:C3").unwrap();
        assert_eq!(
            ws.range_values(&range),
            vec![
                vec![CellValue::Number(1.0), CellValue::Empty, CellValue::Empty],
                vec![CellValue::Empty, CellValue::Empty, CellValue::text("x")],
            ]
        );
    }

    #[test]
    fn test_used_range() {
        let mut ws = Worksheet::new("Test");

        ws.set_cell_value_at(5, 3, "A").unwrap();
        ws.set_cell_value_at(10, 7, "B").unwrap();

        let range = ws.used_range().unwrap();
        assert_eq!(range.to_string(), "C5:G10");
    }

    #[test]
    fn test_column_widths() {
        let mut ws = Worksheet::new("Test");

        assert!((ws.column_width(1) - 8.43).abs() < 0.001);
        ws.set_column_width(3, 15.0).unwrap();
        assert_eq!(ws.column_width(3), 15.0);
        assert!(ws.set_column_width(0, 15.0).is_err());
    }

    #[test]
    fn test_rejects_unusable_widths() {
        let mut ws = Worksheet::new("Test");

        for width in [f64::NAN, f64::INFINITY, -1.0, 255.5] {
            assert!(matches!(
                ws.set_column_width(2, width),
                Err(Error::InvalidColumnWidth { col: 2, .. })
            ));
        }
        assert!(ws.custom_column_widths().is_empty());

        ws.set_column_width(2, 0.0).unwrap();
        ws.set_column_width(3, MAX_COLUMN_WIDTH).unwrap();
        assert_eq!(ws.custom_column_widths().len(), 2);
    }
}
