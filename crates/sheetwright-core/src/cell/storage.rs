//! Cell storage implementation
//!
//! Sparse storage for worksheet cells. Only non-empty cells are stored, using a row-based
//! BTreeMap structure so that iteration is always row-major.

use std::collections::BTreeMap;

use super::CellValue;
use crate::style::StylePool;

/// Default column width in characters
pub const DEFAULT_COLUMN_WIDTH: f64 = 8.43;

/// Complete data for a single cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellData {
    /// The cell's value
    pub value: CellValue,
    /// Index into the style pool (0 = default style)
    pub style_index: u32,
}

impl CellData {
    /// Create a new cell with a value and default style
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            style_index: 0,
        }
    }

    /// Create a new cell with a value and style
    pub fn with_style(value: CellValue, style_index: u32) -> Self {
        Self { value, style_index }
    }

    /// Create an empty cell
    pub fn empty() -> Self {
        Self::new(CellValue::Empty)
    }

    /// Check if this cell is effectively empty (no value and default style)
    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.style_index == 0
    }
}

impl Default for CellData {
    fn default() -> Self {
        Self::empty()
    }
}

/// Sparse row-based storage for worksheet cells
///
/// Structure: `BTreeMap<row, BTreeMap<col, CellData>>`, both 1-based.
#[derive(Debug)]
pub struct CellStorage {
    rows: BTreeMap<u32, BTreeMap<u32, CellData>>,

    /// Styles referenced by `CellData::style_index`
    pub(crate) style_pool: StylePool,

    /// Custom column widths in characters
    column_widths: BTreeMap<u32, f64>,
}

impl CellStorage {
    /// Create a new empty cell storage
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            style_pool: StylePool::new(),
            column_widths: BTreeMap::new(),
        }
    }

    /// Get a cell
    pub fn get(&self, row: u32, col: u32) -> Option<&CellData> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Get a mutable cell
    pub fn get_mut(&mut self, row: u32, col: u32) -> Option<&mut CellData> {
        self.rows.get_mut(&row).and_then(|r| r.get_mut(&col))
    }

    /// Set a cell
    ///
    /// If the cell data is empty (no value, default style), the cell is removed.
    pub fn set(&mut self, row: u32, col: u32, data: CellData) {
        if data.is_empty() {
            self.remove(row, col);
        } else {
            self.rows.entry(row).or_default().insert(col, data);
        }
    }

    /// Set just the cell value (preserving style)
    pub fn set_value(&mut self, row: u32, col: u32, value: CellValue) {
        match self.get_mut(row, col) {
            Some(cell) => {
                cell.value = value;
                if cell.is_empty() {
                    self.remove(row, col);
                }
            }
            None => self.set(row, col, CellData::new(value)),
        }
    }

    /// Set just the cell style (preserving value)
    pub fn set_style(&mut self, row: u32, col: u32, style_index: u32) {
        match self.get_mut(row, col) {
            Some(cell) => {
                cell.style_index = style_index;
                if cell.is_empty() {
                    self.remove(row, col);
                }
            }
            None => self.set(row, col, CellData::with_style(CellValue::Empty, style_index)),
        }
    }

    /// Remove a cell
    pub fn remove(&mut self, row: u32, col: u32) -> Option<CellData> {
        let row_map = self.rows.get_mut(&row)?;
        let result = row_map.remove(&col);
        if row_map.is_empty() {
            self.rows.remove(&row);
        }
        result
    }

    /// Get the number of stored cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(|r| r.len()).sum()
    }

    /// Check if storage is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the bounds of used cells
    ///
    /// Returns (min_row, min_col, max_row, max_col) or None if empty
    pub fn used_bounds(&self) -> Option<(u32, u32, u32, u32)> {
        let min_row = *self.rows.keys().next()?;
        let max_row = *self.rows.keys().next_back()?;

        let mut min_col = u32::MAX;
        let mut max_col = 0u32;
        for row_data in self.rows.values() {
            if let Some(&col) = row_data.keys().next() {
                min_col = min_col.min(col);
            }
            if let Some(&col) = row_data.keys().next_back() {
                max_col = max_col.max(col);
            }
        }

        Some((min_row, min_col, max_row, max_col))
    }

    /// Iterate over all cells in row order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, &CellData)> {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, data)| (row, col, data)))
    }

    /// Width of a column, falling back to the default
    pub fn column_width(&self, col: u32) -> f64 {
        self.column_widths
            .get(&col)
            .copied()
            .unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    /// Set a custom column width in characters
    pub fn set_column_width(&mut self, col: u32, width: f64) {
        self.column_widths.insert(col, width);
    }

    /// Columns with a custom width, in column order
    pub fn custom_column_widths(&self) -> &BTreeMap<u32, f64> {
        &self.column_widths
    }

    /// Get the style pool
    pub fn style_pool(&self) -> &StylePool {
        &self.style_pool
    }

    /// Get the mutable style pool
    pub fn style_pool_mut(&mut self) -> &mut StylePool {
        &mut self.style_pool
    }
}

impl Default for CellStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut storage = CellStorage::new();

        storage.set(1, 1, CellData::new(CellValue::Number(42.0)));
        let cell = storage.get(1, 1).unwrap();
        assert_eq!(cell.value.as_number(), Some(42.0));

        assert!(storage.get(2, 2).is_none());
    }

    #[test]
    fn test_empty_cells_not_stored() {
        let mut storage = CellStorage::new();

        storage.set(1, 1, CellData::new(CellValue::Number(42.0)));
        assert_eq!(storage.cell_count(), 1);

        storage.set(1, 1, CellData::empty());
        assert_eq!(storage.cell_count(), 0);
        assert!(storage.get(1, 1).is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_value_and_style_are_independent() {
        let mut storage = CellStorage::new();

        storage.set_style(2, 3, 4);
        assert_eq!(storage.get(2, 3).unwrap().value, CellValue::Empty);

        storage.set_value(2, 3, CellValue::text("x"));
        assert_eq!(storage.get(2, 3).unwrap().style_index, 4);

        storage.set_style(2, 3, 0);
        storage.set_value(2, 3, CellValue::Empty);
        assert!(storage.get(2, 3).is_none());
    }

    #[test]
    fn test_used_bounds() {
        let mut storage = CellStorage::new();

        assert!(storage.used_bounds().is_none());

        storage.set(5, 3, CellData::new(CellValue::Number(1.0)));
        storage.set(10, 7, CellData::new(CellValue::Number(2.0)));
        storage.set(2, 1, CellData::new(CellValue::Number(3.0)));

        assert_eq!(storage.used_bounds(), Some((2, 1, 10, 7)));
    }

    #[test]
    fn test_column_widths() {
        let mut storage = CellStorage::new();

        assert_eq!(storage.column_width(1), DEFAULT_COLUMN_WIDTH);
        storage.set_column_width(3, 15.0);
        assert_eq!(storage.column_width(3), 15.0);
        assert_eq!(storage.custom_column_widths().len(), 1);
    }

    #[test]
    fn test_iteration() {
        let mut storage = CellStorage::new();

        storage.set(2, 1, CellData::new(CellValue::Number(3.0)));
        storage.set(1, 2, CellData::new(CellValue::Number(2.0)));
        storage.set(1, 1, CellData::new(CellValue::Number(1.0)));

        let cells: Vec<_> = storage.iter().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(cells, vec![(1, 1), (1, 2), (2, 1)]);
    }
}
