//! Workbook type - the main document structure

use crate::error::{Error, Result};
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// Characters that may not appear in a sheet name
const INVALID_SHEET_NAME_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];

/// A workbook (spreadsheet document)
///
/// An ordered collection of uniquely named worksheets. Names are compared
/// case-insensitively, as spreadsheet applications do.
#[derive(Debug)]
pub struct Workbook {
    worksheets: Vec<Worksheet>,
    active_sheet: usize,
}

impl Workbook {
    /// Create a new workbook with one worksheet named `Sheet1`
    pub fn new() -> Self {
        Self {
            worksheets: vec![Worksheet::new("Sheet1")],
            active_sheet: 0,
        }
    }

    /// Create an empty workbook with no worksheets
    pub fn empty() -> Self {
        Self {
            worksheets: Vec::new(),
            active_sheet: 0,
        }
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a mutable worksheet by index
    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    /// Get a worksheet by name, ignoring letter case
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| same_sheet_name(ws.name(), name))
    }

    /// Get a mutable worksheet by name, ignoring letter case
    pub fn worksheet_by_name_mut(&mut self, name: &str) -> Option<&mut Worksheet> {
        self.worksheets
            .iter_mut()
            .find(|ws| same_sheet_name(ws.name(), name))
    }

    /// Get a worksheet by name, or [`Error::SheetNotFound`]
    pub fn sheet(&self, name: &str) -> Result<&Worksheet> {
        self.worksheet_by_name(name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    /// Get a mutable worksheet by name, or [`Error::SheetNotFound`]
    pub fn sheet_mut(&mut self, name: &str) -> Result<&mut Worksheet> {
        self.worksheet_by_name_mut(name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    /// Get the index of a worksheet by name
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.worksheets
            .iter()
            .position(|ws| same_sheet_name(ws.name(), name))
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.worksheets.iter().map(|ws| ws.name()).collect()
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Add a new worksheet with specified name, returning its index
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.validate_sheet_name(name)?;

        let index = self.worksheets.len();
        self.worksheets.push(Worksheet::new(name));
        Ok(index)
    }

    /// Add an existing worksheet to the workbook
    pub fn add_existing_worksheet(&mut self, worksheet: Worksheet) -> Result<usize> {
        self.validate_sheet_name(worksheet.name())?;
        let index = self.worksheets.len();
        self.worksheets.push(worksheet);
        Ok(index)
    }

    /// Get the active sheet index
    pub fn active_sheet(&self) -> usize {
        self.active_sheet
    }

    /// Set the active sheet index
    pub fn set_active_sheet(&mut self, index: usize) -> Result<()> {
        if index >= self.worksheets.len() {
            return Err(Error::SheetOutOfBounds(index, self.worksheets.len()));
        }
        self.active_sheet = index;
        Ok(())
    }

    /// Check name rules, and that no sheet already has the name in any letter case
    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }
        if let Some(c) = name.chars().find(|c| INVALID_SHEET_NAME_CHARS.contains(c)) {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name cannot contain '{}'",
                c
            )));
        }

        if self.worksheet_by_name(name).is_some() {
            return Err(Error::DuplicateSheetName(name.into()));
        }

        Ok(())
    }
}

/// Sheet names are compared the way spreadsheet applications do, ignoring case
fn same_sheet_name(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_workbook() {
        let wb = Workbook::new();
        assert_eq!(wb.sheet_count(), 1);
        assert_eq!(wb.sheet_names(), vec!["Sheet1"]);
        assert!(Workbook::empty().is_empty());
    }

    #[test]
    fn test_add_worksheets() {
        let mut wb = Workbook::new();

        let idx = wb.add_worksheet_with_name("データ").unwrap();
        assert_eq!(idx, 1);
        assert_eq!(wb.sheet("データ").unwrap().name(), "データ");
        assert_eq!(wb.sheet_index("データ"), Some(1));
    }

    #[test]
    fn test_missing_sheet() {
        let mut wb = Workbook::new();
        assert_eq!(
            wb.sheet("Nope").err(),
            Some(Error::SheetNotFound("Nope".into()))
        );
        assert!(wb.sheet_mut("Nope").is_err());
    }

    #[test]
    fn test_duplicate_name() {
        let mut wb = Workbook::new();

        assert_eq!(
            wb.add_worksheet_with_name("SHEET1"),
            Err(Error::DuplicateSheetName("SHEET1".into()))
        );
        assert!(wb.add_worksheet_with_name("sheet1").is_err());
    }

    #[test]
    fn test_lookup_ignores_case() {
        let mut wb = Workbook::new();
        wb.add_worksheet_with_name("Data").unwrap();

        assert_eq!(wb.sheet("DATA").unwrap().name(), "Data");
        assert_eq!(wb.sheet_index("sheet1"), Some(0));
        assert!(wb.sheet_mut("data").is_ok());
        assert_eq!(wb.sheet_names(), vec!["Sheet1", "Data"]);
    }

    #[test]
    fn test_invalid_sheet_name() {
        let mut wb = Workbook::new();

        assert!(wb.add_worksheet_with_name("").is_err());
        assert!(wb.add_worksheet_with_name("Sheet/1").is_err());
        assert!(wb.add_worksheet_with_name("Sheet:1").is_err());
        assert!(wb.add_worksheet_with_name("Sheet[1]").is_err());

        let long_name = "A".repeat(MAX_SHEET_NAME_LEN + 1);
        assert!(matches!(
            wb.add_worksheet_with_name(&long_name),
            Err(Error::InvalidSheetName(_))
        ));

        // Length is counted in characters, not bytes
        let japanese = "売".repeat(MAX_SHEET_NAME_LEN);
        assert!(wb.add_worksheet_with_name(&japanese).is_ok());
    }

    #[test]
    fn test_active_sheet() {
        let mut wb = Workbook::new();
        wb.add_worksheet_with_name("b").unwrap();
        assert_eq!(wb.active_sheet(), 0);
        wb.set_active_sheet(1).unwrap();

        assert_eq!(wb.sheet_names(), vec!["Sheet1", "b"]);
        assert_eq!(wb.active_sheet(), 1);
        assert!(matches!(wb.set_active_sheet(5), Err(Error::SheetOutOfBounds(5, 2))));
    }
}
