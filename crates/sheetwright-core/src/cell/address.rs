//! Cell address and range types
//!
//! Three addressing schemes identify a cell: `(row, column)` numbers, `(row, column letters)`
//! and a combined `"B3"` reference. Rows and columns are 1-based everywhere; column letters
//! are a base-26 numeral without a zero digit (`A` = 1, `Z` = 26, `AA` = 27).

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// Convert column letters to a 1-based column index (`A` = 1, `Z` = 26, `AA` = 27).
///
/// Only uppercase `A`-`Z` are accepted. The result is not checked against [`MAX_COLS`];
/// that bound applies when a reference is used to address a cell.
///
/// # Examples
/// ```
/// use sheetwright_core::column_letter_to_index;
///
/// assert_eq!(column_letter_to_index("A").unwrap(), 1);
/// assert_eq!(column_letter_to_index("AA").unwrap(), 27);
/// assert!(column_letter_to_index("1A").is_err());
/// ```
pub fn column_letter_to_index(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(Error::invalid_reference("empty column letters"));
    }

    let mut index: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_uppercase() {
            return Err(Error::invalid_reference(format!(
                "invalid column letter '{}' in '{}'",
                c, letters
            )));
        }
        let digit = c as u32 - 'A' as u32 + 1;
        index = index
            .checked_mul(26)
            .and_then(|n| n.checked_add(digit))
            .ok_or_else(|| {
                Error::invalid_reference(format!("column '{}' is too large", letters))
            })?;
    }

    Ok(index)
}

/// Convert a 1-based column index to letters (1 = `A`, 26 = `Z`, 27 = `AA`).
///
/// # Examples
/// ```
/// use sheetwright_core::column_index_to_letter;
///
/// assert_eq!(column_index_to_letter(28).unwrap(), "AB");
/// assert!(column_index_to_letter(0).is_err());
/// ```
pub fn column_index_to_letter(index: u32) -> Result<String> {
    if index < 1 {
        return Err(Error::invalid_reference(format!(
            "column index must be >= 1, got {}",
            index
        )));
    }

    let mut letters = Vec::new();
    let mut n = index;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();

    // Only ASCII uppercase bytes were pushed
    Ok(letters.into_iter().map(char::from).collect())
}

/// Split an A1 reference (`"B3"`) into `(row, column_index)`.
///
/// The reference must be uppercase letters immediately followed by decimal digits, with
/// nothing before or after. The row must be in `1..=MAX_ROWS` and the column in
/// `1..=MAX_COLS`.
///
/// # Examples
/// ```
/// use sheetwright_core::parse_a1;
///
/// assert_eq!(parse_a1("B3").unwrap(), (3, 2));
/// assert_eq!(parse_a1("AA10").unwrap(), (10, 27));
/// assert!(parse_a1("3B").is_err());
/// ```
pub fn parse_a1(reference: &str) -> Result<(u32, u32)> {
    let split = reference
        .find(|c: char| !c.is_ascii_uppercase())
        .unwrap_or(reference.len());
    let (letters, digits) = reference.split_at(split);

    if letters.is_empty() {
        return Err(Error::invalid_reference(format!(
            "no column letters in '{}'",
            reference
        )));
    }
    if digits.is_empty() {
        return Err(Error::invalid_reference(format!(
            "no row number in '{}'",
            reference
        )));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_reference(format!(
            "unexpected characters in '{}'",
            reference
        )));
    }

    let row: u32 = digits
        .parse()
        .map_err(|_| Error::invalid_reference(format!("invalid row number in '{}'", reference)))?;
    if row == 0 || row > MAX_ROWS {
        return Err(Error::invalid_reference(format!(
            "row number must be in 1..={} in '{}'",
            MAX_ROWS, reference
        )));
    }

    let col = column_letter_to_index(letters)?;
    if col > MAX_COLS {
        return Err(Error::invalid_reference(format!(
            "column '{}' is beyond XFD in '{}'",
            letters, reference
        )));
    }

    Ok((row, col))
}

/// Format `(row, column_index)` as an A1 reference. Inverse of [`parse_a1`].
///
/// # Examples
/// ```
/// use sheetwright_core::format_a1;
///
/// assert_eq!(format_a1(3, 2).unwrap(), "B3");
/// ```
pub fn format_a1(row: u32, col: u32) -> Result<String> {
    if row < 1 {
        return Err(Error::invalid_reference(format!(
            "row number must be >= 1, got {}",
            row
        )));
    }
    let mut result = column_index_to_letter(col)?;
    result.push_str(&row.to_string());
    Ok(result)
}

/// A cell address (e.g., "A1")
///
/// Both coordinates are 1-based, matching the A1 notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    /// Row number (1-based)
    pub row: u32,
    /// Column number (1-based, A=1, B=2, ..., XFD=16384)
    pub col: u32,
}

impl CellAddress {
    /// Create a new cell address without bounds checking
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Create a cell address, checking it lies inside the sheet bounds
    pub fn checked(row: u32, col: u32) -> Result<Self> {
        if row < 1 || row > MAX_ROWS || col < 1 || col > MAX_COLS {
            return Err(Error::invalid_coordinate(row, col));
        }
        Ok(Self { row, col })
    }

    /// Parse a cell address from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use sheetwright_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("B2").unwrap();
    /// assert_eq!(addr.row, 2);
    /// assert_eq!(addr.col, 2);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let (row, col) = parse_a1(s)?;
        Ok(Self { row, col })
    }

    /// Column letters of this address
    pub fn column_letters(&self) -> String {
        column_index_to_letter(self.col).unwrap_or_default()
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", self.column_letters(), self.row)
    }

    /// Create a range from this address to another
    pub fn to(&self, other: CellAddress) -> CellRange {
        CellRange::new(*self, other)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A range of cells (e.g., "A1:B10")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Start address (top-left)
    pub start: CellAddress,
    /// End address (bottom-right)
    pub end: CellAddress,
}

impl CellRange {
    /// Create a new cell range, normalising the corners so `start` is top-left
    pub fn new(start: CellAddress, end: CellAddress) -> Self {
        Self {
            start: CellAddress::new(start.row.min(end.row), start.col.min(end.col)),
            end: CellAddress::new(start.row.max(end.row), start.col.max(end.col)),
        }
    }

    /// Create a range whose corners are already ordered.
    ///
    /// Fails with [`Error::InvalidRange`] when `end` lies above or left of `start`.
    pub fn ordered(start: CellAddress, end: CellAddress) -> Result<Self> {
        if end.row < start.row {
            return Err(Error::InvalidRange(format!(
                "end row {} is before start row {}",
                end.row, start.row
            )));
        }
        if end.col < start.col {
            return Err(Error::InvalidRange(format!(
                "end column {} is before start column {}",
                end.col, start.col
            )));
        }
        Ok(Self { start, end })
    }

    /// Create a range from row/column numbers
    pub fn from_indices(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        Self::new(
            CellAddress::new(start_row, start_col),
            CellAddress::new(end_row, end_col),
        )
    }

    /// Create a single-cell range
    pub fn single(addr: CellAddress) -> Self {
        Self {
            start: addr,
            end: addr,
        }
    }

    /// Split `"A1:B10"` (or a single `"C3"`) into its two corners, as written
    pub fn parse_corners(s: &str) -> Result<(CellAddress, CellAddress)> {
        match s.split_once(':') {
            Some((start, end)) => Ok((CellAddress::parse(start)?, CellAddress::parse(end)?)),
            None => {
                let addr = CellAddress::parse(s)?;
                Ok((addr, addr))
            }
        }
    }

    /// Parse a range from A1:B10 notation
    pub fn parse(s: &str) -> Result<Self> {
        let (start, end) = Self::parse_corners(s)?;
        Ok(Self::new(start, end))
    }

    /// Check if a cell is within this range
    pub fn contains(&self, addr: &CellAddress) -> bool {
        addr.row >= self.start.row
            && addr.row <= self.end.row
            && addr.col >= self.start.col
            && addr.col <= self.end.col
    }

    /// Get the number of rows in the range
    pub fn row_count(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> u32 {
        self.end.col - self.start.col + 1
    }

    /// Get the total number of cells in the range
    pub fn cell_count(&self) -> u64 {
        self.row_count() as u64 * self.col_count() as u64
    }

    /// Iterate over all cell addresses in the range (row by row)
    pub fn cells(&self) -> CellRangeIterator {
        CellRangeIterator {
            range: *self,
            current_row: self.start.row,
            current_col: self.start.col,
        }
    }

    /// Format as A1:B10 string
    pub fn to_a1_string(&self) -> String {
        if self.start == self.end {
            self.start.to_a1_string()
        } else {
            format!("{}:{}", self.start.to_a1_string(), self.end.to_a1_string())
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Iterator over cells in a range
pub struct CellRangeIterator {
    range: CellRange,
    current_row: u32,
    current_col: u32,
}

impl Iterator for CellRangeIterator {
    type Item = CellAddress;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row > self.range.end.row {
            return None;
        }

        let addr = CellAddress::new(self.current_row, self.current_col);

        self.current_col += 1;
        if self.current_col > self.range.end.col {
            self.current_col = self.range.start.col;
            self.current_row += 1;
        }

        Some(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_column_index_to_letter() {
        assert_eq!(column_index_to_letter(1).unwrap(), "A");
        assert_eq!(column_index_to_letter(2).unwrap(), "B");
        assert_eq!(column_index_to_letter(26).unwrap(), "Z");
        assert_eq!(column_index_to_letter(27).unwrap(), "AA");
        assert_eq!(column_index_to_letter(28).unwrap(), "AB");
        assert_eq!(column_index_to_letter(702).unwrap(), "ZZ");
        assert_eq!(column_index_to_letter(703).unwrap(), "AAA");
        assert_eq!(column_index_to_letter(16384).unwrap(), "XFD");
        assert_eq!(column_index_to_letter(18278).unwrap(), "ZZZ");
    }

    #[test]
    fn test_column_letter_to_index() {
        assert_eq!(column_letter_to_index("A").unwrap(), 1);
        assert_eq!(column_letter_to_index("Z").unwrap(), 26);
        assert_eq!(column_letter_to_index("AA").unwrap(), 27);
        assert_eq!(column_letter_to_index("ZZ").unwrap(), 702);
        assert_eq!(column_letter_to_index("XFD").unwrap(), 16384);
        assert_eq!(column_letter_to_index("ZZZ").unwrap(), 18278);
    }

    #[test]
    fn test_column_letter_errors() {
        for bad in ["", "1A", "a", "Ab", "A-", "Ä", " A"] {
            assert!(
                matches!(column_letter_to_index(bad), Err(Error::InvalidReference(_))),
                "expected InvalidReference for {:?}",
                bad
            );
        }
        // 26^7 overflows u32
        assert!(matches!(
            column_letter_to_index("ZZZZZZZZ"),
            Err(Error::InvalidReference(_))
        ));
        assert!(matches!(
            column_index_to_letter(0),
            Err(Error::InvalidReference(_))
        ));
    }

    #[test]
    fn test_parse_a1() {
        assert_eq!(parse_a1("A1").unwrap(), (1, 1));
        assert_eq!(parse_a1("B3").unwrap(), (3, 2));
        assert_eq!(parse_a1("AA10").unwrap(), (10, 27));
        assert_eq!(parse_a1("XFD1048576").unwrap(), (1_048_576, 16_384));
    }

    #[test]
    fn test_parse_a1_errors() {
        for bad in [
            "", "A", "1", "3B", "A0", "B3C", "B 3", "$B$3", "b3", "B3 ", "A1048577", "XFE1",
        ] {
            assert!(
                matches!(parse_a1(bad), Err(Error::InvalidReference(_))),
                "expected InvalidReference for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_format_a1() {
        assert_eq!(format_a1(3, 2).unwrap(), "B3");
        assert_eq!(format_a1(10, 27).unwrap(), "AA10");
        assert!(format_a1(0, 1).is_err());
        assert!(format_a1(1, 0).is_err());
    }

    #[test]
    fn test_cell_address_display() {
        assert_eq!(CellAddress::new(1, 1).to_string(), "A1");
        assert_eq!(CellAddress::new(100, 3).to_string(), "C100");
        assert_eq!("C100".parse::<CellAddress>().unwrap(), CellAddress::new(100, 3));
    }

    #[test]
    fn test_cell_address_checked() {
        assert!(CellAddress::checked(1, 1).is_ok());
        assert_eq!(
            CellAddress::checked(0, 1),
            Err(Error::InvalidCoordinate { row: 0, col: 1 })
        );
        assert!(CellAddress::checked(1, MAX_COLS + 1).is_err());
        assert!(CellAddress::checked(MAX_ROWS + 1, 1).is_err());
    }

    #[test]
    fn test_cell_range_parse() {
        let range = CellRange::parse("A1:B2").unwrap();
        assert_eq!(range.start, CellAddress::new(1, 1));
        assert_eq!(range.end, CellAddress::new(2, 2));

        // Reversed corners are normalised
        let range = CellRange::parse("C3:A1").unwrap();
        assert_eq!(range.to_string(), "A1:C3");

        let range = CellRange::parse("C3").unwrap();
        assert_eq!(range.start, range.end);
    }

    #[test]
    fn test_cell_range_ordered() {
        let a1 = CellAddress::new(1, 1);
        let c3 = CellAddress::new(3, 3);
        assert!(CellRange::ordered(a1, c3).is_ok());
        assert!(matches!(
            CellRange::ordered(c3, a1),
            Err(Error::InvalidRange(_))
        ));
        assert!(matches!(
            CellRange::ordered(CellAddress::new(1, 3), CellAddress::new(3, 1)),
            Err(Error::InvalidRange(_))
        ));
    }

    #[test]
    fn test_cell_range_contains() {
        let range = CellRange::parse("B2:D4").unwrap();

        assert!(range.contains(&CellAddress::new(2, 2)));
        assert!(range.contains(&CellAddress::new(4, 4)));
        assert!(!range.contains(&CellAddress::new(1, 1)));
        assert!(!range.contains(&CellAddress::new(5, 2)));
    }

    #[test]
    fn test_cell_range_iterator() {
        let range = CellRange::parse("A1:B2").unwrap();
        let cells: Vec<_> = range.cells().collect();

        assert_eq!(
            cells,
            vec![
                CellAddress::new(1, 1),
                CellAddress::new(1, 2),
                CellAddress::new(2, 1),
                CellAddress::new(2, 2),
            ]
        );
        assert_eq!(range.cell_count(), 4);
    }

    #[test]
    fn test_letters_roundtrip_through_zzz() {
        for n in 1..=18_278u32 {
            let letters = column_index_to_letter(n).unwrap();
            assert_eq!(column_letter_to_index(&letters).unwrap(), n);
        }
    }

    proptest! {
        #[test]
        fn prop_index_letter_bijection(n in 1u32..=u32::MAX) {
            let letters = column_index_to_letter(n).unwrap();
            prop_assert_eq!(column_letter_to_index(&letters).unwrap(), n);
        }

        #[test]
        fn prop_letters_are_canonical(s in "[A-Z]{1,4}") {
            let index = column_letter_to_index(&s).unwrap();
            prop_assert_eq!(column_index_to_letter(index).unwrap(), s);
        }

        #[test]
        fn prop_a1_roundtrip(row in 1u32..=MAX_ROWS, col in 1u32..=MAX_COLS) {
            let reference = format_a1(row, col).unwrap();
            prop_assert_eq!(parse_a1(&reference).unwrap(), (row, col));
        }
    }
}
