//! XLSX reader

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::read_styles_xml;
use sheetwright_core::style::Style;
use sheetwright_core::{
    is_valid_column_width, CellAddress, CellValue, Workbook, Worksheet, MAX_COLS, MAX_ROWS,
};

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel uses this format to encode special characters in XML:
/// - `_x000d_` = CR (carriage return)
/// - `_x000a_` = LF (line feed)
/// - `_x0009_` = Tab
/// - `_x005f_` = Underscore (escaped underscore)
fn decode_excel_escapes(s: &str) -> String {
    if !s.contains("_x") {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];

        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push('_');
                rest = &candidate[1..];
            }
        }
    }

    result.push_str(rest);
    result
}

fn attr_string(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

fn attr_parse<T: std::str::FromStr>(e: &BytesStart<'_>, key: &[u8]) -> Option<T> {
    attr_string(e, key).and_then(|v| v.parse().ok())
}

fn attr_flag(e: &BytesStart<'_>, key: &[u8]) -> bool {
    attr_string(e, key).is_some_and(|v| v == "1" || v == "true")
}

/// Shared lookup tables needed while reading a worksheet
struct SheetContext<'a> {
    shared_strings: &'a [String],
    styles: &'a [Style],
}

/// Cell element being assembled from `<c>` and its children
#[derive(Debug, Default)]
struct PendingCell {
    reference: Option<String>,
    cell_type: Option<String>,
    style: Option<u32>,
    value: Option<String>,
    formula: Option<String>,
}

impl PendingCell {
    fn from_element(e: &BytesStart<'_>) -> Self {
        Self {
            reference: attr_string(e, b"r"),
            cell_type: attr_string(e, b"t"),
            style: attr_parse(e, b"s"),
            value: None,
            formula: None,
        }
    }
}

/// Which text node the worksheet parser is collecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    None,
    Value,
    Formula,
    InlineText,
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let file = File::open(path)?;
        Self::read(file)
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an XLSX file
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let styles = Self::read_styles(&mut archive)?;
        let (sheet_info, active_tab) = Self::read_workbook_xml(&mut archive)?;
        let sheet_paths = Self::read_workbook_rels(&mut archive)?;

        let ctx = SheetContext {
            shared_strings: &shared_strings,
            styles: &styles,
        };

        let mut workbook = Workbook::empty();

        for (name, r_id) in &sheet_info {
            let Some(path) = sheet_paths.get(r_id) else {
                log::warn!("Sheet '{}' has no worksheet relationship ({}), skipping", name, r_id);
                continue;
            };

            let mut worksheet = Worksheet::new(name.as_str());
            Self::read_worksheet(&mut archive, path, &mut worksheet, &ctx)?;
            workbook.add_existing_worksheet(worksheet)?;
        }

        // Ensure at least one sheet exists
        if workbook.is_empty() {
            workbook.add_worksheet_with_name("Sheet1")?;
        }
        if active_tab < workbook.sheet_count() {
            workbook.set_active_sheet(active_tab)?;
        }

        log::debug!(
            "Read workbook with {} sheet(s), {} shared string(s), {} cell style(s)",
            workbook.sheet_count(),
            shared_strings.len(),
            styles.len()
        );

        Ok(workbook)
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(false);

        let mut buf = Vec::new();
        let mut current = String::new();
        let mut in_si = false;
        let mut in_t = false;
        // Phonetic runs (<rPh>) carry furigana, not cell text
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current.clear();
                    }
                    b"rPh" => in_phonetic = true,
                    b"t" if in_si && !in_phonetic => in_t = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.name().as_ref() == b"si" => strings.push(String::new()),
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current));
                        current.clear();
                        in_si = false;
                    }
                    b"rPh" => in_phonetic = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    current.push_str(&e.unescape()?);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    fn read_styles<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> XlsxResult<Vec<Style>> {
        match archive.by_name("xl/styles.xml") {
            Ok(file) => read_styles_xml(file),
            Err(_) => Ok(vec![Style::default()]),
        }
    }

    /// Read workbook.xml to get sheet names with their rIds, and the active tab
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<(Vec<(String, String)>, usize)> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();
        let mut active_tab = 0;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"workbookView" =>
                {
                    active_tab = attr_parse(&e, b"activeTab").unwrap_or(0);
                }
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"sheet" => {
                    if let (Some(name), Some(r_id)) = (attr_string(&e, b"name"), attr_string(&e, b"r:id")) {
                        sheets.push((name, r_id));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok((sheets, active_tab))
    }

    /// Read workbook.xml.rels to get sheet file paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let id = attr_string(&e, b"Id");
                    let target = attr_string(&e, b"Target");
                    let rel_type = attr_string(&e, b"Type");

                    // Only include worksheet relationships
                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            // Target is relative to xl/ unless absolute
                            let full_path = match target.strip_prefix('/') {
                                Some(absolute) => absolute.to_string(),
                                None => format!("xl/{}", target),
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read a worksheet part into `worksheet`
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        worksheet: &mut Worksheet,
        ctx: &SheetContext<'_>,
    ) -> XlsxResult<()> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(false);

        let mut buf = Vec::new();
        let mut cell: Option<PendingCell> = None;
        let mut capture = Capture::None;
        let mut in_inline_str = false;

        // Position of the last row/cell, for elements without an `r` attribute
        let mut row_cursor: u32 = 0;
        let mut col_cursor: u32 = 0;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"row" => {
                        row_cursor = Self::row_number(&e, row_cursor)?;
                        col_cursor = 0;
                    }
                    b"c" => cell = Some(PendingCell::from_element(&e)),
                    b"v" if cell.is_some() => capture = Capture::Value,
                    b"f" if cell.is_some() => capture = Capture::Formula,
                    b"is" if cell.is_some() => in_inline_str = true,
                    b"t" if in_inline_str => capture = Capture::InlineText,
                    _ => {}
                },
                Ok(Event::Text(e)) if capture != Capture::None => {
                    let text = e.unescape()?;
                    if let Some(cell) = cell.as_mut() {
                        let slot = match capture {
                            Capture::Formula => &mut cell.formula,
                            _ => &mut cell.value,
                        };
                        slot.get_or_insert_with(String::new).push_str(&text);
                    }
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"c" => {
                        if let Some(pending) = cell.take() {
                            let addr = Self::cell_position(&pending, row_cursor, col_cursor)?;
                            row_cursor = addr.row;
                            col_cursor = addr.col;
                            Self::process_cell(worksheet, addr, pending, ctx)?;
                        }
                    }
                    b"v" | b"f" => capture = Capture::None,
                    b"t" if in_inline_str => capture = Capture::None,
                    b"is" => in_inline_str = false,
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"row" => {
                        row_cursor = Self::row_number(&e, row_cursor)?;
                        col_cursor = 0;
                    }
                    b"col" => Self::apply_column_width(worksheet, &e)?,
                    b"c" => {
                        // Empty cell element (may still carry a style)
                        let pending = PendingCell::from_element(&e);
                        let addr = Self::cell_position(&pending, row_cursor, col_cursor)?;
                        row_cursor = addr.row;
                        col_cursor = addr.col;
                        Self::process_cell(worksheet, addr, pending, ctx)?;
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// `<row r="..">`, or the row after `cursor` when `r` is absent
    fn row_number(e: &BytesStart<'_>, cursor: u32) -> XlsxResult<u32> {
        match attr_string(e, b"r") {
            Some(r) => r
                .trim()
                .parse()
                .ok()
                .filter(|row| (1..=MAX_ROWS).contains(row))
                .ok_or_else(|| XlsxError::parse("worksheet", format!("row number '{}'", r))),
            None => Ok(cursor.saturating_add(1)),
        }
    }

    /// Resolve a cell's position from its `r` attribute, or from the cursor when absent
    fn cell_position(cell: &PendingCell, row: u32, col: u32) -> XlsxResult<CellAddress> {
        match cell.reference.as_deref() {
            Some(r) => CellAddress::parse(r).map_err(|e| {
                XlsxError::parse("worksheet", format!("cell reference '{}': {}", r, e))
            }),
            None => Ok(CellAddress::checked(row.max(1), col + 1)?),
        }
    }

    /// `<col min=".." max=".." width=".." customWidth="1"/>`
    fn apply_column_width(worksheet: &mut Worksheet, e: &BytesStart<'_>) -> XlsxResult<()> {
        let min: Option<u32> = attr_parse(e, b"min");
        let max: Option<u32> = attr_parse(e, b"max");
        let width: Option<f64> = attr_parse(e, b"width");

        if !attr_flag(e, b"customWidth") {
            return Ok(());
        }

        if let (Some(min), Some(max), Some(width)) = (min, max, width) {
            if !is_valid_column_width(width) {
                log::warn!("Ignoring width {} for columns {}..={}", width, min, max);
                return Ok(());
            }
            for col in min.max(1)..=max.min(MAX_COLS) {
                worksheet.set_column_width(col, width)?;
            }
        }
        Ok(())
    }

    /// Store a parsed cell in the worksheet
    fn process_cell(
        worksheet: &mut Worksheet,
        addr: CellAddress,
        cell: PendingCell,
        ctx: &SheetContext<'_>,
    ) -> XlsxResult<()> {
        let cell_type = cell.cell_type.as_deref();

        if let Some(formula) = cell.formula.filter(|f| !f.is_empty()) {
            // A bad cached value is dropped, the formula is kept
            let cached = cell
                .value
                .as_deref()
                .and_then(|v| Self::typed_value(cell_type, v, ctx.shared_strings).ok());
            let text = formula.strip_prefix('=').unwrap_or(&formula).to_string();

            worksheet.set_cell_value_at(
                addr.row,
                addr.col,
                CellValue::Formula {
                    text,
                    cached_value: cached.map(Box::new),
                },
            )?;
        } else if let Some(raw) = cell.value.as_deref() {
            let value = Self::typed_value(cell_type, raw, ctx.shared_strings)?;
            worksheet.set_cell_value_at(addr.row, addr.col, value)?;
        }

        if let Some(s) = cell.style.filter(|&s| s != 0) {
            let style = ctx
                .styles
                .get(s as usize)
                .ok_or_else(|| XlsxError::parse("worksheet", format!("style index {} out of bounds", s)))?;
            worksheet.set_cell_style_at(addr.row, addr.col, style)?;
        }

        Ok(())
    }

    /// Interpret a `<v>`/`<is>` payload according to the cell's `t` attribute
    fn typed_value(
        cell_type: Option<&str>,
        raw: &str,
        shared_strings: &[String],
    ) -> XlsxResult<CellValue> {
        let value = match cell_type {
            Some("s") => {
                let idx: usize = raw.trim().parse().map_err(|_| {
                    XlsxError::parse("sharedStrings.xml", format!("index '{}' is not a number", raw))
                })?;
                let s = shared_strings.get(idx).ok_or_else(|| {
                    XlsxError::parse("sharedStrings.xml", format!("index {} out of bounds", idx))
                })?;
                CellValue::text(s.as_str())
            }

            Some("b") => {
                let raw = raw.trim();
                CellValue::Boolean(raw == "1" || raw.eq_ignore_ascii_case("true"))
            }

            // Error literals such as #DIV/0! are kept as their text
            Some("e") => CellValue::text(raw),

            Some("inlineStr") | Some("str") => CellValue::text(decode_excel_escapes(raw)),

            // ISO 8601 date, stored as a serial number
            Some("d") => parse_iso_datetime(raw.trim())
                .map(CellValue::from)
                .unwrap_or_else(|| CellValue::text(raw)),

            None | Some("n") => match raw.trim().parse::<f64>() {
                Ok(n) => CellValue::Number(n),
                Err(_) => CellValue::text(raw),
            },

            Some(other) => {
                log::warn!("Unknown cell type '{}', reading value as text", other);
                CellValue::text(raw)
            }
        };
        Ok(value)
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
