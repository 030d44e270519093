//! XLSX writer

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::{escape_xml, XlsxStyleTable};
use sheetwright_core::{CellAddress, CellValue, Workbook, Worksheet};

/// Encode characters XML cannot carry verbatim as Excel `_xHHHH_` escapes.
///
/// Control characters (and CR, which XML parsers normalise to LF) are escaped, as is
/// any literal `_` that would otherwise read back as the start of an escape.
fn encode_excel_escapes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.char_indices() {
        match c {
            '\t' | '\n' => out.push(c),
            c if (c as u32) < 0x20 => out.push_str(&format!("_x{:04X}_", c as u32)),
            '_' if looks_like_escape(&s[i..]) => out.push_str("_x005F_"),
            c => out.push(c),
        }
    }
    out
}

/// `true` when `s` starts with `_xHHHH_`
fn looks_like_escape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 7
        && b[1] == b'x'
        && b[2..6].iter().all(u8::is_ascii_hexdigit)
        && b[6] == b'_'
}

/// `<t>` element for a text run, preserving edge whitespace
fn text_element(s: &str) -> String {
    let body = escape_xml(&encode_excel_escapes(s));
    let needs_preserve = s
        .chars()
        .next()
        .is_some_and(char::is_whitespace)
        || s.chars().last().is_some_and(char::is_whitespace);
    if needs_preserve {
        format!("<t xml:space=\"preserve\">{}</t>", body)
    } else {
        format!("<t>{}</t>", body)
    }
}

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        let file = File::create(path)?;
        Self::write(workbook, file)
    }

    /// Write a workbook to a writer
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        if workbook.is_empty() {
            return Err(XlsxError::InvalidFormat(
                "A workbook needs at least one worksheet".into(),
            ));
        }

        let mut zip = zip::ZipWriter::new(writer);

        // Build a workbook-wide style table.
        let style_table = XlsxStyleTable::build(workbook);

        Self::write_content_types(&mut zip, workbook)?;
        Self::write_root_rels(&mut zip)?;
        Self::write_workbook_xml(&mut zip, workbook)?;
        Self::write_workbook_rels(&mut zip, workbook)?;
        Self::write_styles_xml(&mut zip, &style_table)?;

        for (i, sheet) in workbook.worksheets().enumerate() {
            Self::write_worksheet(&mut zip, sheet, i, &style_table)?;
        }

        zip.finish()?;

        log::debug!("Wrote workbook with {} sheet(s)", workbook.sheet_count());
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            ));
        }

        content.push_str("\n</Types>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("_rels/.rels", options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/workbook.xml", options)?;

        let mut content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <bookViews>
        <workbookView activeTab="{}"/>
    </bookViews>
    <sheets>"#,
            workbook.active_sheet()
        );

        for (i, sheet) in workbook.worksheets().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape_xml(sheet.name()),
                i + 1,
                i + 1
            ));
        }

        content.push_str(
            r#"
    </sheets>
</workbook>"#,
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_rels<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/_rels/workbook.xml.rels", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }

        // Styles relationship
        let styles_rid = workbook.sheet_count() + 1;
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
            styles_rid
        ));

        content.push_str("\n</Relationships>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_styles_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        style_table: &XlsxStyleTable,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/styles.xml", options)?;
        let xml = style_table.to_styles_xml();
        zip.write_all(xml.as_bytes())?;
        Ok(())
    }

    fn write_worksheet<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        sheet: &Worksheet,
        index: usize,
        style_table: &XlsxStyleTable,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file(format!("xl/worksheets/sheet{}.xml", index + 1), options)?;

        let content = Self::worksheet_xml(sheet, index, style_table);
        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn worksheet_xml(sheet: &Worksheet, index: usize, style_table: &XlsxStyleTable) -> String {
        let dimension = sheet
            .used_range()
            .map(|r| r.to_a1_string())
            .unwrap_or_else(|| "A1".to_string());

        let mut content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <dimension ref="{}"/>"#,
            dimension
        );

        let widths = sheet.custom_column_widths();
        if !widths.is_empty() {
            content.push_str("\n    <cols>");
            for (col, width) in widths {
                content.push_str(&format!(
                    "\n        <col min=\"{col}\" max=\"{col}\" width=\"{width}\" customWidth=\"1\"/>"
                ));
            }
            content.push_str("\n    </cols>");
        }

        content.push_str("\n    <sheetData>");

        // Write cell data (sparse, row-major)
        let mut current_row: Option<u32> = None;
        for (row, col, cell) in sheet.iter_cells() {
            if current_row != Some(row) {
                if current_row.is_some() {
                    content.push_str("\n        </row>");
                }
                content.push_str(&format!("\n        <row r=\"{}\">", row));
                current_row = Some(row);
            }

            let cell_ref = CellAddress::new(row, col).to_a1_string();
            let xf_id = style_table.xf_id_for(index, cell.style_index);
            let style_attr = if xf_id != 0 {
                format!(" s=\"{}\"", xf_id)
            } else {
                String::new()
            };

            match &cell.value {
                CellValue::Formula { text, cached_value } => {
                    let (type_attr, cached) = match cached_value.as_deref() {
                        Some(value) => Self::value_payload(value),
                        None => ("", String::new()),
                    };
                    content.push_str(&format!(
                        "\n            <c r=\"{}\"{}{}><f>{}</f>{}</c>",
                        cell_ref,
                        style_attr,
                        type_attr,
                        escape_xml(text),
                        cached
                    ));
                }
                CellValue::Text(s) => {
                    content.push_str(&format!(
                        "\n            <c r=\"{}\"{} t=\"inlineStr\"><is>{}</is></c>",
                        cell_ref,
                        style_attr,
                        text_element(s.as_str())
                    ));
                }
                CellValue::Empty => {
                    // Preserve style-only cells
                    if xf_id != 0 {
                        content.push_str(&format!(
                            "\n            <c r=\"{}\"{}/>",
                            cell_ref, style_attr
                        ));
                    }
                }
                value => {
                    let (type_attr, payload) = Self::value_payload(value);
                    content.push_str(&format!(
                        "\n            <c r=\"{}\"{}{}>{}</c>",
                        cell_ref, style_attr, type_attr, payload
                    ));
                }
            }
        }

        if current_row.is_some() {
            content.push_str("\n        </row>");
        }

        content.push_str("\n    </sheetData>\n</worksheet>");
        content
    }

    /// `t` attribute and `<v>` element for a plain (non-formula) value
    fn value_payload(value: &CellValue) -> (&'static str, String) {
        match value {
            CellValue::Number(n) if n.is_finite() => ("", format!("<v>{}</v>", n)),
            CellValue::Number(n) => {
                log::warn!("Writing non-finite number {} as #NUM!", n);
                (" t=\"e\"", "<v>#NUM!</v>".to_string())
            }
            CellValue::Boolean(b) => (" t=\"b\"", format!("<v>{}</v>", u8::from(*b))),
            CellValue::Text(s) => (
                " t=\"str\"",
                format!("<v>{}</v>", escape_xml(&encode_excel_escapes(s.as_str()))),
            ),
            CellValue::Empty | CellValue::Formula { .. } => ("", String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::XlsxReader;
    use pretty_assertions::assert_eq;
    use sheetwright_core::Style;
    use std::io::Cursor;

    fn roundtrip(workbook: &Workbook) -> Workbook {
        let mut buf = Cursor::new(Vec::new());
        XlsxWriter::write(workbook, &mut buf).unwrap();
        buf.set_position(0);
        XlsxReader::read(buf).unwrap()
    }

    #[test]
    fn test_encode_excel_escapes() {
        assert_eq!(encode_excel_escapes("a\tb\nc"), "a\tb\nc");
        assert_eq!(encode_excel_escapes("a\rb"), "a_x000D_b");
        assert_eq!(encode_excel_escapes("\u{1}"), "_x0001_");
        assert_eq!(encode_excel_escapes("_x0041_"), "_x005F_x0041_");
        assert_eq!(encode_excel_escapes("snake_case"), "snake_case");
    }

    #[test]
    fn test_text_element_preserves_spaces() {
        assert_eq!(text_element("a&b"), "<t>a&amp;b</t>");
        assert_eq!(
            text_element(" lead"),
            "<t xml:space=\"preserve\"> lead</t>"
        );
    }

    #[test]
    fn test_worksheet_xml_layout() {
        let mut workbook = Workbook::new();
        let sheet = workbook.worksheet_mut(0).unwrap();
        sheet.set_column_width(2, 20.0).unwrap();
        sheet.set_cell_value_at(1, 1, "名前").unwrap();
        sheet.set_cell_value_at(2, 2, 1234.5).unwrap();
        sheet.set_cell_style_at(3, 1, &Style::new().bold(true)).unwrap();

        let table = XlsxStyleTable::build(&workbook);
        let xml = XlsxWriter::worksheet_xml(workbook.worksheet(0).unwrap(), 0, &table);

        assert!(xml.contains("<dimension ref=\"A1:B3\"/>"));
        assert!(xml.contains("<col min=\"2\" max=\"2\" width=\"20\" customWidth=\"1\"/>"));
        assert!(xml.find("<cols>").unwrap() < xml.find("<sheetData>").unwrap());
        assert!(xml.contains("<c r=\"A1\" t=\"inlineStr\"><is><t>名前</t></is></c>"));
        assert!(xml.contains("<row r=\"2\">"));
        assert!(xml.contains("<c r=\"B2\"><v>1234.5</v></c>"));
        assert!(xml.contains("<c r=\"A3\" s=\"1\"/>"));
    }

    #[test]
    fn test_roundtrip_values() {
        let mut workbook = Workbook::empty();
        workbook.add_worksheet_with_name("R&D <2024>").unwrap();
        let sheet = workbook.worksheet_mut(0).unwrap();
        sheet.set_cell_value("A1", " spaced ").unwrap();
        sheet.set_cell_value("A2", "line1\r\nline2").unwrap();
        sheet.set_cell_value("A3", "_x0041_").unwrap();
        sheet.set_cell_value("B1", true).unwrap();
        sheet.set_cell_value("B2", -0.125).unwrap();
        sheet.set_cell_formula("C1", "=B2*2").unwrap();
        sheet
            .set_cell_value(
                "C2",
                CellValue::Formula {
                    text: "A1&\"!\"".into(),
                    cached_value: Some(Box::new(CellValue::text(" spaced !"))),
                },
            )
            .unwrap();

        let read = roundtrip(&workbook);
        let ws = read.sheet("R&D <2024>").unwrap();

        assert_eq!(ws.get_value("A1").unwrap(), CellValue::text(" spaced "));
        assert_eq!(ws.get_value("A2").unwrap(), CellValue::text("line1\r\nline2"));
        assert_eq!(ws.get_value("A3").unwrap(), CellValue::text("_x0041_"));
        assert_eq!(ws.get_value("B1").unwrap(), CellValue::Boolean(true));
        assert_eq!(ws.get_value("B2").unwrap(), CellValue::Number(-0.125));
        assert_eq!(ws.get_value("C1").unwrap(), CellValue::formula("B2*2"));
        assert_eq!(
            ws.get_value("C2").unwrap(),
            CellValue::Formula {
                text: "A1&\"!\"".into(),
                cached_value: Some(Box::new(CellValue::text(" spaced !"))),
            }
        );
    }

    #[test]
    fn test_roundtrip_sheet_order_and_widths() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet_with_name("データ").unwrap();
        workbook.add_worksheet_with_name("Summary").unwrap();
        workbook
            .sheet_mut("データ")
            .unwrap()
            .set_column_width(3, 15.5)
            .unwrap();

        let read = roundtrip(&workbook);
        assert_eq!(read.sheet_names(), vec!["Sheet1", "データ", "Summary"]);
        assert_eq!(read.sheet("データ").unwrap().column_width(3), 15.5);
    }

    #[test]
    fn test_write_file_and_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");

        let mut workbook = Workbook::new();
        workbook
            .worksheet_mut(0)
            .unwrap()
            .set_cell_value("B3", 7)
            .unwrap();
        XlsxWriter::write_file(&workbook, &path).unwrap();

        let read = XlsxReader::read_file(&path).unwrap();
        assert_eq!(
            read.worksheet(0).unwrap().get_value("B3").unwrap(),
            CellValue::Number(7.0)
        );
    }

    #[test]
    fn test_empty_workbook_is_rejected() {
        let mut buf = Cursor::new(Vec::new());
        let result = XlsxWriter::write(&Workbook::empty(), &mut buf);
        assert!(matches!(result, Err(XlsxError::InvalidFormat(_))));
    }
}
