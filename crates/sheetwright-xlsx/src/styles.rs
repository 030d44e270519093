//! XLSX styles (styles.xml) read/write helpers

use std::collections::HashMap;
use std::io::{BufReader, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use sheetwright_core::style::{
    Alignment, BorderEdge, BorderLineStyle, BorderStyle, Color, FillStyle, FontStyle,
    HorizontalAlignment, NumberFormat, PatternType, Style, VerticalAlignment,
};
use sheetwright_core::Workbook;

/// Escape text for use in XML content or attribute values
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// === Writing ===

/// Workbook-wide `cellXfs` table built from the per-sheet style pools
#[derive(Debug)]
pub(crate) struct XlsxStyleTable {
    /// Global, deduplicated styles. Index corresponds to the cellXfs index (xfId).
    styles: Vec<Style>,
    /// Per-worksheet mapping: local worksheet style index -> global xfId.
    sheet_maps: Vec<HashMap<u32, u32>>,
}

#[derive(Debug, Clone, Copy)]
struct ResolvedXfIds {
    font_id: u32,
    fill_id: u32,
    border_id: u32,
    num_fmt_id: u32,
}

/// Find `value` in `table`, appending it when missing
fn intern<T: Clone + Eq + std::hash::Hash>(
    ids: &mut HashMap<T, u32>,
    table: &mut Vec<T>,
    value: &T,
) -> u32 {
    if let Some(&id) = ids.get(value) {
        return id;
    }
    let id = table.len() as u32;
    table.push(value.clone());
    ids.insert(value.clone(), id);
    id
}

impl XlsxStyleTable {
    pub(crate) fn build(workbook: &Workbook) -> Self {
        let mut styles = vec![Style::default()];
        let mut style_to_xf: HashMap<Style, u32> = HashMap::new();
        style_to_xf.insert(Style::default(), 0);

        let mut sheet_maps = Vec::with_capacity(workbook.sheet_count());

        for sheet in workbook.worksheets() {
            let mut map: HashMap<u32, u32> = HashMap::new();
            map.insert(0, 0);

            for (_row, _col, cell) in sheet.iter_cells() {
                let local_idx = cell.style_index;
                if map.contains_key(&local_idx) {
                    continue;
                }

                let style = sheet
                    .style_by_index(local_idx)
                    .cloned()
                    .unwrap_or_default();
                let xf_id = intern(&mut style_to_xf, &mut styles, &style);
                map.insert(local_idx, xf_id);
            }

            sheet_maps.push(map);
        }

        Self { styles, sheet_maps }
    }

    pub(crate) fn xf_id_for(&self, sheet_index: usize, local_style_index: u32) -> u32 {
        self.sheet_maps
            .get(sheet_index)
            .and_then(|m| m.get(&local_style_index).copied())
            .unwrap_or(0)
    }

    pub(crate) fn to_styles_xml(&self) -> String {
        let mut fonts = vec![FontStyle::default()];
        let mut font_ids: HashMap<FontStyle, u32> = HashMap::new();
        font_ids.insert(FontStyle::default(), 0);

        // The first two fills must be none and gray125
        let mut fills = vec![
            FillStyle::None,
            FillStyle::pattern(PatternType::Gray125, Color::Auto, Color::Auto),
        ];
        let mut fill_ids: HashMap<FillStyle, u32> = HashMap::new();
        fill_ids.insert(FillStyle::None, 0);

        let mut borders = vec![BorderStyle::default()];
        let mut border_ids: HashMap<BorderStyle, u32> = HashMap::new();
        border_ids.insert(BorderStyle::default(), 0);

        let mut numfmt_ids: HashMap<String, u32> = HashMap::new();
        let mut numfmts: Vec<(u32, String)> = Vec::new();
        let mut next_numfmt_id = NumberFormat::FIRST_CUSTOM_ID;

        let resolved: Vec<ResolvedXfIds> = self
            .styles
            .iter()
            .map(|style| {
                let num_fmt_id = match &style.number_format {
                    NumberFormat::General => 0,
                    NumberFormat::BuiltIn(id) => *id,
                    NumberFormat::Custom(code) => *numfmt_ids.entry(code.clone()).or_insert_with(|| {
                        let id = next_numfmt_id;
                        next_numfmt_id += 1;
                        numfmts.push((id, code.clone()));
                        id
                    }),
                };

                ResolvedXfIds {
                    font_id: intern(&mut font_ids, &mut fonts, &style.font),
                    fill_id: intern(&mut fill_ids, &mut fills, &style.fill),
                    border_id: intern(&mut border_ids, &mut borders, &style.border),
                    num_fmt_id,
                }
            })
            .collect();

        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        if !numfmts.is_empty() {
            xml.push_str(&format!("\n  <numFmts count=\"{}\">", numfmts.len()));
            for (id, code) in &numfmts {
                xml.push_str(&format!(
                    "\n    <numFmt numFmtId=\"{}\" formatCode=\"{}\"/>",
                    id,
                    escape_xml(code)
                ));
            }
            xml.push_str("\n  </numFmts>");
        }

        xml.push_str(&format!("\n  <fonts count=\"{}\">", fonts.len()));
        for font in &fonts {
            xml.push_str("\n    ");
            xml.push_str(&write_font(font));
        }
        xml.push_str("\n  </fonts>");

        xml.push_str(&format!("\n  <fills count=\"{}\">", fills.len()));
        for fill in &fills {
            xml.push_str("\n    ");
            xml.push_str(&write_fill(fill));
        }
        xml.push_str("\n  </fills>");

        xml.push_str(&format!("\n  <borders count=\"{}\">", borders.len()));
        for border in &borders {
            xml.push_str("\n    ");
            xml.push_str(&write_border(border));
        }
        xml.push_str("\n  </borders>");

        xml.push_str(
            r#"
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>"#,
        );

        xml.push_str(&format!("\n  <cellXfs count=\"{}\">", self.styles.len()));
        for (style, ids) in self.styles.iter().zip(&resolved) {
            xml.push_str("\n    ");
            xml.push_str(&write_xf(style, *ids));
        }
        xml.push_str("\n  </cellXfs>");

        xml.push_str(
            r#"
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>
  <dxfs count="0"/>
  <tableStyles count="0" defaultTableStyle="TableStyleMedium9" defaultPivotStyle="PivotStyleLight16"/>
</styleSheet>"#,
        );
        xml
    }
}

fn write_color(tag: &str, color: &Color) -> String {
    match color {
        Color::Auto => format!("<{tag} indexed=\"64\"/>"),
        Color::Rgb { .. } | Color::Argb { .. } => {
            format!("<{tag} rgb=\"{}\"/>", color.to_argb_hex().unwrap_or_default())
        }
        Color::Indexed(i) => format!("<{tag} indexed=\"{}\"/>", i),
        Color::Theme { index, tint: 0 } => format!("<{tag} theme=\"{}\"/>", index),
        Color::Theme { index, tint } => format!(
            "<{tag} theme=\"{}\" tint=\"{}\"/>",
            index,
            (*tint as f64) / 100.0
        ),
    }
}

fn write_font(font: &FontStyle) -> String {
    let mut s = String::from("<font>");
    if font.bold {
        s.push_str("<b/>");
    }
    if font.italic {
        s.push_str("<i/>");
    }
    if font.strike {
        s.push_str("<strike/>");
    }
    if font.underline {
        s.push_str("<u/>");
    }
    s.push_str(&format!("<sz val=\"{}\"/>", font.size));
    if !font.color.is_auto() {
        s.push_str(&write_color("color", &font.color));
    }
    s.push_str(&format!("<name val=\"{}\"/>", escape_xml(&font.name)));
    s.push_str("</font>");
    s
}

fn write_fill(fill: &FillStyle) -> String {
    match fill {
        FillStyle::None => "<fill><patternFill patternType=\"none\"/></fill>".to_string(),
        FillStyle::Solid { color } => format!(
            "<fill><patternFill patternType=\"solid\">{}<bgColor indexed=\"64\"/></patternFill></fill>",
            write_color("fgColor", color)
        ),
        FillStyle::Pattern {
            pattern,
            foreground,
            background,
        } => format!(
            "<fill><patternFill patternType=\"{}\">{}{}</patternFill></fill>",
            pattern.as_xml_str(),
            write_color("fgColor", foreground),
            write_color("bgColor", background)
        ),
    }
}

fn write_border_edge(tag: &str, edge: &Option<BorderEdge>) -> String {
    match edge {
        Some(e) if e.style != BorderLineStyle::None => format!(
            "<{tag} style=\"{}\">{}</{tag}>",
            e.style.as_xml_str(),
            write_color("color", &e.color)
        ),
        _ => format!("<{tag}/>"),
    }
}

fn write_border(border: &BorderStyle) -> String {
    let mut s = String::from("<border>");
    s.push_str(&write_border_edge("left", &border.left));
    s.push_str(&write_border_edge("right", &border.right));
    s.push_str(&write_border_edge("top", &border.top));
    s.push_str(&write_border_edge("bottom", &border.bottom));
    s.push_str("<diagonal/></border>");
    s
}

fn write_alignment(al: &Alignment) -> String {
    let default = Alignment::default();
    let mut s = String::from("<alignment");
    if al.horizontal != default.horizontal {
        s.push_str(&format!(" horizontal=\"{}\"", al.horizontal.as_xml_str()));
    }
    if al.vertical != default.vertical {
        s.push_str(&format!(" vertical=\"{}\"", al.vertical.as_xml_str()));
    }
    if al.wrap_text {
        s.push_str(" wrapText=\"1\"");
    }
    s.push_str("/>");
    s
}

fn write_xf(style: &Style, ids: ResolvedXfIds) -> String {
    let mut attrs = String::new();
    if ids.num_fmt_id != 0 {
        attrs.push_str(" applyNumberFormat=\"1\"");
    }
    if style.font != FontStyle::default() {
        attrs.push_str(" applyFont=\"1\"");
    }
    if !style.fill.is_none() {
        attrs.push_str(" applyFill=\"1\"");
    }
    if !style.border.is_empty() {
        attrs.push_str(" applyBorder=\"1\"");
    }
    if !style.alignment.is_default() {
        attrs.push_str(" applyAlignment=\"1\"");
    }

    let head = format!(
        "<xf numFmtId=\"{}\" fontId=\"{}\" fillId=\"{}\" borderId=\"{}\" xfId=\"0\"{}",
        ids.num_fmt_id, ids.font_id, ids.fill_id, ids.border_id, attrs
    );

    if style.alignment.is_default() {
        format!("{head}/>")
    } else {
        format!("{head}>{}</xf>", write_alignment(&style.alignment))
    }
}

// === Reading ===

/// Part of styles.xml the parser is currently inside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Other,
    Fonts,
    Fills,
    Borders,
    CellXfs,
    /// Sections this model does not carry (`cellStyleXfs`, `dxfs`, ...)
    Skipped,
}

#[derive(Debug, Clone, Copy)]
enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Debug, Default)]
struct PendingFill {
    pattern: Option<PatternType>,
    fg: Color,
    bg: Color,
}

#[derive(Debug, Default)]
struct PendingXf {
    num_fmt_id: u32,
    font_id: u32,
    fill_id: u32,
    border_id: u32,
    alignment: Alignment,
}

/// Incremental styles.xml parser; `open`/`close` are fed element events in order
#[derive(Debug)]
struct StylesParser {
    section: Section,
    numfmts: HashMap<u32, String>,
    fonts: Vec<FontStyle>,
    fills: Vec<FillStyle>,
    borders: Vec<BorderStyle>,
    cell_xfs: Vec<Style>,
    font: Option<FontStyle>,
    fill: Option<PendingFill>,
    border: Option<BorderStyle>,
    edge: Option<Edge>,
    xf: Option<PendingXf>,
}

impl StylesParser {
    fn new() -> Self {
        Self {
            section: Section::Other,
            numfmts: HashMap::new(),
            fonts: Vec::new(),
            fills: Vec::new(),
            borders: Vec::new(),
            cell_xfs: Vec::new(),
            font: None,
            fill: None,
            border: None,
            edge: None,
            xf: None,
        }
    }

    fn open(&mut self, e: &BytesStart<'_>) {
        let name = e.name();
        let name = name.as_ref();

        match name {
            b"fonts" => self.section = Section::Fonts,
            b"fills" => self.section = Section::Fills,
            b"borders" => self.section = Section::Borders,
            b"cellXfs" => self.section = Section::CellXfs,
            b"cellStyleXfs" | b"cellStyles" | b"dxfs" | b"colors" | b"tableStyles"
            | b"extLst" => self.section = Section::Skipped,
            b"numFmt" if self.section == Section::Other => {
                let id = attr_value(e, b"numFmtId").and_then(|s| s.parse().ok());
                if let (Some(id), Some(code)) = (id, attr_value(e, b"formatCode")) {
                    self.numfmts.insert(id, code);
                }
            }
            _ => match self.section {
                Section::Fonts => self.open_font_child(name, e),
                Section::Fills => self.open_fill_child(name, e),
                Section::Borders => self.open_border_child(name, e),
                Section::CellXfs => self.open_xf_child(name, e),
                Section::Other | Section::Skipped => {}
            },
        }
    }

    fn open_font_child(&mut self, name: &[u8], e: &BytesStart<'_>) {
        if name == b"font" {
            self.font = Some(FontStyle::default());
            return;
        }
        let Some(font) = self.font.as_mut() else {
            return;
        };
        match name {
            b"b" => font.bold = flag_value(e),
            b"i" => font.italic = flag_value(e),
            b"strike" => font.strike = flag_value(e),
            b"u" => font.underline = attr_value(e, b"val").map_or(true, |v| v != "none"),
            b"sz" => {
                if let Some(size) = attr_value(e, b"val").and_then(|v| v.parse().ok()) {
                    font.size = size;
                }
            }
            b"name" => {
                if let Some(v) = attr_value(e, b"val") {
                    font.name = v;
                }
            }
            b"color" => font.color = parse_color_attrs(e),
            _ => {}
        }
    }

    fn open_fill_child(&mut self, name: &[u8], e: &BytesStart<'_>) {
        if name == b"fill" {
            self.fill = Some(PendingFill::default());
            return;
        }
        let Some(fill) = self.fill.as_mut() else {
            return;
        };
        match name {
            b"patternFill" => {
                fill.pattern = attr_value(e, b"patternType")
                    .and_then(|v| PatternType::from_xml_str(&v));
            }
            b"fgColor" => fill.fg = parse_color_attrs(e),
            b"bgColor" => fill.bg = parse_color_attrs(e),
            _ => {}
        }
    }

    fn open_border_child(&mut self, name: &[u8], e: &BytesStart<'_>) {
        if name == b"border" {
            self.border = Some(BorderStyle::default());
            return;
        }
        let Some(border) = self.border.as_mut() else {
            return;
        };
        match name {
            b"left" | b"start" | b"right" | b"end" | b"top" | b"bottom" => {
                let edge = match name {
                    b"left" | b"start" => Edge::Left,
                    b"right" | b"end" => Edge::Right,
                    b"top" => Edge::Top,
                    _ => Edge::Bottom,
                };
                let style = attr_value(e, b"style")
                    .map(|v| BorderLineStyle::from_xml_str(&v))
                    .unwrap_or_default();
                if style != BorderLineStyle::None {
                    *edge_slot(border, edge) = Some(BorderEdge::new(style, Color::Auto));
                }
                self.edge = Some(edge);
            }
            b"color" => {
                if let Some(edge) = self.edge {
                    if let Some(slot) = edge_slot(border, edge).as_mut() {
                        slot.color = parse_color_attrs(e);
                    }
                }
            }
            _ => {}
        }
    }

    fn open_xf_child(&mut self, name: &[u8], e: &BytesStart<'_>) {
        match name {
            b"xf" => {
                let id = |key: &[u8]| {
                    attr_value(e, key)
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(0)
                };
                self.xf = Some(PendingXf {
                    num_fmt_id: id(b"numFmtId"),
                    font_id: id(b"fontId"),
                    fill_id: id(b"fillId"),
                    border_id: id(b"borderId"),
                    alignment: Alignment::default(),
                });
            }
            b"alignment" => {
                if let Some(xf) = self.xf.as_mut() {
                    if let Some(h) = attr_value(e, b"horizontal") {
                        xf.alignment.horizontal = HorizontalAlignment::from_xml_str(&h);
                    }
                    if let Some(v) = attr_value(e, b"vertical") {
                        xf.alignment.vertical = VerticalAlignment::from_xml_str(&v);
                    }
                    xf.alignment.wrap_text =
                        attr_value(e, b"wrapText").is_some_and(|v| v == "1" || v == "true");
                }
            }
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"fonts" | b"fills" | b"borders" | b"cellXfs" | b"cellStyleXfs" | b"cellStyles"
            | b"dxfs" | b"colors" | b"tableStyles" | b"extLst" => self.section = Section::Other,
            b"font" if self.section == Section::Fonts => {
                if let Some(font) = self.font.take() {
                    self.fonts.push(font);
                }
            }
            b"fill" if self.section == Section::Fills => {
                if let Some(fill) = self.fill.take() {
                    self.fills.push(finalize_fill(fill));
                }
            }
            b"border" if self.section == Section::Borders => {
                if let Some(border) = self.border.take() {
                    self.borders.push(border);
                }
                self.edge = None;
            }
            b"left" | b"start" | b"right" | b"end" | b"top" | b"bottom" => self.edge = None,
            b"xf" if self.section == Section::CellXfs => {
                if let Some(xf) = self.xf.take() {
                    let style = self.resolve_style(xf);
                    self.cell_xfs.push(style);
                }
            }
            _ => {}
        }
    }

    fn resolve_style(&self, xf: PendingXf) -> Style {
        let number_format = match self.numfmts.get(&xf.num_fmt_id) {
            Some(code) => NumberFormat::from_code(code),
            None => NumberFormat::from_id(xf.num_fmt_id),
        };

        Style {
            font: self.fonts.get(xf.font_id as usize).cloned().unwrap_or_default(),
            fill: self.fills.get(xf.fill_id as usize).cloned().unwrap_or_default(),
            border: self
                .borders
                .get(xf.border_id as usize)
                .cloned()
                .unwrap_or_default(),
            alignment: xf.alignment,
            number_format,
        }
    }

    fn finish(self) -> Vec<Style> {
        if self.cell_xfs.is_empty() {
            vec![Style::default()]
        } else {
            self.cell_xfs
        }
    }
}

/// Parse styles.xml into the `cellXfs` list, indexed by the `s` attribute of cells
pub(crate) fn read_styles_xml<R: Read>(reader: R) -> XlsxResult<Vec<Style>> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    xml_reader.trim_text(true);

    let mut parser = StylesParser::new();
    let mut buf = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => parser.open(&e),
            Ok(Event::Empty(e)) => {
                parser.open(&e);
                parser.close(e.name().as_ref());
            }
            Ok(Event::End(e)) => parser.close(e.name().as_ref()),
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(parser.finish())
}

fn edge_slot(border: &mut BorderStyle, edge: Edge) -> &mut Option<BorderEdge> {
    match edge {
        Edge::Left => &mut border.left,
        Edge::Right => &mut border.right,
        Edge::Top => &mut border.top,
        Edge::Bottom => &mut border.bottom,
    }
}

fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

/// `<b/>` means on; `<b val="0"/>` means off
fn flag_value(e: &BytesStart<'_>) -> bool {
    attr_value(e, b"val").map_or(true, |v| v != "0" && v != "false")
}

fn finalize_fill(fill: PendingFill) -> FillStyle {
    match fill.pattern.unwrap_or(PatternType::None) {
        // gray125 is the mandatory placeholder in slot 1
        PatternType::None | PatternType::Gray125 => FillStyle::None,
        PatternType::Solid => FillStyle::Solid { color: fill.fg },
        pattern => FillStyle::Pattern {
            pattern,
            foreground: fill.fg,
            background: fill.bg,
        },
    }
}

fn parse_color_attrs(e: &BytesStart<'_>) -> Color {
    // Priority: rgb > theme > indexed > auto
    if let Some(rgb) = attr_value(e, b"rgb") {
        match Color::from_hex(&rgb) {
            // Opaque ARGB is how plain RGB is written
            Some(Color::Argb { a: 0xFF, r, g, b }) => return Color::Rgb { r, g, b },
            Some(color) => return color,
            None => {}
        }
    }

    if let Some(index) = attr_value(e, b"theme").and_then(|v| v.parse::<u8>().ok()) {
        let tint = attr_value(e, b"tint")
            .and_then(|v| v.parse::<f64>().ok())
            .map(|t| (t * 100.0).round() as i8)
            .unwrap_or(0);
        return Color::Theme { index, tint };
    }

    match attr_value(e, b"indexed").and_then(|v| v.parse::<u8>().ok()) {
        // 64 is the system foreground, i.e. automatic
        Some(64) | None => Color::Auto,
        Some(i) => Color::Indexed(i),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn roundtrip(style: Style) -> Style {
        let mut workbook = Workbook::new();
        let sheet = workbook.worksheet_mut(0).unwrap();
        sheet.set_cell_value_at(1, 1, "x").unwrap();
        sheet.set_cell_style_at(1, 1, &style).unwrap();

        let table = XlsxStyleTable::build(&workbook);
        let xf = table.xf_id_for(0, workbook.worksheet(0).unwrap().cell_style_index_at(1, 1));
        let xml = table.to_styles_xml();

        let styles = read_styles_xml(xml.as_bytes()).unwrap();
        styles[xf as usize].clone()
    }

    #[test]
    fn test_header_style_roundtrip() {
        let style = Style::header();
        assert_eq!(roundtrip(style.clone()), style);
    }

    #[test]
    fn test_number_format_roundtrip() {
        let builtin = Style::new().number_format("#,##0").border(BorderStyle::thin());
        assert_eq!(roundtrip(builtin.clone()), builtin);

        let custom = Style::new().number_format("yyyy\"年\"m\"月\"d\"日\"");
        assert_eq!(roundtrip(custom.clone()), custom);
    }

    #[test]
    fn test_colors_roundtrip() {
        let style = Style::new()
            .font_color(Color::theme(1, -25))
            .fill_color(Color::Indexed(5))
            .border(BorderStyle::new().with_bottom(BorderLineStyle::Double, Color::RED));
        assert_eq!(roundtrip(style.clone()), style);
    }

    #[test]
    fn test_default_style_table() {
        let table = XlsxStyleTable::build(&Workbook::new());
        let xml = table.to_styles_xml();
        assert!(xml.contains("<fills count=\"2\">"));
        assert!(xml.contains("patternType=\"gray125\""));
        assert_eq!(read_styles_xml(xml.as_bytes()).unwrap(), vec![Style::default()]);
    }

    #[test]
    fn test_reads_self_closing_and_skipped_sections() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <numFmts count="1"><numFmt numFmtId="165" formatCode="0.0%"/></numFmts>
  <fonts count="2">
    <font><sz val="11"/><name val="Calibri"/></font>
    <font><b val="1"/><i val="0"/><sz val="14"/><color rgb="FFFF0000"/><name val="Meiryo"/></font>
  </fonts>
  <fills count="2">
    <fill><patternFill patternType="none"/></fill>
    <fill><patternFill patternType="gray125"/></fill>
  </fills>
  <borders count="2">
    <border/>
    <border><left style="thin"><color auto="1"/></left><right/><top/><bottom style="medium"/></border>
  </borders>
  <cellStyleXfs count="1"><xf numFmtId="0" fontId="1" fillId="0" borderId="1"/></cellStyleXfs>
  <cellXfs count="2">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
    <xf numFmtId="165" fontId="1" fillId="0" borderId="1" xfId="0"><alignment wrapText="1"/></xf>
  </cellXfs>
  <dxfs count="1"><dxf><font><b/></font></dxf></dxfs>
</styleSheet>"#;

        let styles = read_styles_xml(xml.as_bytes()).unwrap();
        assert_eq!(styles.len(), 2);
        assert_eq!(styles[0], Style::default());

        let style = &styles[1];
        assert!(style.font.bold);
        assert!(!style.font.italic);
        assert_eq!(style.font.size, 14.0);
        assert_eq!(style.font.name, "Meiryo");
        assert_eq!(style.font.color, Color::RED);
        assert_eq!(
            style.border.left,
            Some(BorderEdge::new(BorderLineStyle::Thin, Color::Auto))
        );
        assert_eq!(style.border.right, None);
        assert_eq!(
            style.border.bottom.as_ref().map(|e| e.style),
            Some(BorderLineStyle::Medium)
        );
        assert!(style.alignment.wrap_text);
        assert_eq!(style.number_format, NumberFormat::Custom("0.0%".into()));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
