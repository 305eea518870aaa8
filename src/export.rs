//! Export adapter: records to an XLSX workbook.
//!
//! The workbook is a minimal OOXML package with one worksheet. The header row
//! holds the record's column names in bold; each record becomes one row.
//! Strings are written as inline strings so no shared-string table is needed.

use std::fmt::Write as _;
use std::io::{Cursor, Write};

use tracing::debug;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::error::{Error, Result};
use crate::record::{CommentRecord, PostRecord, Records};

/// Longest sheet name spreadsheet applications accept.
const MAX_SHEET_NAME_LEN: usize = 31;

/// Characters not allowed in a sheet name.
const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

/// Style 0 is the default, style 1 is bold (header row).
const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="2"><font><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="2"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/></cellXfs><cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles></styleSheet>"#;

const HEADER_STYLE: u32 = 1;

/// One worksheet cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Written as an inline string.
    Text(String),
    /// Written as a number.
    Int(u64),
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<u64> for Cell {
    fn from(value: u64) -> Self {
        Self::Int(value)
    }
}

/// A record that can be written as one worksheet row.
pub trait TabularRecord {
    /// Header row, in column order.
    const COLUMNS: &'static [&'static str];

    /// Cell values, in the same order as [`Self::COLUMNS`].
    fn cells(&self) -> Vec<Cell>;
}

impl TabularRecord for PostRecord {
    const COLUMNS: &'static [&'static str] = &[
        "caption", "date", "time", "day", "likes", "comments", "shares", "format", "url",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.caption.as_str().into(),
            self.when.date.as_str().into(),
            self.when.time.as_str().into(),
            self.when.day.as_str().into(),
            self.likes.into(),
            self.comments.into(),
            self.shares.into(),
            self.format.as_str().into(),
            self.url.as_str().into(),
        ]
    }
}

impl TabularRecord for CommentRecord {
    const COLUMNS: &'static [&'static str] = &[
        "comment",
        "date",
        "time",
        "day",
        "likes",
        "type",
        "in_response_to",
        "url",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.comment.as_str().into(),
            self.when.date.as_str().into(),
            self.when.time.as_str().into(),
            self.when.day.as_str().into(),
            self.likes.into(),
            Cell::Text(self.kind.to_string()),
            self.in_response_to.as_str().into(),
            self.url.as_str().into(),
        ]
    }
}

/// Serialize tagged records into workbook bytes.
///
/// # Errors
///
/// See [`write_workbook`].
pub fn write_records(records: &Records, sheet_name: &str) -> Result<Vec<u8>> {
    match records {
        Records::Posts(rows) => write_workbook(rows, sheet_name),
        Records::Comments(rows) => write_workbook(rows, sheet_name),
    }
}

/// Serialize records into the bytes of a single-sheet XLSX workbook.
///
/// # Errors
///
/// Returns [`Error::Export`] for an unusable sheet name or a formatting
/// failure, and [`Error::Zip`] / [`Error::Io`] if packaging fails.
pub fn write_workbook<R: TabularRecord>(records: &[R], sheet_name: &str) -> Result<Vec<u8>> {
    validate_sheet_name(sheet_name)?;

    let sheet = sheet_xml(records)?;
    let workbook = workbook_xml(sheet_name);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let parts: [(&str, &[u8]); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes()),
        ("_rels/.rels", ROOT_RELS_XML.as_bytes()),
        ("xl/workbook.xml", workbook.as_bytes()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML.as_bytes()),
        ("xl/styles.xml", STYLES_XML.as_bytes()),
        ("xl/worksheets/sheet1.xml", sheet.as_bytes()),
    ];
    for (path, content) in parts {
        zip.start_file(path, options)?;
        zip.write_all(content)?;
    }

    let bytes = zip.finish()?.into_inner();
    debug!(rows = records.len(), bytes = bytes.len(), "workbook written");
    Ok(bytes)
}

fn validate_sheet_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Export("sheet name is empty".to_string()));
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(Error::Export(format!(
            "sheet name '{name}' is longer than {MAX_SHEET_NAME_LEN} characters"
        )));
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_SHEET_CHARS.contains(c)) {
        return Err(Error::Export(format!(
            "sheet name '{name}' contains forbidden character '{c}'"
        )));
    }
    Ok(())
}

fn workbook_xml(sheet_name: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        escape_xml(sheet_name)
    )
}

fn sheet_xml<R: TabularRecord>(records: &[R]) -> Result<String> {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    let header: Vec<Cell> = R::COLUMNS.iter().map(|name| Cell::from(*name)).collect();
    write_row(&mut xml, 1, &header, Some(HEADER_STYLE))?;

    for (idx, record) in records.iter().enumerate() {
        write_row(&mut xml, idx + 2, &record.cells(), None)?;
    }

    xml.push_str("</sheetData></worksheet>");
    Ok(xml)
}

fn write_row(xml: &mut String, row: usize, cells: &[Cell], style: Option<u32>) -> Result<()> {
    let style_attr = style.map(|s| format!(r#" s="{s}""#)).unwrap_or_default();
    write!(xml, r#"<row r="{row}">"#).map_err(fmt_error)?;

    for (col, cell) in (1u32..).zip(cells) {
        let cell_ref = format!("{}{row}", column_to_letters(col));
        match cell {
            Cell::Int(value) => {
                write!(xml, r#"<c r="{cell_ref}"{style_attr}><v>{value}</v></c>"#)
                    .map_err(fmt_error)?;
            }
            Cell::Text(text) => {
                write!(
                    xml,
                    r#"<c r="{cell_ref}"{style_attr} t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                    escape_xml(&strip_invalid_xml_chars(text))
                )
                .map_err(fmt_error)?;
            }
        }
    }

    xml.push_str("</row>");
    Ok(())
}

fn fmt_error(e: std::fmt::Error) -> Error {
    Error::Export(format!("XML write error: {e}"))
}

/// Convert a 1-based column number to letters (1 -> "A", 26 -> "Z", 27 -> "AA").
#[must_use]
pub fn column_to_letters(col: u32) -> String {
    let mut letters = String::new();
    let mut col = col;

    while col > 0 {
        col -= 1;
        let letter = char::from(b'A' + (col % 26) as u8);
        letters.insert(0, letter);
        col /= 26;
    }

    letters
}

/// Escape XML special characters.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Remove characters XML 1.0 does not allow (most C0 controls, U+FFFE, U+FFFF).
fn strip_invalid_xml_chars(text: &str) -> String {
    text.chars()
        .filter(|&c| {
            matches!(c, '\t' | '\n' | '\r')
                || (c >= '\u{20}' && c != '\u{FFFE}' && c != '\u{FFFF}')
        })
        .collect()
}
