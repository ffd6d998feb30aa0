//! Office Open XML workbook writer.

use std::io::{Cursor, Write};
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::{debug, error};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::{ExportWriter, Sheet, SheetNames, WriterError};
use crate::base::WriterOptions;

/// Package part locations and namespaces.
mod parts {
    pub const CONTENT_TYPES: &str = "[Content_Types].xml";
    pub const ROOT_RELS: &str = "_rels/.rels";
    pub const WORKBOOK: &str = "xl/workbook.xml";
    pub const WORKBOOK_RELS: &str = "xl/_rels/workbook.xml.rels";
    pub const STYLES: &str = "xl/styles.xml";

    pub const SPREADSHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
    pub const RELATIONSHIPS_NS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    pub fn worksheet(index: usize) -> String {
        format!("xl/worksheets/sheet{index}.xml")
    }
}

/// Cell style indexes into `cellXfs` of the stylesheet.
mod style {
    pub const HEADER: &str = "1";
    pub const WRAPPED: &str = "2";
}

/// Approximate width of one character, in Excel column width units.
const CHAR_WIDTH: f64 = 1.1;

/// Writes sheets as an `.xlsx` workbook.
#[derive(Debug, Clone, Default)]
pub struct ExcelWriter {
    options: WriterOptions,
}

impl ExcelWriter {
    pub fn new(options: WriterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Build the whole workbook in memory.
    pub fn to_bytes(&self, sheets: &[Sheet]) -> Result<Vec<u8>, WriterError> {
        if sheets.is_empty() {
            return Err(WriterError::NoSheets);
        }

        for sheet in sheets {
            check_row_shape(sheet)?;
        }

        let mut names = SheetNames::new();
        let sheet_names: Vec<String> = sheets.iter().map(|s| names.assign(&s.name)).collect();

        let mut buffer = Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(&mut buffer);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        add_part(&mut zip, options, parts::CONTENT_TYPES, &content_types(sheets.len()))?;
        add_part(&mut zip, options, parts::ROOT_RELS, ROOT_RELS_XML.as_bytes())?;
        add_part(&mut zip, options, parts::WORKBOOK, &workbook(&sheet_names)?)?;
        add_part(&mut zip, options, parts::WORKBOOK_RELS, &workbook_rels(sheets.len()))?;
        add_part(&mut zip, options, parts::STYLES, STYLES_XML.as_bytes())?;

        for (index, sheet) in sheets.iter().enumerate() {
            let content = self.worksheet(sheet)?;
            add_part(&mut zip, options, &parts::worksheet(index + 1), &content)?;
        }

        zip.finish()
            .map_err(|e| WriterError::archive(format!("Failed to finalize archive: {e}")))?;

        Ok(buffer.into_inner())
    }

    fn worksheet(&self, sheet: &Sheet) -> Result<Vec<u8>, WriterError> {
        let mut xml = PartWriter::new()?;

        let mut root = BytesStart::new("worksheet");
        root.push_attribute(("xmlns", parts::SPREADSHEET_NS));
        xml.start(root)?;

        // Freeze the header row.
        xml.start(BytesStart::new("sheetViews"))?;
        let mut view = BytesStart::new("sheetView");
        view.push_attribute(("workbookViewId", "0"));
        xml.start(view)?;
        let mut pane = BytesStart::new("pane");
        pane.push_attribute(("ySplit", "1"));
        pane.push_attribute(("topLeftCell", "A2"));
        pane.push_attribute(("activePane", "bottomLeft"));
        pane.push_attribute(("state", "frozen"));
        xml.empty(pane)?;
        xml.end("sheetView")?;
        xml.end("sheetViews")?;

        if !sheet.headers.is_empty() {
            xml.start(BytesStart::new("cols"))?;
            for (index, width) in self.column_widths(sheet).into_iter().enumerate() {
                let position = (index + 1).to_string();
                let mut col = BytesStart::new("col");
                col.push_attribute(("min", position.as_str()));
                col.push_attribute(("max", position.as_str()));
                col.push_attribute(("width", format!("{width:.2}").as_str()));
                col.push_attribute(("customWidth", "1"));
                xml.empty(col)?;
            }
            xml.end("cols")?;
        }

        xml.start(BytesStart::new("sheetData"))?;
        write_row(&mut xml, 1, &sheet.headers, style::HEADER)?;
        for (index, row) in sheet.rows.iter().enumerate() {
            write_row(&mut xml, index + 2, row, style::WRAPPED)?;
        }
        xml.end("sheetData")?;

        xml.end("worksheet")?;
        Ok(xml.finish())
    }

    /// Widest line of each column, clamped into the configured bounds.
    fn column_widths(&self, sheet: &Sheet) -> Vec<f64> {
        (0..sheet.headers.len())
            .map(|column| {
                let longest = std::iter::once(&sheet.headers[column])
                    .chain(sheet.rows.iter().filter_map(|row| row.get(column)))
                    .flat_map(|value| value.lines())
                    .map(|line| line.chars().count())
                    .max()
                    .unwrap_or(0);
                self.options.clamp_width(longest as f64 * CHAR_WIDTH + 2.0)
            })
            .collect()
    }
}

impl ExportWriter for ExcelWriter {
    fn write(&self, sheets: &[Sheet], path: &Path) -> Result<(), WriterError> {
        let bytes = self.to_bytes(sheets)?;

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        // Stage next to the destination so the final rename stays on one
        // filesystem and never exposes a half-written workbook.
        let mut staged = tempfile::Builder::new()
            .prefix(".modelkit-")
            .suffix(".xlsx.tmp")
            .tempfile_in(directory)?;
        staged.write_all(&bytes)?;
        staged.flush()?;

        staged.persist(path).map_err(|e| {
            error!("Failed to move workbook to {}: {}", path.display(), e.error);
            WriterError::Persist {
                path: path.to_path_buf(),
                source: e.error,
            }
        })?;

        debug!(
            "Wrote {} sheets ({} bytes) to {}",
            sheets.len(),
            bytes.len(),
            path.display()
        );
        Ok(())
    }
}

fn check_row_shape(sheet: &Sheet) -> Result<(), WriterError> {
    for (index, row) in sheet.rows.iter().enumerate() {
        if row.len() != sheet.headers.len() {
            return Err(WriterError::RowShape {
                sheet: sheet.name.clone(),
                row: index + 1,
                found: row.len(),
                expected: sheet.headers.len(),
            });
        }
    }
    Ok(())
}

fn write_row(
    xml: &mut PartWriter,
    row_number: usize,
    values: &[String],
    style: &str,
) -> Result<(), WriterError> {
    let number = row_number.to_string();
    let mut row = BytesStart::new("row");
    row.push_attribute(("r", number.as_str()));
    xml.start(row)?;

    for (index, value) in values.iter().enumerate() {
        let reference = format!("{}{}", column_name(index), row_number);
        let mut cell = BytesStart::new("c");
        cell.push_attribute(("r", reference.as_str()));
        cell.push_attribute(("s", style));
        cell.push_attribute(("t", "inlineStr"));
        xml.start(cell)?;
        xml.start(BytesStart::new("is"))?;
        let mut text = BytesStart::new("t");
        text.push_attribute(("xml:space", "preserve"));
        xml.start(text)?;
        xml.text(&strip_invalid_xml_chars(value))?;
        xml.end("t")?;
        xml.end("is")?;
        xml.end("c")?;
    }

    xml.end("row")
}

/// Spreadsheet column letters: 0 -> A, 25 -> Z, 26 -> AA.
pub(crate) fn column_name(index: usize) -> String {
    let mut letters = Vec::new();
    let mut remaining = index + 1;
    while remaining > 0 {
        let rem = (remaining - 1) % 26;
        letters.push(b'A' + rem as u8);
        remaining = (remaining - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Characters allowed by the XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Drop characters XML 1.0 forbids, even escaped.
fn strip_invalid_xml_chars(value: &str) -> std::borrow::Cow<'_, str> {
    let invalid = |c: char| !is_xml_char(c);
    if value.chars().any(invalid) {
        value.chars().filter(|&c| !invalid(c)).collect::<String>().into()
    } else {
        value.into()
    }
}

fn add_part<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    options: SimpleFileOptions,
    name: &str,
    content: &[u8],
) -> Result<(), WriterError> {
    zip.start_file(name, options)
        .map_err(|e| WriterError::archive(format!("Failed to create {name}: {e}")))?;
    zip.write_all(content)
        .map_err(|e| WriterError::archive(format!("Failed to write {name}: {e}")))
}

fn content_types(sheet_count: usize) -> Vec<u8> {
    let overrides: String = (1..=sheet_count)
        .map(|index| {
            format!(
                r#"<Override PartName="/xl/worksheets/sheet{index}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>{overrides}</Types>
"#
    )
    .into_bytes()
}

fn workbook(sheet_names: &[String]) -> Result<Vec<u8>, WriterError> {
    let mut xml = PartWriter::new()?;

    let mut root = BytesStart::new("workbook");
    root.push_attribute(("xmlns", parts::SPREADSHEET_NS));
    root.push_attribute(("xmlns:r", parts::RELATIONSHIPS_NS));
    xml.start(root)?;
    xml.start(BytesStart::new("sheets"))?;

    for (index, name) in sheet_names.iter().enumerate() {
        let sheet_id = (index + 1).to_string();
        let relationship = format!("rId{}", index + 1);
        let mut sheet = BytesStart::new("sheet");
        sheet.push_attribute(("name", name.as_str()));
        sheet.push_attribute(("sheetId", sheet_id.as_str()));
        sheet.push_attribute(("r:id", relationship.as_str()));
        xml.empty(sheet)?;
    }

    xml.end("sheets")?;
    xml.end("workbook")?;
    Ok(xml.finish())
}

fn workbook_rels(sheet_count: usize) -> Vec<u8> {
    let sheets: String = (1..=sheet_count)
        .map(|index| {
            format!(
                r#"<Relationship Id="rId{index}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{index}.xml"/>"#
            )
        })
        .collect();
    let styles_id = sheet_count + 1;

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{sheets}<Relationship Id="rId{styles_id}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>
"#
    )
    .into_bytes()
}

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>
"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="2"><font><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="3"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0" applyAlignment="1"><alignment wrapText="1" vertical="top"/></xf></cellXfs><cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles></styleSheet>
"#;

/// Thin wrapper over a quick-xml writer that maps errors.
struct PartWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl PartWriter {
    fn new() -> Result<Self, WriterError> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(|e| WriterError::xml(format!("Write error: {e}")))?;
        Ok(Self { writer })
    }

    fn start(&mut self, element: BytesStart<'_>) -> Result<(), WriterError> {
        self.event(Event::Start(element))
    }

    fn empty(&mut self, element: BytesStart<'_>) -> Result<(), WriterError> {
        self.event(Event::Empty(element))
    }

    fn end(&mut self, name: &str) -> Result<(), WriterError> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn text(&mut self, text: &str) -> Result<(), WriterError> {
        self.event(Event::Text(BytesText::new(text)))
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), WriterError> {
        self.writer
            .write_event(event)
            .map_err(|e| WriterError::xml(format!("Write error: {e}")))
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner().into_inner()
    }
}
