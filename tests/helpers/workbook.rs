//! Reads back workbooks written by `ExcelWriter`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use zip::ZipArchive;

/// Cell style index of header cells.
pub const HEADER_STYLE: &str = "1";

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: String,
    pub style: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Worksheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
    pub frozen_header: bool,
    pub column_widths: Vec<f64>,
}

impl Worksheet {
    pub fn headers(&self) -> Vec<&str> {
        self.rows
            .first()
            .map(|row| row.iter().map(|c| c.value.as_str()).collect())
            .unwrap_or_default()
    }

    /// Data rows as plain values.
    pub fn values(&self) -> Vec<Vec<&str>> {
        self.rows
            .iter()
            .skip(1)
            .map(|row| row.iter().map(|c| c.value.as_str()).collect())
            .collect()
    }

    /// Value of `header` in data row `row` (0-based, header excluded).
    pub fn value(&self, row: usize, header: &str) -> &str {
        let column = self
            .headers()
            .iter()
            .position(|h| *h == header)
            .unwrap_or_else(|| panic!("no column {header} in sheet {}", self.name));
        &self.rows[row + 1][column].value
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Worksheet>,
}

impl Workbook {
    pub fn sheet(&self, name: &str) -> &Worksheet {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .unwrap_or_else(|| panic!("no sheet named {name}"))
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

pub fn read_workbook(path: &Path) -> Workbook {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();

    let names = sheet_names(&read_part(&mut archive, "xl/workbook.xml"));
    let sheets = names
        .into_iter()
        .enumerate()
        .map(|(index, name)| {
            let part = read_part(&mut archive, &format!("xl/worksheets/sheet{}.xml", index + 1));
            read_worksheet(name, &part)
        })
        .collect();

    Workbook { sheets }
}

fn read_part(archive: &mut ZipArchive<File>, name: &str) -> String {
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap_or_else(|e| panic!("missing part {name}: {e}"))
        .read_to_string(&mut content)
        .unwrap();
    content
}

fn attribute(element: &BytesStart<'_>, name: &str) -> Option<String> {
    element
        .try_get_attribute(name)
        .unwrap()
        .map(|a| a.unescape_value().unwrap().into_owned())
}

fn sheet_names(workbook: &str) -> Vec<String> {
    let mut reader = Reader::from_str(workbook);
    let mut names = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Empty(e) | Event::Start(e) if e.name().as_ref() == b"sheet" => {
                names.push(attribute(&e, "name").unwrap());
            }
            Event::Eof => break,
            _ => {}
        }
    }
    names
}

fn read_worksheet(name: String, part: &str) -> Worksheet {
    let mut reader = Reader::from_str(part);
    let mut sheet = Worksheet {
        name,
        rows: Vec::new(),
        frozen_header: false,
        column_widths: Vec::new(),
    };
    let mut style = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) | Event::Empty(e) => match e.name().as_ref() {
                b"pane" => {
                    sheet.frozen_header = attribute(&e, "state").as_deref() == Some("frozen")
                        && attribute(&e, "ySplit").as_deref() == Some("1");
                }
                b"col" => {
                    let width = attribute(&e, "width").unwrap().parse().unwrap();
                    sheet.column_widths.push(width);
                }
                b"row" => sheet.rows.push(Vec::new()),
                b"c" => style = attribute(&e, "s").unwrap_or_default(),
                b"t" => {
                    in_text = true;
                    if let Some(row) = sheet.rows.last_mut() {
                        row.push(Cell {
                            value: String::new(),
                            style: style.clone(),
                        });
                    }
                }
                _ => {}
            },
            Event::Text(t) if in_text => {
                let text = t.unescape().unwrap();
                if let Some(cell) = sheet.rows.last_mut().and_then(|row| row.last_mut()) {
                    cell.value.push_str(&text);
                }
            }
            Event::End(e) if e.name().as_ref() == b"t" => in_text = false,
            Event::Eof => break,
            _ => {}
        }
    }

    sheet
}
