//! Spreadsheet output.
//!
//! The writer consumes already-shaped [`Sheet`]s: a name, a header row and
//! string rows. [`ExcelWriter`] serializes them into an Office Open XML
//! workbook:
//!
//! ```text
//! export.xlsx (ZIP archive)
//! ├── [Content_Types].xml
//! ├── _rels/.rels
//! └── xl/
//!     ├── workbook.xml
//!     ├── styles.xml             # bold header, wrapped data cells
//!     ├── _rels/workbook.xml.rels
//!     └── worksheets/
//!         ├── sheet1.xml         # one sheet per element kind
//!         └── sheet2.xml
//! ```

mod error;
mod sheet_name;
mod xlsx;

pub use error::WriterError;
pub use sheet_name::SheetNames;
pub use xlsx::ExcelWriter;

use std::path::Path;

/// One worksheet worth of export rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sheet {
    /// Requested name; the writer sanitizes it.
    pub name: String,
    pub headers: Vec<String>,
    /// One entry per data row, one value per header.
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

/// Persists sheets to a file.
pub trait ExportWriter: Send + Sync {
    /// Write every sheet to `path`. Either the whole file is written or the
    /// previous content of `path` is left untouched.
    fn write(&self, sheets: &[Sheet], path: &Path) -> Result<(), WriterError>;
}
