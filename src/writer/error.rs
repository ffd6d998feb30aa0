//! Error types for spreadsheet output.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while producing a workbook.
#[derive(Debug, Error)]
pub enum WriterError {
    /// IO error while staging the file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error.
    #[error("Archive error: {0}")]
    Archive(String),

    /// XML serialization error.
    #[error("XML error: {0}")]
    Xml(String),

    /// The finished workbook could not be moved to its destination
    /// (typically because the file is open in another program).
    #[error("Cannot write {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Nothing to write.
    #[error("Workbook has no sheets")]
    NoSheets,

    /// A sheet row does not line up with the headers.
    #[error("Sheet {sheet}: row {row} has {found} values for {expected} headers")]
    RowShape {
        sheet: String,
        row: usize,
        found: usize,
        expected: usize,
    },
}

impl WriterError {
    /// Create an archive error.
    pub fn archive(message: impl Into<String>) -> Self {
        Self::Archive(message.into())
    }

    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }
}
