//! Runtime options

use super::constants::{DEFAULT_MAX_COLUMN_WIDTH, DEFAULT_MIN_COLUMN_WIDTH};

/// Options for the spreadsheet writer
#[derive(Debug, Clone, PartialEq)]
pub struct WriterOptions {
    /// Narrowest width a used column is sized to
    pub min_column_width: f64,
    /// Widest width a used column is sized to
    pub max_column_width: f64,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            min_column_width: DEFAULT_MIN_COLUMN_WIDTH,
            max_column_width: DEFAULT_MAX_COLUMN_WIDTH,
        }
    }
}

impl WriterOptions {
    /// Clamp a content width into the configured bounds
    pub fn clamp_width(&self, content_width: f64) -> f64 {
        content_width.max(self.min_column_width).min(self.max_column_width)
    }
}

/// Options for shaping export rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Separator placed between values that share one cell
    pub value_separator: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            value_separator: "\n".to_string(),
        }
    }
}

/// Top-level options handed to the composition root
#[derive(Debug, Clone, PartialEq)]
pub struct ModelKitOptions {
    pub writer: WriterOptions,
    pub export: ExportOptions,
    /// Fan multi-element tagged value lookups out over the rayon pool
    pub parallel_lookup: bool,
}

impl Default for ModelKitOptions {
    fn default() -> Self {
        Self {
            writer: WriterOptions::default(),
            export: ExportOptions::default(),
            parallel_lookup: true,
        }
    }
}
