//! Generic exporter service.

use std::path::Path;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use tracing::{error, info};

use super::{ExportableElement, GenericExportConfiguration};
use crate::error::{ModelKitError, Result};
use crate::writer::{ExportWriter, Sheet};

/// Turns export configurations into per-kind sheets and hands them to the
/// writer.
pub struct GenericExporterService {
    writer: Arc<dyn ExportWriter>,
    value_separator: String,
}

impl GenericExporterService {
    pub fn new(writer: Arc<dyn ExportWriter>, value_separator: impl Into<String>) -> Self {
        Self {
            writer,
            value_separator: value_separator.into(),
        }
    }

    /// Shape every configured element into a row, group rows by element
    /// kind and write one sheet per kind to `path`.
    ///
    /// Writer failures are logged and returned unchanged.
    pub fn export_elements(
        &self,
        path: &Path,
        configurations: &[GenericExportConfiguration],
    ) -> Result<()> {
        let grouped = self.exportable_elements(configurations)?;

        info!(
            "Starting to export {} kind of Elements, {} Elements in total to file {}",
            grouped.len(),
            grouped.values().map(Vec::len).sum::<usize>(),
            path.display()
        );

        let sheets: Vec<Sheet> = grouped
            .iter()
            .map(|(kind, rows)| to_sheet(kind, rows))
            .collect::<Result<_>>()?;

        if let Err(e) = self.writer.write(&sheets, path) {
            error!("Export to {} failed: {}", path.display(), e);
            return Err(e.into());
        }

        info!("Export completed successfully");
        Ok(())
    }

    /// Rows grouped by element kind, kinds in configuration order.
    pub fn exportable_elements(
        &self,
        configurations: &[GenericExportConfiguration],
    ) -> Result<IndexMap<String, Vec<ExportableElement>>> {
        if configurations.is_empty() {
            return Err(ModelKitError::invalid_argument("Nothing was selected for export"));
        }

        let mut grouped: IndexMap<String, Vec<ExportableElement>> = IndexMap::new();

        for configuration in configurations {
            let kind = configuration.kind_name()?.to_string();
            let rows = configuration
                .exportable_elements
                .iter()
                .map(|element| {
                    ExportableElement::new(
                        element,
                        &configuration.exportable_tagged_values,
                        &configuration.exportable_connectors,
                        &self.value_separator,
                    )
                })
                .collect::<Result<Vec<_>>>()?;
            grouped.entry(kind).or_default().extend(rows);
        }

        Ok(grouped)
    }
}

impl std::fmt::Debug for GenericExporterService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericExporterService")
            .field("value_separator", &self.value_separator)
            .finish_non_exhaustive()
    }
}

/// One sheet per kind. Rows of one kind normally share headers; when two
/// configurations of the same kind differ, the sheet gets the union and
/// rows leave the foreign columns empty.
fn to_sheet(kind: &str, rows: &[ExportableElement]) -> Result<Sheet> {
    let headers: IndexSet<&String> = rows.iter().flat_map(|row| row.headers()).collect();
    let headers: Vec<String> = headers.into_iter().cloned().collect();

    let mut sheet = Sheet::new(kind, headers);
    for row in rows {
        let values = sheet
            .headers
            .iter()
            .map(|header| {
                if row.headers().contains(header) {
                    row.value(header).map(str::to_string)
                } else {
                    Ok(String::new())
                }
            })
            .collect::<Result<Vec<_>>>()?;
        sheet.push_row(values);
    }

    Ok(sheet)
}
