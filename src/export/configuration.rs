use crate::error::{ModelKitError, Result};
use crate::model::SlimElement;

/// What to export for one kind of element: the elements themselves and the
/// tagged value names and connector kinds that become columns.
#[derive(Clone, Debug, PartialEq)]
pub struct GenericExportConfiguration {
    pub exportable_elements: Vec<SlimElement>,
    pub exportable_tagged_values: Vec<String>,
    pub exportable_connectors: Vec<String>,
}

impl GenericExportConfiguration {
    pub fn new(exportable_elements: Vec<SlimElement>, exportable_tagged_values: Vec<String>) -> Self {
        Self {
            exportable_elements,
            exportable_tagged_values,
            exportable_connectors: Vec::new(),
        }
    }

    pub fn with_connectors(mut self, exportable_connectors: Vec<String>) -> Self {
        self.exportable_connectors = exportable_connectors;
        self
    }

    /// Kind shared by the configured elements, taken from the first one.
    pub fn kind_name(&self) -> Result<&str> {
        self.exportable_elements
            .first()
            .map(|element| element.element_kind.as_str())
            .ok_or_else(|| {
                ModelKitError::invalid_argument("An export configuration needs at least one element")
            })
    }
}
