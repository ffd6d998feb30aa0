//! One export run, from selected elements to a written workbook.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::base::{ElementId, group_by};
use crate::cache::CacheService;
use crate::error::{ModelKitError, Result};
use crate::export::{ExportSetup, GenericExportConfiguration, GenericExporterService};
use crate::model::SlimElement;
use crate::source::ElementHandle;

/// State of one export dialog: a setup per element kind, and the exporter
/// that eventually writes them.
#[derive(Debug)]
pub struct ExportSession {
    setups: Vec<ExportSetup>,
    exporter: Arc<GenericExporterService>,
}

impl ExportSession {
    /// Project `elements` through the cache and group them by kind.
    ///
    /// Tagged values for all elements are fetched in one batch; connectors
    /// are looked up element by element. Fails if `elements` is empty.
    pub fn new(
        cache: &CacheService,
        exporter: Arc<GenericExporterService>,
        elements: &[ElementHandle],
    ) -> Result<Self> {
        if elements.is_empty() {
            return Err(ModelKitError::invalid_argument(
                "The collection of elements to export cannot be empty",
            ));
        }

        let ids: Vec<ElementId> = elements.iter().map(|e| e.id).collect();
        let tagged_values = group_by(cache.tagged_values_for(&ids)?, |tv| tv.container_id);

        let mut slim_elements = Vec::with_capacity(elements.len());
        for element in elements {
            let connectors = cache.associated_connectors(element.id)?;
            let tagged = tagged_values.get(&element.id).cloned().unwrap_or_default();
            slim_elements.push(SlimElement::new(element, tagged, connectors)?);
        }

        let setups = group_by(slim_elements, |e| e.element_kind.clone())
            .into_values()
            .map(ExportSetup::new)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Export session with {} elements in {} kinds",
            elements.len(),
            setups.len()
        );

        Ok(Self { setups, exporter })
    }

    pub fn setups(&self) -> &[ExportSetup] {
        &self.setups
    }

    pub fn setups_mut(&mut self) -> &mut [ExportSetup] {
        &mut self.setups
    }

    pub fn setup_mut(&mut self, element_kind: &str) -> Option<&mut ExportSetup> {
        self.setups
            .iter_mut()
            .find(|setup| setup.element_kind() == element_kind)
    }

    /// A target path is chosen and at least one kind is marked for export.
    pub fn can_proceed(&self, path: Option<&Path>) -> bool {
        let has_path = path.is_some_and(|p| !p.as_os_str().is_empty());
        has_path && self.setups.iter().any(ExportSetup::should_be_exported)
    }

    /// Configurations for the kinds marked for export, in setup order.
    pub fn configurations(&self) -> Vec<GenericExportConfiguration> {
        self.setups
            .iter()
            .filter(|setup| setup.should_be_exported())
            .map(ExportSetup::to_configuration)
            .collect()
    }

    pub fn export(&self, path: &Path) -> Result<()> {
        if !self.can_proceed(Some(path)) {
            return Err(ModelKitError::invalid_argument(
                "Choose a target file and at least one element kind to export",
            ));
        }
        self.exporter
            .export_elements(path, &self.configurations())
    }
}
