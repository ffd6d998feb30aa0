//! Expansion of the host selection into the elements it covers.
//!
//! When only elements (or diagrams) are selected, the host has already
//! expanded the selection and its element set is returned as is. When
//! packages are selected, every element owned by those packages or by any
//! package nested below them is returned.

use indexmap::IndexSet;
use tracing::debug;

use crate::base::{ElementId, PackageId};
use crate::error::Result;
use crate::model::{PackageTree, SlimPackage};
use crate::source::queries::{self, columns};
use crate::source::{ElementHandle, Repository};

/// Resolves the current host selection to elements.
#[derive(Debug, Default, Clone, Copy)]
pub struct SelectionService;

impl SelectionService {
    pub fn new() -> Self {
        Self
    }

    /// Elements that are part of the current selection, nested packages
    /// included. The result has no duplicate ids; its order is unspecified.
    pub fn query_selected_elements(&self, repository: &dyn Repository) -> Result<Vec<ElementHandle>> {
        let selection = repository.current_selection()?;

        let selected_packages: IndexSet<PackageId> = selection
            .items
            .iter()
            .filter(|item| item.is_package())
            .map(|item| PackageId(item.element_id))
            .collect();

        if selected_packages.is_empty() {
            let elements: Vec<ElementHandle> = selection.elements().cloned().collect();
            debug!("No package selected, {} elements selected directly", elements.len());
            return Ok(elements);
        }

        let tree = PackageTree::new(&query_all_packages(repository)?);
        let all_packages: Vec<PackageId> = tree.expand(selected_packages.iter().copied()).into_iter().collect();

        let rows = repository.query_rows(&queries::objects_in_packages(&all_packages))?;
        let element_ids: IndexSet<ElementId> = rows.column(columns::OBJECT_ID)?.into_iter().collect();

        debug!(
            "{} selected packages expand to {} packages containing {} elements",
            selected_packages.len(),
            all_packages.len(),
            element_ids.len()
        );

        if element_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<ElementId> = element_ids.into_iter().collect();
        let mut seen = IndexSet::new();
        Ok(repository
            .element_set(&ids)?
            .into_iter()
            .filter(|element| seen.insert(element.id))
            .collect())
    }
}

fn query_all_packages(repository: &dyn Repository) -> Result<Vec<SlimPackage>> {
    let rows = repository.query_rows(queries::ALL_PACKAGES)?;
    let packages = rows
        .iter()
        .map(SlimPackage::from_row)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(packages)
}
