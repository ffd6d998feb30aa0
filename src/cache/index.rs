//! Tagged value index.

use rustc_hash::FxHashMap;

use crate::base::ElementId;
use crate::model::SlimTaggedValue;
use crate::source::queries::ALL_TAGGED_VALUES;
use crate::source::{DataSourceError, Repository, RowSet};

/// Every tagged value in the model, grouped by owning element.
#[derive(Clone, Debug, Default)]
pub struct TaggedValueIndex {
    by_element: FxHashMap<ElementId, Vec<SlimTaggedValue>>,
}

impl TaggedValueIndex {
    /// Run the bulk tagged value query and group its rows.
    pub fn load(repository: &dyn Repository) -> Result<Self, DataSourceError> {
        let rows = repository.query_rows(ALL_TAGGED_VALUES)?;
        Self::from_rows(&rows)
    }

    /// Group rows by owning element. Any malformed row fails the whole index.
    pub fn from_rows(rows: &RowSet) -> Result<Self, DataSourceError> {
        let mut by_element: FxHashMap<ElementId, Vec<SlimTaggedValue>> = FxHashMap::default();
        for row in rows {
            let tagged_value = SlimTaggedValue::from_row(row)?;
            by_element
                .entry(tagged_value.container_id)
                .or_default()
                .push(tagged_value);
        }
        Ok(Self { by_element })
    }

    /// Tagged values of `element`, empty if none.
    pub fn get(&self, element: ElementId) -> &[SlimTaggedValue] {
        self.by_element
            .get(&element)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn element_count(&self) -> usize {
        self.by_element.len()
    }

    pub fn tagged_value_count(&self) -> usize {
        self.by_element.values().map(Vec::len).sum()
    }
}
