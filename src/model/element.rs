use std::sync::Arc;

use indexmap::IndexMap;

use super::{SlimConnector, SlimTaggedValue};
use crate::base::{ElementId, group_by};
use crate::error::Result;
use crate::source::ElementHandle;

/// An element with its tagged values grouped by name and its connectors
/// grouped by full connector kind, as seen from this element.
///
/// Assembled per export from cache query results, never cached itself.
#[derive(Clone, Debug, PartialEq)]
pub struct SlimElement {
    pub element_id: ElementId,
    pub element_type: String,
    pub stereotype: String,
    /// Stereotype if non-empty, type otherwise
    pub element_kind: String,
    pub name: String,
    pub alias: String,
    pub notes: String,
    pub tagged_values: IndexMap<String, Vec<SlimTaggedValue>>,
    pub connectors: IndexMap<String, Vec<Arc<SlimConnector>>>,
}

impl SlimElement {
    /// Build from a handle plus the tagged values and connectors the cache
    /// returned for it. Fails if a connector does not touch the element.
    pub fn new(
        element: &ElementHandle,
        tagged_values: impl IntoIterator<Item = SlimTaggedValue>,
        connectors: impl IntoIterator<Item = Arc<SlimConnector>>,
    ) -> Result<Self> {
        let mut grouped_connectors: IndexMap<String, Vec<Arc<SlimConnector>>> = IndexMap::new();

        for connector in connectors {
            let kind = connector.connector_kind_full_name(element.id)?;
            grouped_connectors.entry(kind).or_default().push(connector);
        }

        Ok(Self {
            element_id: element.id,
            element_type: element.element_type.clone(),
            stereotype: element.stereotype.clone(),
            element_kind: element.kind().to_string(),
            name: element.name.clone(),
            alias: element.alias.clone(),
            notes: element.notes.clone(),
            tagged_values: group_by(tagged_values, |tv| tv.name.clone()),
            connectors: grouped_connectors,
        })
    }

    /// Values of every tagged value called `name`, in source order.
    pub fn tagged_value_values(&self, name: &str) -> impl Iterator<Item = &str> {
        self.tagged_values
            .get(name)
            .into_iter()
            .flatten()
            .map(|tv| tv.value.as_str())
    }

    /// Names of the elements at the far end of every connector of `kind`.
    pub fn connected_element_names(&self, kind: &str) -> Result<Vec<&str>> {
        self.connectors
            .get(kind)
            .into_iter()
            .flatten()
            .map(|connector| connector.opposite_element_name(self.element_id))
            .collect()
    }
}
