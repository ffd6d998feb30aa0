//! Connector projection.

use crate::base::ElementId;
use crate::error::{ModelKitError, Result};
use crate::source::{ConnectorHandle, ElementHandle};

/// A relationship between two elements, with enough of both endpoints
/// captured to describe it without further host lookups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlimConnector {
    connector_type: String,
    connector_stereotype: String,
    source_id: ElementId,
    target_id: ElementId,
    source_kind: String,
    target_kind: String,
    source_name: String,
    target_name: String,
}

impl SlimConnector {
    /// Project a connector. `source` must be the client end and `target` the
    /// supplier end.
    pub fn new(connector: &ConnectorHandle, source: &ElementHandle, target: &ElementHandle) -> Self {
        Self {
            connector_type: connector.connector_type.clone(),
            connector_stereotype: connector.stereotype.clone(),
            source_id: connector.client_id,
            target_id: connector.supplier_id,
            source_kind: source.kind().to_string(),
            target_kind: target.kind().to_string(),
            source_name: source.name.clone(),
            target_name: target.name.clone(),
        }
    }

    pub fn connector_type(&self) -> &str {
        &self.connector_type
    }

    pub fn connector_stereotype(&self) -> &str {
        &self.connector_stereotype
    }

    pub fn source_id(&self) -> ElementId {
        self.source_id
    }

    pub fn target_id(&self) -> ElementId {
        self.target_id
    }

    /// Whether `element` is an endpoint of this connector.
    pub fn touches(&self, element: ElementId) -> bool {
        element == self.source_id || element == self.target_id
    }

    /// Whether `element` is the source end.
    ///
    /// Fails if `element` is neither end.
    pub fn is_source(&self, element: ElementId) -> Result<bool> {
        self.verify_endpoint(element)?;
        Ok(self.source_id == element)
    }

    /// Name of the element at the other end from `element`.
    pub fn opposite_element_name(&self, element: ElementId) -> Result<&str> {
        Ok(if self.is_source(element)? {
            &self.target_name
        } else {
            &self.source_name
        })
    }

    /// Kind of the element at the other end from `element`.
    pub fn opposite_element_kind(&self, element: ElementId) -> Result<&str> {
        Ok(if self.is_source(element)? {
            &self.target_kind
        } else {
            &self.source_kind
        })
    }

    /// `Type [Stereotype] With {Target|Source} {OppositeKind}`, seen from
    /// `element`.
    pub fn connector_kind_full_name(&self, element: ElementId) -> Result<String> {
        let is_source = self.is_source(element)?;
        let mut parts = vec![self.connector_type.as_str()];

        if !self.connector_stereotype.is_empty() {
            parts.push(&self.connector_stereotype);
        }

        parts.push(if is_source { "With Target" } else { "With Source" });
        parts.push(if is_source {
            &self.target_kind
        } else {
            &self.source_kind
        });

        Ok(parts.join(" "))
    }

    fn verify_endpoint(&self, element: ElementId) -> Result<()> {
        if self.touches(element) {
            return Ok(());
        }

        Err(ModelKitError::invalid_argument(format!(
            "The provided Element ID ({element}) is neither related to the source ({}) or the target ({}).",
            self.source_id, self.target_id
        )))
    }
}
