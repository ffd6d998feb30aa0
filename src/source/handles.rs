//! Handles returned by the host when resolving ids.

use crate::base::{ConnectorId, ElementId, constants::PACKAGE_BASE_TYPE};

/// An element as resolved by the host.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ElementHandle {
    pub id: ElementId,
    pub element_type: String,
    pub stereotype: String,
    pub name: String,
    pub alias: String,
    pub notes: String,
}

impl ElementHandle {
    pub fn new(id: ElementId, element_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            element_type: element_type.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_stereotype(mut self, stereotype: impl Into<String>) -> Self {
        self.stereotype = stereotype.into();
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// The stereotype if one is applied, the base type otherwise.
    pub fn kind(&self) -> &str {
        effective_kind(&self.stereotype, &self.element_type)
    }
}

/// A connector as resolved by the host.
///
/// `client_id` is the source end, `supplier_id` the target end.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ConnectorHandle {
    pub id: ConnectorId,
    pub connector_type: String,
    pub stereotype: String,
    pub client_id: ElementId,
    pub supplier_id: ElementId,
}

impl ConnectorHandle {
    pub fn new(
        id: ConnectorId,
        connector_type: impl Into<String>,
        client_id: ElementId,
        supplier_id: ElementId,
    ) -> Self {
        Self {
            id,
            connector_type: connector_type.into(),
            stereotype: String::new(),
            client_id,
            supplier_id,
        }
    }

    pub fn with_stereotype(mut self, stereotype: impl Into<String>) -> Self {
        self.stereotype = stereotype.into();
        self
    }

    /// The stereotype if one is applied, the base type otherwise.
    pub fn kind(&self) -> &str {
        effective_kind(&self.stereotype, &self.connector_type)
    }
}

pub(crate) fn effective_kind<'a>(stereotype: &'a str, base_type: &'a str) -> &'a str {
    if stereotype.is_empty() {
        base_type
    } else {
        stereotype
    }
}

/// One entry of the host's "selected UI items" list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionItem {
    /// Discriminator of the selected item ("Package", "Element", "Diagram", ...).
    pub base_type: String,
    /// Id of the item in its own table.
    pub element_id: i32,
}

impl SelectionItem {
    pub fn new(base_type: impl Into<String>, element_id: i32) -> Self {
        Self {
            base_type: base_type.into(),
            element_id,
        }
    }

    pub fn package(package_id: i32) -> Self {
        Self::new(PACKAGE_BASE_TYPE, package_id)
    }

    pub fn is_package(&self) -> bool {
        self.base_type == PACKAGE_BASE_TYPE
    }
}

/// An object the host already expanded the selection into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectedObject {
    Element(ElementHandle),
    /// Diagrams and anything else that is not an element.
    Other { object_type: String },
}

/// Snapshot of the host's current selection.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Selection {
    pub items: Vec<SelectionItem>,
    pub element_set: Vec<SelectedObject>,
}

impl Selection {
    /// Elements of the host-expanded selection, other objects dropped.
    pub fn elements(&self) -> impl Iterator<Item = &ElementHandle> {
        self.element_set.iter().filter_map(|object| match object {
            SelectedObject::Element(element) => Some(element),
            SelectedObject::Other { .. } => None,
        })
    }
}
