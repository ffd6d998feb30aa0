use crate::base::ElementId;
use crate::source::queries::columns;
use crate::source::{DataSourceError, Row};

/// A tagged value attached to an element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlimTaggedValue {
    /// Id of the owning element
    pub container_id: ElementId,
    pub name: String,
    pub value: String,
}

impl SlimTaggedValue {
    pub fn new(container_id: ElementId, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            container_id,
            name: name.into(),
            value: value.into(),
        }
    }

    /// Read a `(Object_ID, Property, Value)` row.
    pub fn from_row(row: &Row) -> Result<Self, DataSourceError> {
        Ok(Self {
            container_id: row.parse(columns::OBJECT_ID)?,
            name: row.require(columns::PROPERTY)?.to_string(),
            value: row.get(columns::VALUE).unwrap_or_default().to_string(),
        })
    }
}
