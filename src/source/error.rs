//! Error types for repository access.

use thiserror::Error;

/// Errors raised while querying the host repository or decoding its answers.
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// The host rejected or failed to run a query.
    #[error("Query failed: {0}")]
    Query(String),

    /// The row document is not well-formed XML.
    #[error("Malformed row document: {0}")]
    Xml(String),

    /// A row lacks a column the caller needs.
    #[error("Missing column: {column}")]
    MissingColumn { column: String },

    /// A column value could not be converted.
    #[error("Invalid value for column {column}: {value:?}")]
    InvalidValue { column: String, value: String },

    /// An id could not be resolved to a host object.
    #[error("Unresolved {kind}: {id}")]
    Unresolved { kind: &'static str, id: i32 },
}

impl DataSourceError {
    /// Create a query error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }

    /// Create a malformed-document error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Create a missing column error.
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Create an unresolved element error.
    pub fn unresolved_element(id: i32) -> Self {
        Self::Unresolved { kind: "element", id }
    }

    /// Create an unresolved connector error.
    pub fn unresolved_connector(id: i32) -> Self {
        Self::Unresolved {
            kind: "connector",
            id,
        }
    }
}
