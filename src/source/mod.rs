//! Access to the host repository.
//!
//! The host is treated as an opaque data source that can run SQL against its
//! relational store and resolve ids to object handles. Query results come
//! back as a tagged-row XML document:
//!
//! ```xml
//! <EADATA>
//!   <Dataset_0><Data>
//!     <Row><Object_ID>10</Object_ID><Property>Mass</Property><Value>15</Value></Row>
//!   </Data></Dataset_0>
//! </EADATA>
//! ```
//!
//! [`RowSet`] parses that document into column-keyed rows with
//! case-insensitive column lookup. [`queries`] holds the statements the
//! services issue.

mod error;
mod handles;
pub mod queries;
mod rows;

pub use error::DataSourceError;
pub use handles::{ConnectorHandle, ElementHandle, SelectedObject, Selection, SelectionItem};
pub use rows::{Row, RowSet};

use crate::base::{ConnectorId, ElementId};

/// The host repository, as seen by the cache and the selection resolver.
///
/// Implementations wrap the live host session. Services borrow a repository
/// through an `Arc` and never close or dispose it.
pub trait Repository: Send + Sync {
    /// Run a SQL statement and return the raw row document.
    fn sql_query(&self, sql: &str) -> Result<String, DataSourceError>;

    /// Resolve a batch of element ids to handles.
    ///
    /// Ids the host does not know are silently skipped.
    fn element_set(&self, ids: &[ElementId]) -> Result<Vec<ElementHandle>, DataSourceError>;

    /// Resolve a single connector id.
    fn connector(&self, id: ConnectorId) -> Result<ConnectorHandle, DataSourceError>;

    /// What the user currently has selected in the host UI.
    fn current_selection(&self) -> Result<Selection, DataSourceError>;

    /// Run a SQL statement and parse the result into rows.
    fn query_rows(&self, sql: &str) -> Result<RowSet, DataSourceError> {
        let document = self.sql_query(sql)?;
        RowSet::parse(&document)
    }
}
