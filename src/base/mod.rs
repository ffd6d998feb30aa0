//! Foundation types shared by every modelkit layer.
//!
//! - [`ElementId`], [`PackageId`], [`ConnectorId`] - host object identifiers
//! - [`ModelKitOptions`], [`WriterOptions`], [`ExportOptions`] - runtime configuration
//! - [`constants`] - export column names and sheet limits
//! - [`group_by`] - order-preserving grouping used by the indexes
//!
//! This module has NO dependencies on other modelkit modules.

pub mod constants;
mod group;
mod ids;
mod options;

pub use group::group_by;
pub use ids::{ConnectorId, ElementId, PackageId};
pub use options::{ExportOptions, ModelKitOptions, WriterOptions};
