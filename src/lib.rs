//! # modelkit-base
//!
//! Element caching, selection resolution and spreadsheet export for a
//! UML/SysML modeling host.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! kit        → ModelKit composition root
//!   ↓
//! dispatch   → Host callbacks, export sessions
//!   ↓
//! export     → ExportSetup, ExportableElement, GenericExporterService
//!   ↓
//! selection  → Selection expansion through nested packages
//! cache      → Tagged value index, connector memo, dirty flag
//!   ↓
//! model      → Slim projections (elements, connectors, packages)
//!   ↓
//! source     → Repository trait, row documents, SQL statements
//! writer     → Sheet, ExcelWriter (xlsx)
//!   ↓
//! base       → Primitives (ids, options, constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → source/writer → model → cache → export)
// ============================================================================

/// Foundation types: ids, options, constants
pub mod base;

/// Host repository access: Repository trait, RowSet, queries
pub mod source;

/// Spreadsheet output: Sheet, ExportWriter, ExcelWriter
pub mod writer;

/// Slim projections of host objects
pub mod model;

/// Lazily rebuilt tagged value index and connector memo
pub mod cache;

/// Selection expansion through nested packages
pub mod selection;

/// Export shaping and the generic exporter
pub mod export;

/// Host callbacks and export sessions
pub mod dispatch;

mod error;
mod kit;

pub use base::{ConnectorId, ElementId, ExportOptions, ModelKitOptions, PackageId, WriterOptions};
pub use cache::{CacheService, CacheStatus};
pub use dispatch::{DispatcherService, ExportSession, ModelEvent};
pub use error::{ModelKitError, Result};
pub use export::{ExportSetup, ExportableElement, GenericExportConfiguration, GenericExporterService};
pub use kit::ModelKit;
pub use selection::SelectionService;
pub use source::{DataSourceError, Repository};
pub use writer::{ExcelWriter, ExportWriter, Sheet, WriterError};
