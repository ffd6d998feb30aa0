//! Export pipeline.
//!
//! ```text
//! SlimElement ──▶ ExportSetup (per kind, user picks columns)
//!                     │
//!                     ▼
//!         GenericExportConfiguration
//!                     │  GenericExporterService
//!                     ▼
//!  ExportableElement rows grouped by kind ──▶ Sheet ──▶ ExportWriter
//! ```

mod configuration;
mod exportable;
mod exporter;
mod notes;
mod setup;

pub use configuration::GenericExportConfiguration;
pub use exportable::ExportableElement;
pub use exporter::GenericExporterService;
pub use notes::decode_html_entities;
pub use setup::ExportSetup;
