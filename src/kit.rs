//! ModelKit: composition root wiring the services together.
//!
//! ## Usage
//!
//! ```ignore
//! let kit = ModelKit::new(ModelKitOptions::default());
//! let dispatcher = kit.dispatcher();
//!
//! dispatcher.connect(repository.clone());
//! dispatcher.handle_callback("EA_FileOpen", repository.clone());
//!
//! if let Some(mut session) = dispatcher.on_generic_export(repository.as_ref())? {
//!     session.setup_mut("Requirement").map(|s| s.set_should_be_exported(false));
//!     dispatcher.run_export(&session, Path::new("model.xlsx"))?;
//! }
//! ```

use std::sync::Arc;

use crate::base::ModelKitOptions;
use crate::cache::CacheService;
use crate::dispatch::DispatcherService;
use crate::export::GenericExporterService;
use crate::selection::SelectionService;
use crate::writer::{ExcelWriter, ExportWriter};

/// Owns one instance of every service for the lifetime of the add-in.
#[derive(Debug)]
pub struct ModelKit {
    options: ModelKitOptions,
    cache: Arc<CacheService>,
    dispatcher: DispatcherService,
}

impl Default for ModelKit {
    fn default() -> Self {
        Self::new(ModelKitOptions::default())
    }
}

impl ModelKit {
    /// Wire the services with the xlsx writer.
    pub fn new(options: ModelKitOptions) -> Self {
        let writer = Arc::new(ExcelWriter::new(options.writer.clone()));
        Self::with_writer(options, writer)
    }

    /// Wire the services around a custom writer.
    pub fn with_writer(options: ModelKitOptions, writer: Arc<dyn ExportWriter>) -> Self {
        let cache = Arc::new(CacheService::with_parallel_lookup(options.parallel_lookup));
        let exporter = Arc::new(GenericExporterService::new(
            writer,
            options.export.value_separator.clone(),
        ));
        let dispatcher = DispatcherService::new(Arc::clone(&cache), SelectionService::new(), exporter);

        Self {
            options,
            cache,
            dispatcher,
        }
    }

    pub fn options(&self) -> &ModelKitOptions {
        &self.options
    }

    pub fn cache(&self) -> &Arc<CacheService> {
        &self.cache
    }

    pub fn dispatcher(&self) -> &DispatcherService {
        &self.dispatcher
    }
}
