//! Host-facing entry points.
//!
//! The host drives the add-in through named callbacks. [`DispatcherService`]
//! turns them into service calls:
//!
//! ```text
//! connect / disconnect ──▶ lifecycle log lines
//! model change events  ──▶ CacheService::initialize (cache goes dirty)
//! "Generic Export"     ──▶ SelectionService ──▶ ExportSession
//!                                                  │ user picks columns
//!                                                  ▼
//!                                   run_export ──▶ GenericExporterService
//! ```
//!
//! `run_export` is where export failures are logged before they are handed
//! to the UI.

mod events;
mod session;

pub use events::ModelEvent;
pub use session::ExportSession;

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info, trace, warn};

use crate::cache::CacheService;
use crate::error::Result;
use crate::export::GenericExporterService;
use crate::selection::SelectionService;
use crate::source::Repository;

/// Version reported in lifecycle log lines.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug)]
pub struct DispatcherService {
    cache: Arc<CacheService>,
    selection: SelectionService,
    exporter: Arc<GenericExporterService>,
}

impl DispatcherService {
    pub fn new(
        cache: Arc<CacheService>,
        selection: SelectionService,
        exporter: Arc<GenericExporterService>,
    ) -> Self {
        Self {
            cache,
            selection,
            exporter,
        }
    }

    /// The host loaded the add-in. Binds `repository` so the cache is usable
    /// before the first file event arrives.
    pub fn connect(&self, repository: Arc<dyn Repository>) {
        info!("modelkit {} connected", VERSION);
        self.cache.initialize(repository);
    }

    pub fn disconnect(&self) {
        info!("modelkit {} disconnected", VERSION);
    }

    /// Any model change marks the cache dirty against `repository`.
    pub fn handle_model_event(&self, event: ModelEvent, repository: Arc<dyn Repository>) {
        trace!("{} received, invalidating cache", event);
        self.cache.initialize(repository);
    }

    /// Route a raw host callback. Returns `false` for callbacks that are not
    /// model events.
    pub fn handle_callback(&self, name: &str, repository: Arc<dyn Repository>) -> bool {
        match ModelEvent::from_callback_name(name) {
            Some(event) => {
                self.handle_model_event(event, repository);
                true
            }
            None => {
                trace!("Ignoring callback {}", name);
                false
            }
        }
    }

    /// Resolve the current selection and open an export session for it.
    ///
    /// Returns `Ok(None)` when nothing exportable is selected.
    pub fn on_generic_export(&self, repository: &dyn Repository) -> Result<Option<ExportSession>> {
        let elements = self.selection.query_selected_elements(repository)?;
        if elements.is_empty() {
            warn!("No elements selected for export");
            return Ok(None);
        }

        info!("Preparing export of {} selected elements", elements.len());
        ExportSession::new(&self.cache, Arc::clone(&self.exporter), &elements).map(Some)
    }

    /// Run the export and log any failure before returning it.
    pub fn run_export(&self, session: &ExportSession, path: &Path) -> Result<()> {
        session.export(path).inspect_err(|e| {
            error!("Generic export to {} failed: {}", path.display(), e);
        })
    }

    pub fn cache(&self) -> &CacheService {
        &self.cache
    }
}
