//! In-memory read-through cache over the host repository.
//!
//! The cache owns two indexes:
//!
//! - every tagged value in the model grouped by owning element, rebuilt in
//!   one bulk query whenever the cache is dirty
//! - connectors resolved on demand, keyed by connector id and filled one
//!   element at a time
//!
//! ## Invalidation
//!
//! ```text
//!            initialize(repo)
//!   Clean ─────────────────────▶ Dirty ◀──┐
//!     ▲                            │      │ rebuild failed
//!     │       rebuild succeeded    │      │
//!     └────────────────────────────┴──────┘
//!              (on next query)
//! ```
//!
//! [`CacheService::initialize`] only flips the state and rebinds the
//! repository. The first query afterwards rebuilds the tagged value index and
//! clears the connector cache. A failed rebuild keeps the previous index and
//! leaves the cache dirty, so the next query retries.
//!
//! Reads are guarded by a `parking_lot` reader-writer lock: the
//! check-and-rebuild step holds the upgradable lock so only one rebuild runs
//! at a time, and queries read the index concurrently once it is clean.

mod index;

pub use index::TaggedValueIndex;

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use parking_lot::{RwLock, RwLockReadGuard, RwLockUpgradableReadGuard, RwLockWriteGuard};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{debug, info, trace};

use crate::base::{ConnectorId, ElementId};
use crate::error::Result;
use crate::model::{SlimConnector, SlimTaggedValue};
use crate::source::queries::{self, columns};
use crate::source::{DataSourceError, ElementHandle, Repository};

/// Freshness of the tagged value index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheStatus {
    /// The index reflects the repository as of the last rebuild.
    Clean,
    /// The repository changed (or was rebound); rebuild before the next read.
    Dirty,
}

struct CacheState {
    repository: Option<Arc<dyn Repository>>,
    status: CacheStatus,
    /// Bumped on every invalidation so in-flight connector resolutions
    /// started before it are not stored.
    generation: u64,
    tagged_values: TaggedValueIndex,
}

impl CacheState {
    fn repository(&self) -> Result<Arc<dyn Repository>> {
        self.repository.clone().ok_or_else(|| {
            DataSourceError::query("no repository has been bound to the cache").into()
        })
    }
}

/// Process-wide cache of tagged values and connectors.
pub struct CacheService {
    state: RwLock<CacheState>,
    connectors: RwLock<FxHashMap<ConnectorId, Arc<SlimConnector>>>,
    parallel_lookup: bool,
}

impl CacheService {
    pub fn new() -> Self {
        Self::with_parallel_lookup(true)
    }

    /// Create a cache, choosing whether multi-element lookups fan out over
    /// the rayon pool.
    pub fn with_parallel_lookup(parallel_lookup: bool) -> Self {
        Self {
            state: RwLock::new(CacheState {
                repository: None,
                status: CacheStatus::Dirty,
                generation: 0,
                tagged_values: TaggedValueIndex::default(),
            }),
            connectors: RwLock::new(FxHashMap::default()),
            parallel_lookup,
        }
    }

    /// Rebind the repository and mark the cache dirty. Performs no I/O.
    pub fn initialize(&self, repository: Arc<dyn Repository>) {
        let mut state = self.state.write();
        state.repository = Some(repository);
        state.status = CacheStatus::Dirty;
        state.generation += 1;
        trace!("Cache invalidated (generation {})", state.generation);
    }

    pub fn status(&self) -> CacheStatus {
        self.state.read().status
    }

    /// Tagged values owned by `element`; empty if it has none.
    pub fn tagged_values(&self, element: ElementId) -> Result<Vec<SlimTaggedValue>> {
        let state = self.ensure_fresh()?;
        Ok(state.tagged_values.get(element).to_vec())
    }

    /// Tagged values owned by any of `elements`, flattened. Order across
    /// elements is not significant.
    pub fn tagged_values_for(&self, elements: &[ElementId]) -> Result<Vec<SlimTaggedValue>> {
        let state = self.ensure_fresh()?;
        let index = &state.tagged_values;

        let tagged_values = if self.parallel_lookup {
            elements
                .par_iter()
                .flat_map_iter(|&element| index.get(element).iter().cloned())
                .collect()
        } else {
            elements
                .iter()
                .flat_map(|&element| index.get(element).iter().cloned())
                .collect()
        };

        Ok(tagged_values)
    }

    /// Connectors with `element` at either end.
    ///
    /// Connector ids are always re-queried; connectors not yet cached are
    /// resolved (endpoints fetched in one batch) and stored.
    pub fn associated_connectors(&self, element: ElementId) -> Result<Vec<Arc<SlimConnector>>> {
        let (repository, generation) = {
            let state = self.ensure_fresh()?;
            (state.repository()?, state.generation)
        };

        let rows = repository.query_rows(&queries::connectors_of(element))?;
        let connector_ids: IndexSet<ConnectorId> =
            rows.column(columns::CONNECTOR_ID)?.into_iter().collect();

        let mut known: IndexMap<ConnectorId, Arc<SlimConnector>> = {
            let connectors = self.connectors.read();
            connector_ids
                .iter()
                .filter_map(|id| connectors.get(id).map(|c| (*id, Arc::clone(c))))
                .collect()
        };

        let missing: Vec<ConnectorId> = connector_ids
            .iter()
            .filter(|id| !known.contains_key(*id))
            .copied()
            .collect();

        if !missing.is_empty() {
            let resolved = resolve_connectors(repository.as_ref(), &missing)?;
            self.store_connectors(generation, &resolved);
            known.extend(resolved);
        }

        debug!(
            "Element {}: {} connectors ({} resolved, {} cached)",
            element,
            connector_ids.len(),
            missing.len(),
            connector_ids.len() - missing.len()
        );

        Ok(connector_ids
            .iter()
            .filter_map(|id| known.get(id).cloned())
            .collect())
    }

    /// Number of connectors currently held.
    pub fn cached_connector_count(&self) -> usize {
        self.connectors.read().len()
    }

    /// Return a read guard on a clean state, rebuilding first if needed.
    fn ensure_fresh(&self) -> Result<RwLockReadGuard<'_, CacheState>> {
        {
            let state = self.state.read();
            if state.status == CacheStatus::Clean {
                return Ok(state);
            }
        }

        let state = self.state.upgradable_read();
        if state.status == CacheStatus::Clean {
            return Ok(RwLockUpgradableReadGuard::downgrade(state));
        }

        let repository = state.repository()?;
        let index = TaggedValueIndex::load(repository.as_ref())?;

        let mut state = RwLockUpgradableReadGuard::upgrade(state);
        info!(
            "Cache rebuilt: {} tagged values on {} elements",
            index.tagged_value_count(),
            index.element_count()
        );
        state.tagged_values = index;
        state.status = CacheStatus::Clean;
        self.connectors.write().clear();

        Ok(RwLockWriteGuard::downgrade(state))
    }

    fn store_connectors(&self, generation: u64, resolved: &[(ConnectorId, Arc<SlimConnector>)]) {
        // Holding the state lock keeps a rebuild from clearing in between.
        let state = self.state.read();
        if state.generation != generation {
            debug!("Cache invalidated during connector resolution, results not stored");
            return;
        }

        let mut connectors = self.connectors.write();
        for (id, connector) in resolved {
            connectors.insert(*id, Arc::clone(connector));
        }
    }
}

impl Default for CacheService {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("CacheService")
            .field("status", &state.status)
            .field("generation", &state.generation)
            .field("elements", &state.tagged_values.element_count())
            .field("connectors", &self.connectors.read().len())
            .finish()
    }
}

/// Resolve connectors and both their endpoints, fetching every endpoint in
/// one batched lookup.
fn resolve_connectors(
    repository: &dyn Repository,
    ids: &[ConnectorId],
) -> Result<Vec<(ConnectorId, Arc<SlimConnector>)>> {
    let handles = ids
        .iter()
        .map(|&id| repository.connector(id))
        .collect::<Result<Vec<_>, _>>()?;

    let endpoint_ids: Vec<ElementId> = handles
        .iter()
        .flat_map(|handle| [handle.client_id, handle.supplier_id])
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect();

    let endpoints: FxHashMap<ElementId, ElementHandle> = repository
        .element_set(&endpoint_ids)?
        .into_iter()
        .map(|element| (element.id, element))
        .collect();

    let endpoint = |id: ElementId| {
        endpoints
            .get(&id)
            .ok_or_else(|| DataSourceError::unresolved_element(id.get()))
    };

    handles
        .iter()
        .map(|handle| -> Result<(ConnectorId, Arc<SlimConnector>)> {
            let source = endpoint(handle.client_id)?;
            let target = endpoint(handle.supplier_id)?;
            Ok((handle.id, Arc::new(SlimConnector::new(handle, source, target))))
        })
        .collect()
}
