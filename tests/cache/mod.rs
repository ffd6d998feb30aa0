//! Cache service tests
//!
//! - Tagged value lookups against the vehicle model
//! - Lazy rebuild after invalidation
//! - Connector memoization and re-querying
//! - Failure handling during rebuild

#![allow(clippy::unwrap_used)]

mod tests_cache_service;
