//! Dispatcher tests
//!
//! - Model events invalidate the cache
//! - Generic export from host selection to workbook

#![allow(clippy::unwrap_used)]
