//! Crate-level error taxonomy.

use thiserror::Error;

use crate::source::DataSourceError;
use crate::writer::WriterError;

/// Errors surfaced by modelkit services.
#[derive(Debug, Error)]
pub enum ModelKitError {
    /// Querying the host repository failed. Retried lazily by the cache.
    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    /// A caller broke a precondition. Never retried.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Producing the spreadsheet failed.
    #[error(transparent)]
    Writer(#[from] WriterError),
}

impl ModelKitError {
    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

pub type Result<T, E = ModelKitError> = std::result::Result<T, E>;
