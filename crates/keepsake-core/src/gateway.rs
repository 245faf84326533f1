//! Persistence gateway port.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::progress::ProgressRecord;

/// Message shown to the user when the progress store cannot be used.
pub const STORAGE_UNAVAILABLE_MESSAGE: &str =
    "Couldn't access the progress store. Please check your settings and try again.";

/// The gateway operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    /// Reading the progress record.
    Load,
    /// Writing the progress record.
    Save,
    /// Removing the progress record.
    Delete,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StoreOperation::Load => "load",
            StoreOperation::Save => "save",
            StoreOperation::Delete => "delete",
        })
    }
}

/// The storage backend is unusable.
///
/// Gateways hand this back as an ordinary value so the flow can branch on it.
/// It displays as the user-facing message; `detail` keeps the backend cause
/// for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PersistenceFailure {
    /// Which operation failed.
    pub operation: StoreOperation,
    /// User-facing message.
    pub message: String,
    /// Backend-specific cause.
    pub detail: String,
}

impl PersistenceFailure {
    /// Builds a failure with the stock user-facing message.
    #[must_use]
    pub fn unavailable(operation: StoreOperation, detail: impl Into<String>) -> Self {
        Self {
            operation,
            message: STORAGE_UNAVAILABLE_MESSAGE.to_owned(),
            detail: detail.into(),
        }
    }
}

/// Load, save and delete of the single progress record.
///
/// Implementations must never let a backend error escape as anything other
/// than a `PersistenceFailure`.
#[async_trait]
pub trait ProgressGateway: Send + Sync {
    /// Reads the record. `Ok(None)` means the user has not finished the
    /// introduction yet.
    async fn load(&self) -> Result<Option<ProgressRecord>, PersistenceFailure>;

    /// Stores the record, replacing any previous one.
    async fn save(&self, record: &ProgressRecord) -> Result<(), PersistenceFailure>;

    /// Removes the record.
    async fn delete(&self) -> Result<(), PersistenceFailure>;
}
