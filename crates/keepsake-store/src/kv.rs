//! Key-value store abstraction under the progress gateway.

use async_trait::async_trait;
use thiserror::Error;

/// Backend failures. The gateway turns every one of these into a
/// `PersistenceFailure`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing medium holds data that cannot be decoded.
    #[error("storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The backend refuses to serve requests.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// String key-value storage with get/set/remove semantics.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
