//! `ProgressGateway` over a `KeyValueStore`.

use std::time::Duration;

use async_trait::async_trait;
use keepsake_core::gateway::{PersistenceFailure, ProgressGateway, StoreOperation};
use keepsake_core::progress::ProgressRecord;
use tracing::{debug, instrument, warn};

use crate::kv::{KeyValueStore, StoreError};

/// Key under which the progress record is stored.
pub const PROGRESS_KEY: &str = "keepsake.progress";

/// Pause before every store call, long enough to outlast a status screen.
pub const DEFAULT_STORAGE_DELAY: Duration = Duration::from_millis(2000);

/// Stores the progress record as JSON text under a single key.
#[derive(Debug)]
pub struct StoredProgressGateway<S> {
    store: S,
    key: String,
    delay: Duration,
}

impl<S: KeyValueStore> StoredProgressGateway<S> {
    /// Wraps `store` with the stock key and delay.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: PROGRESS_KEY.to_owned(),
            delay: DEFAULT_STORAGE_DELAY,
        }
    }

    /// Replaces the pause taken before every store call.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Stores the record under `key` instead of the stock key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    async fn settle(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    fn fail(operation: StoreOperation, err: &StoreError) -> PersistenceFailure {
        warn!(%operation, error = %err, "progress store unavailable");
        PersistenceFailure::unavailable(operation, err.to_string())
    }
}

/// Stored text is opaque: anything non-empty counts as a record, and text
/// that is not JSON is kept as a JSON string.
fn decode(raw: String) -> Option<ProgressRecord> {
    if raw.is_empty() {
        return None;
    }
    let payload = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(_) => serde_json::Value::String(raw),
    };
    Some(ProgressRecord::from_payload(payload))
}

#[async_trait]
impl<S: KeyValueStore> ProgressGateway for StoredProgressGateway<S> {
    #[instrument(skip(self), fields(key = %self.key))]
    async fn load(&self) -> Result<Option<ProgressRecord>, PersistenceFailure> {
        self.settle().await;
        let raw = self
            .store
            .get(&self.key)
            .await
            .map_err(|e| Self::fail(StoreOperation::Load, &e))?;
        let record = raw.and_then(decode);
        debug!(present = record.is_some(), "loaded progress");
        Ok(record)
    }

    #[instrument(skip(self, record), fields(key = %self.key))]
    async fn save(&self, record: &ProgressRecord) -> Result<(), PersistenceFailure> {
        self.settle().await;
        let text = serde_json::to_string(record)
            .map_err(|e| Self::fail(StoreOperation::Save, &StoreError::from(e)))?;
        self.store
            .set(&self.key, &text)
            .await
            .map_err(|e| Self::fail(StoreOperation::Save, &e))?;
        debug!("saved progress");
        Ok(())
    }

    #[instrument(skip(self), fields(key = %self.key))]
    async fn delete(&self) -> Result<(), PersistenceFailure> {
        self.settle().await;
        self.store
            .remove(&self.key)
            .await
            .map_err(|e| Self::fail(StoreOperation::Delete, &e))?;
        debug!("deleted progress");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use keepsake_core::gateway::STORAGE_UNAVAILABLE_MESSAGE;

    use super::*;
    use crate::memory::MemoryStore;

    /// A store that refuses every call, like a browser with storage disabled.
    struct FailingStore;

    #[async_trait]
    impl KeyValueStore for FailingStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("access denied".into()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("access denied".into()))
        }

        async fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("access denied".into()))
        }
    }

    fn instant<S: KeyValueStore>(store: S) -> StoredProgressGateway<S> {
        StoredProgressGateway::new(store).with_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_load_from_empty_store_is_absent() {
        let gateway = instant(MemoryStore::new());

        let loaded = gateway.load().await;

        assert_eq!(loaded, Ok(None));
    }

    #[tokio::test]
    async fn test_save_then_load_is_present() {
        // Arrange
        let gateway = instant(MemoryStore::new());
        let record = ProgressRecord::from_payload(serde_json::json!({ "some": "data" }));

        // Act
        gateway.save(&record).await.unwrap();
        let loaded = gateway.load().await.unwrap();

        // Assert
        assert_eq!(loaded, Some(record));
    }

    #[tokio::test]
    async fn test_delete_then_load_is_absent() {
        let gateway = instant(MemoryStore::with_entries([(PROGRESS_KEY, "{}")]));

        gateway.delete().await.unwrap();

        assert_eq!(gateway.load().await, Ok(None));
    }

    #[tokio::test]
    async fn test_empty_value_counts_as_absent() {
        let gateway = instant(MemoryStore::with_entries([(PROGRESS_KEY, "")]));

        assert_eq!(gateway.load().await, Ok(None));
    }

    #[tokio::test]
    async fn test_non_json_value_counts_as_present() {
        let gateway = instant(MemoryStore::with_entries([(PROGRESS_KEY, "done")]));

        let loaded = gateway.load().await.unwrap().unwrap();

        assert_eq!(loaded.payload(), &serde_json::Value::String("done".into()));
    }

    #[tokio::test]
    async fn test_custom_key_is_used() {
        let gateway = instant(MemoryStore::new()).with_key("other");
        let record = ProgressRecord::from_payload(serde_json::json!(1));

        gateway.save(&record).await.unwrap();

        assert_eq!(gateway.store().get("other").await.unwrap().as_deref(), Some("1"));
        assert_eq!(gateway.store().get(PROGRESS_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_errors_become_persistence_failures() {
        // Arrange
        let gateway = instant(FailingStore);
        let record = ProgressRecord::from_payload(serde_json::json!({}));

        // Act
        let load = gateway.load().await.unwrap_err();
        let save = gateway.save(&record).await.unwrap_err();
        let delete = gateway.delete().await.unwrap_err();

        // Assert
        assert_eq!(load.operation, StoreOperation::Load);
        assert_eq!(save.operation, StoreOperation::Save);
        assert_eq!(delete.operation, StoreOperation::Delete);
        assert_eq!(load.message, STORAGE_UNAVAILABLE_MESSAGE);
        assert!(load.detail.contains("access denied"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_call_waits_for_the_storage_delay() {
        // Arrange
        let gateway = StoredProgressGateway::new(MemoryStore::new());
        let started = tokio::time::Instant::now();

        // Act
        gateway.load().await.unwrap();

        // Assert
        assert!(started.elapsed() >= DEFAULT_STORAGE_DELAY);
    }
}
