//! JSON file key-value store.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::kv::{KeyValueStore, StoreError};

/// A key-value store persisted as one JSON object in a file.
///
/// A missing file reads as an empty store. Writes replace the file through a
/// sibling temporary file and a rename.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serialises read-modify-write cycles within this process.
    guard: Mutex<()>,
}

impl FileStore {
    /// Creates a store backed by `path`. Nothing is read until first use.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(entries)?;
        let staging = self.path.with_extension("tmp");
        tokio::fs::write(&staging, text).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        debug!(path = %self.path.display(), keys = entries.len(), "wrote store file");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _held = self.guard.lock().await;
        Ok(self.read_entries().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _held = self.guard.lock().await;
        let mut entries = self.read_entries().await?;
        entries.insert(key.to_owned(), value.to_owned());
        self.write_entries(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _held = self.guard.lock().await;
        let mut entries = self.read_entries().await?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries).await?;
        }
        Ok(())
    }
}
