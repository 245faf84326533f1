//! Integration tests for `FileStore` and the gateway on top of it.

use std::time::Duration;

use keepsake_core::gateway::{ProgressGateway, StoreOperation};
use keepsake_core::progress::ProgressRecord;
use keepsake_store::{FileStore, KeyValueStore, PROGRESS_KEY, StoreError, StoredProgressGateway};

// --- FileStore ---

#[tokio::test]
async fn test_missing_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("progress.json"));

    let value = store.get("anything").await.unwrap();

    assert_eq!(value, None);
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_values_survive_a_new_store_instance() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.json");
    FileStore::new(&path).set("k", "v").await.unwrap();

    // Act
    let reopened = FileStore::new(&path);
    let value = reopened.get("k").await.unwrap();

    // Assert
    assert_eq!(value.as_deref(), Some("v"));
    assert!(!path.with_extension("tmp").exists());
}

#[tokio::test]
async fn test_remove_keeps_other_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("progress.json"));
    store.set("a", "1").await.unwrap();
    store.set("b", "2").await.unwrap();

    store.remove("a").await.unwrap();

    assert_eq!(store.get("a").await.unwrap(), None);
    assert_eq!(store.get("b").await.unwrap().as_deref(), Some("2"));
}

#[tokio::test]
async fn test_corrupt_file_is_an_encoding_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.json");
    std::fs::write(&path, "not json").unwrap();
    let store = FileStore::new(&path);

    let result = store.get("k").await;

    assert!(matches!(result, Err(StoreError::Encoding(_))));
}

// --- gateway over FileStore ---

#[tokio::test]
async fn test_gateway_round_trip_through_file() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.json");
    let gateway = StoredProgressGateway::new(FileStore::new(&path)).with_delay(Duration::ZERO);
    let record = ProgressRecord::from_payload(serde_json::json!({ "some": "data" }));

    // Act
    gateway.save(&record).await.unwrap();
    let loaded = gateway.load().await.unwrap();

    // Assert
    assert_eq!(loaded, Some(record));
    let on_disk: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk[PROGRESS_KEY], r#"{"some":"data"}"#);
}

#[tokio::test]
async fn test_gateway_reports_failure_when_file_is_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let gateway =
        StoredProgressGateway::new(FileStore::new(dir.path())).with_delay(Duration::ZERO);

    let failure = gateway.load().await.unwrap_err();

    assert_eq!(failure.operation, StoreOperation::Load);
}
