//! Keepsake — progress persistence.
//!
//! Key-value backends and the gateway that stores the progress record in one
//! of them, converting every backend error into a `PersistenceFailure`.

pub mod file;
pub mod gateway;
pub mod kv;
pub mod memory;

pub use file::FileStore;
pub use gateway::{DEFAULT_STORAGE_DELAY, PROGRESS_KEY, StoredProgressGateway};
pub use kv::{KeyValueStore, StoreError};
pub use memory::MemoryStore;
