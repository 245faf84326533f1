//! Test gateways — in-memory `ProgressGateway` implementations.

use std::sync::Mutex;

use async_trait::async_trait;
use keepsake_core::gateway::{PersistenceFailure, ProgressGateway, StoreOperation};
use keepsake_core::progress::ProgressRecord;

/// One call observed by a test gateway.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    /// `load` was called.
    Load,
    /// `save` was called with this record.
    Save(ProgressRecord),
    /// `delete` was called.
    Delete,
}

/// A gateway holding the record in memory and recording every call.
///
/// Writes can be configured to fail while loads keep working, which is the
/// setup needed to exercise the persistence policy.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    record: Mutex<Option<ProgressRecord>>,
    calls: Mutex<Vec<GatewayCall>>,
    failing_writes: bool,
}

impl RecordingGateway {
    /// A gateway with no stored record.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A gateway already holding `record`.
    #[must_use]
    pub fn with_record(record: ProgressRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
            ..Self::default()
        }
    }

    /// Makes `save` and `delete` fail without touching the stored record.
    #[must_use]
    pub fn failing_writes(mut self) -> Self {
        self.failing_writes = true;
        self
    }

    /// Every call seen so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The record currently held.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn stored(&self) -> Option<ProgressRecord> {
        self.record.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressGateway for RecordingGateway {
    async fn load(&self) -> Result<Option<ProgressRecord>, PersistenceFailure> {
        self.calls.lock().unwrap().push(GatewayCall::Load);
        Ok(self.record.lock().unwrap().clone())
    }

    async fn save(&self, record: &ProgressRecord) -> Result<(), PersistenceFailure> {
        self.calls
            .lock()
            .unwrap()
            .push(GatewayCall::Save(record.clone()));
        if self.failing_writes {
            return Err(PersistenceFailure::unavailable(StoreOperation::Save, "quota exceeded"));
        }
        *self.record.lock().unwrap() = Some(record.clone());
        Ok(())
    }

    async fn delete(&self) -> Result<(), PersistenceFailure> {
        self.calls.lock().unwrap().push(GatewayCall::Delete);
        if self.failing_writes {
            return Err(PersistenceFailure::unavailable(StoreOperation::Delete, "quota exceeded"));
        }
        *self.record.lock().unwrap() = None;
        Ok(())
    }
}

/// A gateway whose backend is unusable: every call fails. Calls are still
/// recorded so tests can assert what was attempted.
#[derive(Debug, Default)]
pub struct FailingGateway {
    calls: Mutex<Vec<GatewayCall>>,
}

impl FailingGateway {
    /// Every call seen so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The failure this gateway returns for `operation`.
    #[must_use]
    pub fn failure(operation: StoreOperation) -> PersistenceFailure {
        PersistenceFailure::unavailable(operation, "connection refused")
    }
}

#[async_trait]
impl ProgressGateway for FailingGateway {
    async fn load(&self) -> Result<Option<ProgressRecord>, PersistenceFailure> {
        self.calls.lock().unwrap().push(GatewayCall::Load);
        Err(Self::failure(StoreOperation::Load))
    }

    async fn save(&self, record: &ProgressRecord) -> Result<(), PersistenceFailure> {
        self.calls
            .lock()
            .unwrap()
            .push(GatewayCall::Save(record.clone()));
        Err(Self::failure(StoreOperation::Save))
    }

    async fn delete(&self) -> Result<(), PersistenceFailure> {
        self.calls.lock().unwrap().push(GatewayCall::Delete);
        Err(Self::failure(StoreOperation::Delete))
    }
}
