//! The progress record and the clock used to stamp it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Abstraction over system time for deterministic records.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Marker that the user has completed the introduction before.
///
/// The flow only ever asks whether a record exists. The payload belongs to the
/// gateway and to whatever screens may read it later, so it is kept as an
/// opaque JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressRecord {
    payload: serde_json::Value,
}

impl ProgressRecord {
    /// Wraps an arbitrary JSON payload.
    #[must_use]
    pub fn from_payload(payload: serde_json::Value) -> Self {
        Self { payload }
    }

    /// The record written at the end of the first-time flow.
    #[must_use]
    pub fn completed(clock: &dyn Clock) -> Self {
        Self {
            payload: serde_json::json!({ "completed_at": clock.now() }),
        }
    }

    /// Returns the raw payload.
    #[must_use]
    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }

    /// Completion timestamp, when the payload carries one.
    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.payload
            .get("completed_at")
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    struct Frozen(DateTime<Utc>);

    impl Clock for Frozen {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn test_completed_record_carries_clock_timestamp() {
        // Arrange
        let fixed_now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();

        // Act
        let record = ProgressRecord::completed(&Frozen(fixed_now));

        // Assert
        assert_eq!(record.completed_at(), Some(fixed_now));
    }

    #[test]
    fn test_opaque_payload_has_no_timestamp() {
        let record = ProgressRecord::from_payload(serde_json::json!({ "some": "data" }));

        assert_eq!(record.completed_at(), None);
        assert_eq!(record.payload()["some"], "data");
    }

    #[test]
    fn test_record_serializes_as_bare_payload() {
        let record = ProgressRecord::from_payload(serde_json::json!({ "some": "data" }));

        let text = serde_json::to_string(&record).unwrap();

        assert_eq!(text, r#"{"some":"data"}"#);
    }
}
