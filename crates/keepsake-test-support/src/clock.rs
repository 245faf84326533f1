//! Test clock — deterministic `Clock` for record timestamps.

use chrono::{DateTime, TimeZone, Utc};
use keepsake_core::progress::Clock;

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// 2026-01-15 10:00:00 UTC, the instant most tests use.
    ///
    /// # Panics
    ///
    /// Never; the date is valid.
    #[must_use]
    pub fn standard() -> Self {
        Self(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
