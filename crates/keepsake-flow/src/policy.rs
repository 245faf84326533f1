//! How the flow treats save and delete failures.
//!
//! Load failures always abort: `master` is the gate that checks the store.
//! Past the gate, writes are handled by one of these named policies.

use std::fmt;
use std::str::FromStr;

use keepsake_core::gateway::PersistenceFailure;

use crate::stage::Stage;

/// What to do when a save or delete fails outside `master`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistencePolicy {
    /// Carry on as if the write had succeeded. The next load will tell.
    #[default]
    BestEffort,
    /// Route to the abort screen.
    AbortOnFailure,
}

impl PersistencePolicy {
    /// Picks the stage after a write, given its result and the stage that
    /// follows a successful write.
    #[must_use]
    pub fn after_write(self, result: Result<(), PersistenceFailure>, on_success: Stage) -> Stage {
        match (self, result) {
            (PersistencePolicy::AbortOnFailure, Err(failure)) => Stage::Abort(failure),
            _ => on_success,
        }
    }
}

impl fmt::Display for PersistencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PersistencePolicy::BestEffort => "best-effort",
            PersistencePolicy::AbortOnFailure => "abort-on-failure",
        })
    }
}

impl FromStr for PersistencePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "best-effort" | "best_effort" => Ok(PersistencePolicy::BestEffort),
            "abort-on-failure" | "abort_on_failure" | "strict" => {
                Ok(PersistencePolicy::AbortOnFailure)
            }
            other => Err(format!(
                "unknown persistence policy {other:?}, expected best-effort or abort-on-failure"
            )),
        }
    }
}
