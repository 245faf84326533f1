//! Restart supervisor: turns the flow's restart directive into a fresh run.

use keepsake_flow::{FlowEngine, FlowExit};
use tracing::{info, instrument, warn};

use crate::error::AppError;

/// Runs the flow engine until the presenter detaches.
#[derive(Debug)]
pub struct Supervisor {
    engine: FlowEngine,
    max_restarts: Option<u32>,
}

impl Supervisor {
    /// Supervises `engine` with no restart budget.
    #[must_use]
    pub fn new(engine: FlowEngine) -> Self {
        Self {
            engine,
            max_restarts: None,
        }
    }

    /// Caps how many times the flow may be restarted. `None` lifts the cap.
    #[must_use]
    pub fn with_max_restarts(mut self, max_restarts: Option<u32>) -> Self {
        self.max_restarts = max_restarts;
        self
    }

    /// Runs the flow, starting it again from scratch each time it asks for a
    /// restart. Returns the number of restarts performed once the presenter
    /// detaches.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Flow` if a run fails and
    /// `AppError::RestartBudgetExhausted` once the budget is spent.
    #[instrument(skip(self), fields(max_restarts = ?self.max_restarts))]
    pub async fn run(&self) -> Result<u32, AppError> {
        let mut restarts = 0;
        loop {
            match self.engine.run().await? {
                FlowExit::Detached => {
                    info!(restarts, "presenter detached");
                    return Ok(restarts);
                }
                FlowExit::Restart { reason } => {
                    warn!(
                        restarts,
                        operation = %reason.operation,
                        detail = %reason.detail,
                        "flow requested a restart"
                    );
                    if self.max_restarts.is_some_and(|max| restarts >= max) {
                        return Err(AppError::RestartBudgetExhausted { restarts, reason });
                    }
                    restarts += 1;
                }
            }
        }
    }
}
