//! Keepsake — host error types.

use keepsake_content::ContentError;
use keepsake_core::error::FlowError;
use keepsake_core::gateway::PersistenceFailure;
use thiserror::Error;

/// Startup and runtime errors for the terminal host.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable holds an invalid value.
    #[error("configuration error: {0}")]
    Config(String),

    /// The screen catalog could not be loaded.
    #[error("content error: {0}")]
    Content(#[from] ContentError),

    /// Reading the catalog file or talking to the terminal failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The flow engine stopped with an error.
    #[error("flow error: {0}")]
    Flow(#[from] FlowError),

    /// The flow kept asking for restarts beyond the configured budget.
    #[error("giving up after {restarts} restarts: {reason}")]
    RestartBudgetExhausted {
        /// Restarts already performed.
        restarts: u32,
        /// The failure behind the last restart request.
        reason: PersistenceFailure,
    },
}
