//! Keepsake — terminal host.
//!
//! Environment configuration, a line-oriented terminal presenter and the
//! supervisor that restarts the flow after an abort.

pub mod config;
pub mod error;
pub mod host;
pub mod terminal;

pub use config::HostConfig;
pub use error::AppError;
pub use host::Supervisor;
pub use terminal::{TerminalPresenter, TerminalPresenterBuilder};
