//! Screen presenter port.

use async_trait::async_trait;
use thiserror::Error;

use crate::action::ActionKey;
use crate::screen::{InteractiveScreen, StatusScreen};

/// Why a presenter could not deliver a choice.
#[derive(Debug, Error)]
pub enum PresenterError {
    /// The user went away: input closed before a button was chosen.
    #[error("presenter input closed")]
    Closed,

    /// Rendering or reading failed.
    #[error("presenter I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders screens onto a mount owned by the presenter.
///
/// Every call replaces whatever the previous call displayed.
#[async_trait]
pub trait ScreenPresenter: Send + Sync {
    /// Shows a status screen and resolves once its display time has elapsed.
    async fn show_status(&self, screen: &StatusScreen);

    /// Shows an interactive screen and resolves with the key of the button the
    /// user activated. Resolves exactly once per call.
    ///
    /// # Errors
    ///
    /// Returns `PresenterError::Closed` when no choice can arrive anymore and
    /// `PresenterError::Io` when the mount fails.
    async fn interact(&self, screen: &InteractiveScreen) -> Result<ActionKey, PresenterError>;
}
