//! Content loading errors.

use keepsake_core::screen::ScreenId;
use thiserror::Error;

/// Why a screen catalog could not be built.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The YAML document is malformed or has unknown fields.
    #[error("invalid catalog document: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The introduction must have exactly four screens.
    #[error("expected 4 intro screens, found {found}")]
    IntroCount {
        /// Number of intro screens in the document.
        found: usize,
    },

    /// An interactive screen has nothing to click.
    #[error("screen {screen} has no buttons")]
    NoButtons {
        /// The offending screen.
        screen: ScreenId,
    },
}
