//! Flow error types.

use thiserror::Error;

use crate::action::ActionKey;
use crate::presenter::PresenterError;

/// Errors that stop the flow engine.
///
/// Storage problems are not here: they travel as `PersistenceFailure` values
/// and are handled inside the stage graph.
#[derive(Debug, Error)]
pub enum FlowError {
    /// A stage received an event it has no rule for.
    #[error("stage {stage} cannot handle event {event}")]
    UnexpectedEvent {
        /// The stage that was active.
        stage: String,
        /// The event it received.
        event: String,
    },

    /// A branch map leaves keys without a route and declares no default.
    #[error("branch map has no route for {missing:?} and no default")]
    UnmappedActionKeys {
        /// Keys without a route.
        missing: Vec<ActionKey>,
    },

    /// The presenter failed while rendering or reading input.
    #[error(transparent)]
    Presenter(#[from] PresenterError),
}
