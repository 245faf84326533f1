//! Stages, the events they produce, and what a transition yields.

use keepsake_core::action::ActionKey;
use keepsake_core::gateway::PersistenceFailure;
use keepsake_core::progress::ProgressRecord;

/// A node of the flow graph.
///
/// Stages hold no state of their own; entering the same stage twice does the
/// same work twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Entry and re-entry point: load progress and dispatch on it.
    Master,
    /// The introduction, followed by saving progress.
    FirstTime,
    /// The main decision screen.
    Continuation,
    /// The screen shown after moving forward from the main screen.
    AfterMain,
    /// Removing progress before starting over.
    DeleteProgress,
    /// The error screen; leaving it ends the run with a restart directive.
    Abort(PersistenceFailure),
}

impl Stage {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Master => "master",
            Stage::FirstTime => "first_time",
            Stage::Continuation => "continuation",
            Stage::AfterMain => "after_main",
            Stage::DeleteProgress => "delete_progress",
            Stage::Abort(_) => "abort",
        }
    }
}

/// What entering a stage produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The loading screen and the load both settled.
    ProgressLoaded(Result<Option<ProgressRecord>, PersistenceFailure>),
    /// The introduction ran and the saving screen and the save both settled.
    ProgressSaved(Result<(), PersistenceFailure>),
    /// The user chose a key on a branching screen.
    Chose(ActionKey),
    /// The user dismissed a single-button screen.
    Dismissed,
    /// The deleting screen and the delete both settled.
    ProgressDeleted(Result<(), PersistenceFailure>),
}

impl Event {
    /// Short name for logs and errors.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Event::ProgressLoaded(_) => "progress_loaded",
            Event::ProgressSaved(_) => "progress_saved",
            Event::Chose(_) => "chose",
            Event::Dismissed => "dismissed",
            Event::ProgressDeleted(_) => "progress_deleted",
        }
    }

    /// The persistence failure carried by this event, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&PersistenceFailure> {
        match self {
            Event::ProgressLoaded(Err(failure))
            | Event::ProgressSaved(Err(failure))
            | Event::ProgressDeleted(Err(failure)) => Some(failure),
            _ => None,
        }
    }
}

/// Why a run of the engine ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowExit {
    /// The abort screen was dismissed. The host must start over from scratch.
    Restart {
        /// The failure that sent the flow to abort.
        reason: PersistenceFailure,
    },
    /// The presenter can no longer deliver choices.
    Detached,
}

/// The outcome of one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Enter this stage next.
    Next(Stage),
    /// Leave the state machine.
    Exit(FlowExit),
}
