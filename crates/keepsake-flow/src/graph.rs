//! The stage graph as a pure transition function.

use keepsake_core::error::FlowError;
use keepsake_core::screen::InteractiveScreen;

use crate::branch::{BranchMap, BranchOff};
use crate::policy::PersistencePolicy;
use crate::stage::{Event, FlowExit, Stage, Step};

/// Transition rules of the flow. No I/O happens here.
#[derive(Debug, Clone)]
pub struct FlowGraph {
    continuation: BranchOff<Stage>,
    policy: PersistencePolicy,
}

impl FlowGraph {
    /// The stock routes for the main screen: forward shows the after-main
    /// screen, delete wipes progress, back re-shows the main screen.
    #[must_use]
    pub fn stock_routes() -> BranchMap<Stage> {
        BranchMap::new(Stage::AfterMain, Stage::Continuation, Stage::DeleteProgress)
    }

    /// Builds the graph around `main`, the screen the continuation stage
    /// branches on.
    #[must_use]
    pub fn new(main: InteractiveScreen, routes: BranchMap<Stage>, policy: PersistencePolicy) -> Self {
        Self {
            continuation: BranchOff::new(main, routes),
            policy,
        }
    }

    /// The continuation stage's branch.
    #[must_use]
    pub fn continuation(&self) -> &BranchOff<Stage> {
        &self.continuation
    }

    /// The active persistence policy.
    #[must_use]
    pub fn policy(&self) -> PersistencePolicy {
        self.policy
    }

    /// Picks what follows `stage` after it produced `event`.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::UnexpectedEvent` when `stage` never produces
    /// `event`.
    pub fn transition(&self, stage: &Stage, event: Event) -> Result<Step, FlowError> {
        let next = match (stage, event) {
            (Stage::Master, Event::ProgressLoaded(Ok(None))) => Stage::FirstTime,
            (Stage::Master, Event::ProgressLoaded(Ok(Some(_)))) => Stage::Continuation,
            (Stage::Master, Event::ProgressLoaded(Err(failure))) => Stage::Abort(failure),
            (Stage::FirstTime, Event::ProgressSaved(result)) => {
                self.policy.after_write(result, Stage::Continuation)
            }
            (Stage::Continuation, Event::Chose(key)) => self.continuation.dispatch(key),
            (Stage::AfterMain, Event::Dismissed) => Stage::Continuation,
            (Stage::DeleteProgress, Event::ProgressDeleted(result)) => {
                self.policy.after_write(result, Stage::Master)
            }
            (Stage::Abort(failure), Event::Dismissed) => {
                return Ok(Step::Exit(FlowExit::Restart {
                    reason: failure.clone(),
                }));
            }
            (stage, event) => {
                return Err(FlowError::UnexpectedEvent {
                    stage: stage.name().to_owned(),
                    event: event.name().to_owned(),
                });
            }
        };
        Ok(Step::Next(next))
    }
}
