//! The flow engine: runs stages one at a time on a trampoline.
//!
//! Each stage does its I/O through the presenter and the gateway, reports an
//! [`Event`], and the [`FlowGraph`] picks the next stage. The loop in
//! [`FlowEngine::run`] replaces the stages calling each other, so the
//! continuation cycle can spin forever without growing the stack.

use std::sync::Arc;

use keepsake_content::ScreenCatalog;
use keepsake_core::error::FlowError;
use keepsake_core::gateway::ProgressGateway;
use keepsake_core::presenter::{PresenterError, ScreenPresenter};
use keepsake_core::progress::{Clock, ProgressRecord, SystemClock};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::branch::BranchMap;
use crate::graph::FlowGraph;
use crate::policy::PersistencePolicy;
use crate::stage::{Event, FlowExit, Stage, Step};

/// Drives the presentation flow.
pub struct FlowEngine {
    presenter: Arc<dyn ScreenPresenter>,
    gateway: Arc<dyn ProgressGateway>,
    clock: Arc<dyn Clock>,
    catalog: ScreenCatalog,
    graph: FlowGraph,
}

impl std::fmt::Debug for FlowEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowEngine")
            .field("graph", &self.graph)
            .finish_non_exhaustive()
    }
}

/// Assembles a [`FlowEngine`]. Presenter and gateway are required; the rest
/// defaults to the system clock, the stock catalog, the stock routes and the
/// best-effort policy.
pub struct FlowEngineBuilder {
    presenter: Arc<dyn ScreenPresenter>,
    gateway: Arc<dyn ProgressGateway>,
    clock: Arc<dyn Clock>,
    catalog: ScreenCatalog,
    routes: BranchMap<Stage>,
    policy: PersistencePolicy,
}

impl FlowEngineBuilder {
    /// Uses `clock` to stamp saved records.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Uses `catalog` for every screen.
    #[must_use]
    pub fn catalog(mut self, catalog: ScreenCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replaces the routes of the main screen.
    #[must_use]
    pub fn continuation_routes(mut self, routes: BranchMap<Stage>) -> Self {
        self.routes = routes;
        self
    }

    /// Sets how save and delete failures are handled.
    #[must_use]
    pub fn policy(mut self, policy: PersistencePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Finishes the engine.
    #[must_use]
    pub fn build(self) -> FlowEngine {
        let graph = FlowGraph::new(self.catalog.main().clone(), self.routes, self.policy);
        FlowEngine {
            presenter: self.presenter,
            gateway: self.gateway,
            clock: self.clock,
            catalog: self.catalog,
            graph,
        }
    }
}

impl FlowEngine {
    /// Starts building an engine around its two collaborators.
    #[must_use]
    pub fn builder(
        presenter: Arc<dyn ScreenPresenter>,
        gateway: Arc<dyn ProgressGateway>,
    ) -> FlowEngineBuilder {
        FlowEngineBuilder {
            presenter,
            gateway,
            clock: Arc::new(SystemClock),
            catalog: ScreenCatalog::default(),
            routes: FlowGraph::stock_routes(),
            policy: PersistencePolicy::default(),
        }
    }

    /// Runs the flow from `master` until it leaves the state machine.
    ///
    /// Never returns while the user keeps moving forward on the main screen.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Presenter` when the presenter fails with an I/O
    /// error and `FlowError::UnexpectedEvent` if a stage reports an event the
    /// graph has no rule for.
    #[instrument(skip(self), fields(run_id = %Uuid::new_v4(), policy = %self.graph.policy()))]
    pub async fn run(&self) -> Result<FlowExit, FlowError> {
        info!("flow started");
        let mut stage = Stage::Master;
        loop {
            match self.step(&stage).await? {
                Step::Next(next) => {
                    info!(from = stage.name(), to = next.name(), "transition");
                    stage = next;
                }
                Step::Exit(exit) => {
                    info!(?exit, "flow ended");
                    return Ok(exit);
                }
            }
        }
    }

    /// Enters `stage` once and returns what follows it.
    ///
    /// A presenter whose input has closed yields `FlowExit::Detached`.
    ///
    /// # Errors
    ///
    /// See [`FlowEngine::run`].
    pub async fn step(&self, stage: &Stage) -> Result<Step, FlowError> {
        debug!(stage = stage.name(), "entering stage");
        let event = match self.enter(stage).await {
            Ok(event) => event,
            Err(PresenterError::Closed) => {
                info!(stage = stage.name(), "presenter closed");
                return Ok(Step::Exit(FlowExit::Detached));
            }
            Err(err) => return Err(err.into()),
        };

        if let Some(failure) = event.failure() {
            warn!(
                stage = stage.name(),
                operation = %failure.operation,
                detail = %failure.detail,
                "persistence failure"
            );
        }

        self.graph.transition(stage, event)
    }

    async fn enter(&self, stage: &Stage) -> Result<Event, PresenterError> {
        match stage {
            Stage::Master => {
                let ((), loaded) = tokio::join!(
                    self.presenter.show_status(self.catalog.loading()),
                    self.gateway.load(),
                );
                Ok(Event::ProgressLoaded(loaded))
            }
            Stage::FirstTime => {
                for intro in self.catalog.intros() {
                    self.presenter.interact(intro).await?;
                }
                let record = ProgressRecord::completed(self.clock.as_ref());
                let ((), saved) = tokio::join!(
                    self.presenter.show_status(self.catalog.saving()),
                    self.gateway.save(&record),
                );
                Ok(Event::ProgressSaved(saved))
            }
            Stage::Continuation => {
                let key = self
                    .graph
                    .continuation()
                    .choose(self.presenter.as_ref())
                    .await?;
                debug!(%key, "main screen answered");
                Ok(Event::Chose(key))
            }
            Stage::AfterMain => {
                self.presenter.interact(self.catalog.after_main()).await?;
                Ok(Event::Dismissed)
            }
            Stage::DeleteProgress => {
                let ((), deleted) = tokio::join!(
                    self.presenter.show_status(self.catalog.deleting()),
                    self.gateway.delete(),
                );
                Ok(Event::ProgressDeleted(deleted))
            }
            Stage::Abort(failure) => {
                let screen = self.catalog.error_screen(failure);
                self.presenter.interact(&screen).await?;
                Ok(Event::Dismissed)
            }
        }
    }
}
