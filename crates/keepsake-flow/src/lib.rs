//! Keepsake — flow orchestration.
//!
//! Steps a single user through the loading screen, a four-screen
//! introduction, the main decision screen and back, persisting whether the
//! introduction has been completed so returning users skip straight to the
//! main screen.
//!
//! The stage graph is a tagged enum plus a pure transition function
//! ([`FlowGraph::transition`]); [`FlowEngine`] performs each stage's I/O and
//! loops until the flow exits.

pub mod branch;
pub mod engine;
pub mod graph;
pub mod policy;
pub mod stage;

pub use branch::{BranchMap, BranchMapBuilder, BranchOff};
pub use engine::{FlowEngine, FlowEngineBuilder};
pub use graph::FlowGraph;
pub use policy::PersistencePolicy;
pub use stage::{Event, FlowExit, Stage, Step};
