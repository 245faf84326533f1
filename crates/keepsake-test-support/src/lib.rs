//! Shared test doubles for the Keepsake presentation flow.

mod clock;
mod gateway;
mod presenter;

pub use clock::FixedClock;
pub use gateway::{FailingGateway, GatewayCall, RecordingGateway};
pub use presenter::ScriptedPresenter;
