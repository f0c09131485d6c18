//! Pure state machine for the strategy analysis client.
//!
//! The host feeds [`Msg`] values into [`update`], executes the returned
//! [`Effect`] values, and renders from [`AppViewModel`]. Nothing in this
//! crate performs IO; polling, timers, and HTTP live in the host and the
//! api crate.

mod effect;
mod msg;
mod phase;
mod state;
mod store;
mod update;
mod view_model;

pub use effect::{Effect, StopReason};
pub use msg::Msg;
pub use phase::{PhaseBoard, PhaseId, PhasePlan, PhaseScript, PhaseSlot, PhaseState};
pub use state::{
    classify_idea, AppState, IdeaKind, ProbeOutcome, SessionState, StatusNotice, SubmitOutcome,
    WaitFlavor, MAX_RETRIES,
};
pub use store::{ResultBody, ResultEntry, ResultStore, StrategyArtifacts};
pub use update::update;
pub use view_model::{status_text, AppViewModel};
