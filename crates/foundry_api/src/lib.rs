//! HTTP client, wire types, and the polling loop for the analysis
//! service.
//!
//! [`HttpAnalysisApi`] talks to the two endpoints; [`classify_probe`]
//! and [`classify_submit`] collapse raw responses into the outcome
//! classes the state machine consumes; [`run_polling_loop`] drives the
//! recurring results probe until its token is cancelled.

mod client;
mod outcome;
mod poll;
mod types;
mod wire;

pub use client::{AnalysisApi, AnalysisRequest, ApiSettings, HttpAnalysisApi};
pub use outcome::{classify_probe, classify_submit};
pub use poll::{run_polling_loop, OutcomeSink, PollSettings};
pub use types::{
    ApiError, ApiErrorKind, ProbeOutcome, StrategyResult, StrategyResultBody, SubmitOutcome,
};
pub use wire::{ResultsEnvelope, SubmitAck, WireResult, STATUS_SUCCESS};
