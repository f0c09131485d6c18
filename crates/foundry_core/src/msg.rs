use crate::phase::PhaseId;
use crate::state::{ProbeOutcome, SubmitOutcome};

/// Messages feeding the update function. Everything carrying a `seq` is
/// fenced against the current submission and dropped when stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The user asked to analyze a batch of ideas.
    SubmitRequested { ideas: Vec<String> },
    /// The submit endpoint acknowledged or rejected the batch.
    SubmitFinished { seq: u64, outcome: SubmitOutcome },
    /// One recurring results probe finished and was classified.
    ProbeFinished {
        seq: u64,
        outcome: ProbeOutcome,
        at: String,
    },
    /// The timeline marked a phase active.
    PhaseStarted { seq: u64, phase: PhaseId },
    /// The timeline posted a scripted message to a phase.
    PhaseMessagePosted {
        seq: u64,
        phase: PhaseId,
        text: String,
    },
    /// The timeline finished a phase.
    PhaseCompleted { seq: u64, phase: PhaseId },
    /// The host marked a phase as failed, outside the scripted run.
    PhaseFailed { seq: u64, phase: PhaseId },
    /// Does nothing. Placeholder for unwired events.
    NoOp,
}
