/// Side effects requested by the update function and executed by the
/// host driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the batch to the submit endpoint.
    SubmitAnalysis { seq: u64, ideas: Vec<String> },
    /// Start the recurring results probe for this submission.
    StartPolling { seq: u64 },
    /// Tear down the recurring probe. Safe to execute more than once.
    StopPolling { seq: u64, reason: StopReason },
    /// Launch the scripted phase timeline, fire and forget.
    StartPhaseTimeline { seq: u64 },
}

/// Why polling stopped. Drives log wording only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The backend reported the batch complete.
    Complete,
    /// The retry budget ran out.
    Exhausted,
    /// A newer submission replaced this session.
    Superseded,
}
