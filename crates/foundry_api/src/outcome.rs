use crate::types::{ApiError, ApiErrorKind, ProbeOutcome, StrategyResult, SubmitOutcome};
use crate::wire::{ResultsEnvelope, SubmitAck, STATUS_SUCCESS};

/// Collapses a probe response into one outcome class. A healthy status
/// with a non-empty results array is the only way to get entries; every
/// other answered shape is a retryable empty, and errors split into
/// timeout vs transport for wording only.
pub fn classify_probe(result: Result<ResultsEnvelope, ApiError>) -> ProbeOutcome {
    match result {
        Ok(envelope) => {
            if envelope.status == STATUS_SUCCESS && !envelope.results.is_empty() {
                ProbeOutcome::Results {
                    entries: envelope
                        .results
                        .into_iter()
                        .map(StrategyResult::from)
                        .collect(),
                    is_complete: envelope.is_complete,
                }
            } else {
                ProbeOutcome::Empty
            }
        }
        Err(err) if err.kind == ApiErrorKind::Timeout => ProbeOutcome::Timeout,
        Err(err) => ProbeOutcome::TransportError {
            message: err.to_string(),
        },
    }
}

/// Splits the submit acknowledgment into accepted vs rejected. Anything
/// but a healthy status is fatal for the submission.
pub fn classify_submit(result: Result<SubmitAck, ApiError>) -> SubmitOutcome {
    match result {
        Ok(ack) if ack.status == STATUS_SUCCESS => SubmitOutcome::Accepted,
        Ok(ack) => SubmitOutcome::Rejected {
            message: ack
                .message
                .unwrap_or_else(|| format!("server answered with status \"{}\"", ack.status)),
        },
        Err(err) => SubmitOutcome::Rejected {
            message: err.to_string(),
        },
    }
}
