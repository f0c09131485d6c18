use crate::effect::{Effect, StopReason};
use crate::msg::Msg;
use crate::state::{
    AppState, ProbeOutcome, SessionState, SubmitOutcome, WaitFlavor, MAX_RETRIES,
};

/// Pure update function: applies one message to the state and returns the
/// effects the host must execute. Stale sequence numbers are fenced here,
/// so superseded submissions cannot touch fresh state.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SubmitRequested { ideas } => {
            let ideas = collect_ideas(ideas);
            let mut effects = Vec::new();
            if state.session() == SessionState::Polling {
                effects.push(Effect::StopPolling {
                    seq: state.current_seq(),
                    reason: StopReason::Superseded,
                });
            }
            let seq = state.begin_submission(ideas.clone());
            if ideas.is_empty() {
                state.fail_submission("no ideas to analyze".to_string());
            } else {
                effects.push(Effect::SubmitAnalysis { seq, ideas });
            }
            effects
        }
        Msg::SubmitFinished { seq, outcome } => {
            if seq != state.current_seq() || state.session() != SessionState::Submitting {
                return (state, Vec::new());
            }
            match outcome {
                SubmitOutcome::Accepted => {
                    state.open_session();
                    vec![
                        Effect::StartPolling { seq },
                        Effect::StartPhaseTimeline { seq },
                    ]
                }
                SubmitOutcome::Rejected { message } => {
                    state.fail_submission(message);
                    Vec::new()
                }
            }
        }
        Msg::ProbeFinished { seq, outcome, at } => {
            if seq != state.current_seq() || state.session() != SessionState::Polling {
                return (state, Vec::new());
            }
            state.note_checked(at);
            match outcome {
                ProbeOutcome::Results {
                    entries,
                    is_complete,
                } => {
                    state.record_results(entries);
                    if is_complete {
                        state.close_complete();
                        vec![Effect::StopPolling {
                            seq,
                            reason: StopReason::Complete,
                        }]
                    } else {
                        Vec::new()
                    }
                }
                ProbeOutcome::Empty => count_fruitless(&mut state, seq, WaitFlavor::EmptyResults),
                ProbeOutcome::Timeout => count_fruitless(&mut state, seq, WaitFlavor::Timeout),
                ProbeOutcome::TransportError { .. } => {
                    count_fruitless(&mut state, seq, WaitFlavor::Transport)
                }
            }
        }
        Msg::PhaseStarted { seq, phase } => {
            if seq == state.current_seq() {
                state.phase_started(phase);
            }
            Vec::new()
        }
        Msg::PhaseMessagePosted { seq, phase, text } => {
            if seq == state.current_seq() {
                state.phase_message(phase, text);
            }
            Vec::new()
        }
        Msg::PhaseCompleted { seq, phase } => {
            if seq == state.current_seq() {
                state.phase_completed(phase);
            }
            Vec::new()
        }
        Msg::PhaseFailed { seq, phase } => {
            if seq == state.current_seq() {
                state.phase_failed(phase);
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };
    (state, effects)
}

/// Counts an entry-less probe against the budget, closing the session
/// when the budget runs out.
fn count_fruitless(state: &mut AppState, seq: u64, flavor: WaitFlavor) -> Vec<Effect> {
    let attempt = state.note_wait(flavor);
    if attempt >= MAX_RETRIES {
        state.close_exhausted();
        vec![Effect::StopPolling {
            seq,
            reason: StopReason::Exhausted,
        }]
    } else {
        Vec::new()
    }
}

/// Trims, drops empties, and collapses duplicate lines, keeping the first
/// occurrence.
fn collect_ideas(raw: Vec<String>) -> Vec<String> {
    let mut ideas: Vec<String> = Vec::new();
    for idea in raw {
        let trimmed = idea.trim();
        if trimmed.is_empty() {
            continue;
        }
        if ideas.iter().any(|seen| seen == trimmed) {
            continue;
        }
        ideas.push(trimmed.to_string());
    }
    ideas
}
