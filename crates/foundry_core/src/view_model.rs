use crate::phase::PhaseSlot;
use crate::state::{SessionState, StatusNotice, WaitFlavor, MAX_RETRIES};
use crate::store::ResultEntry;

/// Read-only projection of the controller state, consumed by the host's
/// renderer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub busy: bool,
    pub idea_count: usize,
    pub link_count: usize,
    pub retry_count: u32,
    pub status: Option<StatusNotice>,
    pub last_checked: Option<String>,
    pub phases: Vec<PhaseSlot>,
    pub results: Vec<ResultEntry>,
}

const STILL_PROCESSING: [&str; 3] = [
    "Still processing your ideas",
    "Analysis in progress, no results yet",
    "Still working through the batch",
];

const CHECKING_PROGRESS: [&str; 2] = [
    "Checking progress",
    "Could not reach the server, will retry",
];

const CHECKING_TIMED_OUT: [&str; 2] = [
    "Progress check timed out, will retry",
    "Server is slow to answer, still trying",
];

/// User-facing wording for a status notice. Waiting notices rotate their
/// wording with the attempt number.
pub fn status_text(notice: &StatusNotice) -> String {
    match notice {
        StatusNotice::FatalStart { message } => {
            format!("Analysis failed to start: {message}")
        }
        StatusNotice::Waiting { attempt, flavor } => {
            let variants: &[&str] = match flavor {
                WaitFlavor::EmptyResults => &STILL_PROCESSING,
                WaitFlavor::Transport => &CHECKING_PROGRESS,
                WaitFlavor::Timeout => &CHECKING_TIMED_OUT,
            };
            let index = attempt.saturating_sub(1) as usize % variants.len();
            format!("{} (attempt {attempt} of {MAX_RETRIES})", variants[index])
        }
        StatusNotice::Exhausted { attempts } => format!(
            "Stopped checking after {attempts} attempts. The analysis may still be \
             running; any results will be kept and can be checked later."
        ),
    }
}
