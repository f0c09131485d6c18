use url::Url;

use crate::phase::{PhaseBoard, PhaseId};
use crate::store::{ResultEntry, ResultStore};
use crate::view_model::AppViewModel;

/// Retry budget for the recurring results probe.
pub const MAX_RETRIES: u32 = 10;

/// Lifecycle of a submission session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// Batch sent, waiting for the acknowledgment.
    Submitting,
    /// Acknowledged; the recurring probe is running.
    Polling,
    /// The backend reported the batch complete.
    Complete,
    /// Retry budget spent. The backend may still be working.
    Exhausted,
    /// Submission rejected or unreachable. No session ran.
    Failed,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionState::Complete | SessionState::Exhausted | SessionState::Failed
        )
    }
}

/// How the submit acknowledgment came back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected { message: String },
}

/// Classification of one results probe. Exactly one class per probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Status was "success" and the results array was non-empty.
    Results {
        entries: Vec<ResultEntry>,
        is_complete: bool,
    },
    /// The probe answered but carried nothing to show yet.
    Empty,
    /// The probe hit its own bounded timeout.
    Timeout,
    /// The probe failed in transit or returned garbage.
    TransportError { message: String },
}

/// Which wording family a waiting notice draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitFlavor {
    /// Probe succeeded but had no results yet.
    EmptyResults,
    /// Probe failed in transit.
    Transport,
    /// Probe timed out.
    Timeout,
}

/// The one-line notice shown under the submission form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusNotice {
    /// Submission rejected or unreachable before any session started.
    FatalStart { message: String },
    /// Waiting for results. Wording rotates with the attempt number.
    Waiting { attempt: u32, flavor: WaitFlavor },
    /// Retry budget spent. Not presented as a failure.
    Exhausted { attempts: u32 },
}

/// What kind of input one submitted idea is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdeaKind {
    Link,
    Text,
}

/// Ideas that parse as http(s) URLs are treated as links to source
/// material; everything else is free-form text.
pub fn classify_idea(idea: &str) -> IdeaKind {
    match Url::parse(idea.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => IdeaKind::Link,
        _ => IdeaKind::Text,
    }
}

/// Full controller state for one client.
///
/// Fields are private; `update` mutates through the semantic methods
/// below, and the host reads through `view()`. Messages tagged with a
/// stale sequence number must be dropped before any method is called.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    session: SessionState,
    /// Submission sequence number. Zero means nothing was ever submitted;
    /// each new submission increments it, fencing out messages from
    /// superseded polling and phase runs.
    seq: u64,
    retry_count: u32,
    submitted_ideas: Vec<String>,
    results: ResultStore,
    phases: PhaseBoard,
    status: Option<StatusNotice>,
    busy: bool,
    last_checked: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn current_seq(&self) -> u64 {
        self.seq
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// True once the session is terminal and the phase timeline is no
    /// longer running. The host can stop its message loop at this point.
    pub fn is_settled(&self) -> bool {
        self.session.is_terminal() && !self.phases.is_running()
    }

    /// Returns the dirty flag and clears it. The host re-renders when
    /// this reports true.
    pub fn consume_dirty(&mut self) -> bool {
        let was = self.dirty;
        self.dirty = false;
        was
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            session: self.session,
            busy: self.busy,
            idea_count: self.submitted_ideas.len(),
            link_count: self
                .submitted_ideas
                .iter()
                .filter(|idea| classify_idea(idea) == IdeaKind::Link)
                .count(),
            retry_count: self.retry_count,
            status: self.status.clone(),
            last_checked: self.last_checked.clone(),
            phases: self.phases.slots().to_vec(),
            results: self.results.entries().to_vec(),
        }
    }

    /// Opens a fresh submission: bumps the sequence number and resets
    /// every per-session surface. Returns the new sequence number.
    pub fn begin_submission(&mut self, ideas: Vec<String>) -> u64 {
        self.seq += 1;
        self.session = SessionState::Submitting;
        self.retry_count = 0;
        self.submitted_ideas = ideas;
        self.results.clear();
        self.phases = PhaseBoard::new();
        self.status = None;
        self.busy = true;
        self.last_checked = None;
        self.dirty = true;
        self.seq
    }

    /// Fatal start: the batch never became a session.
    pub fn fail_submission(&mut self, message: String) {
        self.session = SessionState::Failed;
        self.busy = false;
        self.status = Some(StatusNotice::FatalStart { message });
        self.dirty = true;
    }

    /// Acknowledged: the recurring probe takes over.
    pub fn open_session(&mut self) {
        self.session = SessionState::Polling;
        self.retry_count = 0;
        self.dirty = true;
    }

    pub fn note_checked(&mut self, at: String) {
        self.last_checked = Some(at);
        self.dirty = true;
    }

    /// Applies a batch of probed entries. Any results arrival resets the
    /// retry budget and clears the waiting notice.
    pub fn record_results(&mut self, entries: Vec<ResultEntry>) {
        for entry in entries {
            self.results.upsert(entry);
        }
        self.retry_count = 0;
        self.status = None;
        self.dirty = true;
    }

    /// Counts a fruitless probe against the budget and rotates the
    /// waiting notice. Returns the attempt number just consumed.
    pub fn note_wait(&mut self, flavor: WaitFlavor) -> u32 {
        self.retry_count += 1;
        self.status = Some(StatusNotice::Waiting {
            attempt: self.retry_count,
            flavor,
        });
        self.dirty = true;
        self.retry_count
    }

    /// Success terminal: the backend confirmed completion.
    pub fn close_complete(&mut self) {
        self.session = SessionState::Complete;
        self.busy = false;
        self.status = None;
        self.dirty = true;
    }

    /// Exhausted terminal: polling gives up without claiming failure.
    pub fn close_exhausted(&mut self) {
        self.session = SessionState::Exhausted;
        self.busy = false;
        self.status = Some(StatusNotice::Exhausted {
            attempts: self.retry_count,
        });
        self.dirty = true;
    }

    pub fn phase_started(&mut self, phase: PhaseId) {
        if self.phases.activate(phase) {
            self.dirty = true;
        }
    }

    pub fn phase_message(&mut self, phase: PhaseId, text: String) {
        if self.phases.post_message(phase, text) {
            self.dirty = true;
        }
    }

    pub fn phase_completed(&mut self, phase: PhaseId) {
        if self.phases.complete(phase) {
            self.dirty = true;
        }
    }

    pub fn phase_failed(&mut self, phase: PhaseId) {
        if self.phases.fail(phase) {
            self.dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_and_https_ideas_classify_as_links() {
        assert_eq!(
            classify_idea("https://www.youtube.com/watch?v=abc123"),
            IdeaKind::Link
        );
        assert_eq!(
            classify_idea("  http://example.com/paper.pdf  "),
            IdeaKind::Link
        );
    }

    #[test]
    fn plain_text_and_other_schemes_classify_as_text() {
        assert_eq!(
            classify_idea("buy breakouts above the 20 day high"),
            IdeaKind::Text
        );
        assert_eq!(classify_idea("ftp://example.com/file"), IdeaKind::Text);
        assert_eq!(classify_idea(""), IdeaKind::Text);
    }

    #[test]
    fn begin_submission_bumps_seq_and_resets_surfaces() {
        let mut state = AppState::new();
        let first = state.begin_submission(vec!["idea".into()]);
        state.open_session();
        state.note_wait(WaitFlavor::EmptyResults);
        state.note_checked("2026-01-01T00:00:00Z".into());

        let second = state.begin_submission(vec!["other".into()]);
        assert_eq!(second, first + 1);
        assert_eq!(state.retry_count(), 0);
        assert_eq!(state.session(), SessionState::Submitting);
        let view = state.view();
        assert!(view.status.is_none());
        assert!(view.last_checked.is_none());
        assert!(view.results.is_empty());
    }

    #[test]
    fn consume_dirty_clears_the_flag() {
        let mut state = AppState::new();
        state.begin_submission(vec!["idea".into()]);
        assert!(state.consume_dirty());
        assert!(!state.consume_dirty());
    }
}
