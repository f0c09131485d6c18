use std::time::Duration;

/// The three stages of the progress timeline, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseId {
    Research,
    Backtest,
    Debug,
}

impl PhaseId {
    pub const ALL: [PhaseId; 3] = [PhaseId::Research, PhaseId::Backtest, PhaseId::Debug];

    pub fn label(self) -> &'static str {
        match self {
            PhaseId::Research => "Research",
            PhaseId::Backtest => "Backtest",
            PhaseId::Debug => "Debug",
        }
    }

    fn index(self) -> usize {
        match self {
            PhaseId::Research => 0,
            PhaseId::Backtest => 1,
            PhaseId::Debug => 2,
        }
    }
}

/// Visual state of one phase slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseState {
    #[default]
    Idle,
    Active,
    Complete,
    Error,
}

impl PhaseState {
    fn is_terminal(self) -> bool {
        matches!(self, PhaseState::Complete | PhaseState::Error)
    }
}

/// One slot on the timeline: a phase, its state, and the messages posted
/// to it so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseSlot {
    pub phase: PhaseId,
    pub state: PhaseState,
    pub messages: Vec<String>,
}

impl PhaseSlot {
    fn new(phase: PhaseId) -> Self {
        Self {
            phase,
            state: PhaseState::Idle,
            messages: Vec::new(),
        }
    }
}

/// The timeline shown for the current submission.
///
/// Transitions only move forward: idle, active, complete. The one
/// exception is the externally applied error state, which is terminal.
/// At most one slot is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseBoard {
    slots: [PhaseSlot; 3],
}

impl Default for PhaseBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseBoard {
    pub fn new() -> Self {
        Self {
            slots: PhaseId::ALL.map(PhaseSlot::new),
        }
    }

    pub fn slots(&self) -> &[PhaseSlot] {
        &self.slots
    }

    pub fn state_of(&self, phase: PhaseId) -> PhaseState {
        self.slots[phase.index()].state
    }

    pub fn active_phase(&self) -> Option<PhaseId> {
        self.slots
            .iter()
            .find(|slot| slot.state == PhaseState::Active)
            .map(|slot| slot.phase)
    }

    /// True once any slot has left idle and the last slot has not yet
    /// reached a terminal state.
    pub fn is_running(&self) -> bool {
        let started = self.slots.iter().any(|slot| slot.state != PhaseState::Idle);
        let last_finished = self.slots[PhaseId::ALL.len() - 1].state.is_terminal();
        started && !last_finished
    }

    /// Marks a phase active. A lingering active slot is promoted to
    /// complete first, so at most one slot is ever active. Slots already
    /// in a terminal state are left alone.
    pub fn activate(&mut self, phase: PhaseId) -> bool {
        if self.slots[phase.index()].state != PhaseState::Idle {
            return false;
        }
        for slot in &mut self.slots {
            if slot.state == PhaseState::Active {
                slot.state = PhaseState::Complete;
            }
        }
        self.slots[phase.index()].state = PhaseState::Active;
        true
    }

    /// Appends a message to a phase's log. Errored slots stop accepting
    /// messages.
    pub fn post_message(&mut self, phase: PhaseId, text: String) -> bool {
        let slot = &mut self.slots[phase.index()];
        if slot.state == PhaseState::Error {
            return false;
        }
        slot.messages.push(text);
        true
    }

    pub fn complete(&mut self, phase: PhaseId) -> bool {
        let slot = &mut self.slots[phase.index()];
        if slot.state != PhaseState::Active {
            return false;
        }
        slot.state = PhaseState::Complete;
        true
    }

    /// Externally applied terminal failure. Completed slots keep their
    /// completed state.
    pub fn fail(&mut self, phase: PhaseId) -> bool {
        let slot = &mut self.slots[phase.index()];
        if slot.state.is_terminal() {
            return false;
        }
        slot.state = PhaseState::Error;
        true
    }
}

/// Scripted messages and pacing for one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseScript {
    pub phase: PhaseId,
    pub messages: Vec<String>,
    pub total: Duration,
}

impl PhaseScript {
    pub fn new(phase: PhaseId, messages: &[&str], total: Duration) -> Self {
        Self {
            phase,
            messages: messages.iter().map(|m| (*m).to_string()).collect(),
            total,
        }
    }

    /// Delay before each scripted message: the phase budget split evenly
    /// across its messages.
    pub fn message_interval(&self) -> Duration {
        let count = self.messages.len().max(1) as u32;
        self.total / count
    }
}

/// Ordered scripts for a full timeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhasePlan {
    scripts: Vec<PhaseScript>,
}

impl PhasePlan {
    pub fn new(scripts: Vec<PhaseScript>) -> Self {
        Self { scripts }
    }

    pub fn scripts(&self) -> &[PhaseScript] {
        &self.scripts
    }

    pub fn total(&self) -> Duration {
        self.scripts.iter().map(|script| script.total).sum()
    }

    /// The stock pacing shown while the backend works through a batch.
    pub fn standard() -> Self {
        Self::new(vec![
            PhaseScript::new(
                PhaseId::Research,
                &[
                    "Reading the submitted ideas",
                    "Pulling source material",
                    "Extracting entry and exit rules",
                    "Writing up strategy notes",
                ],
                Duration::from_secs(40),
            ),
            PhaseScript::new(
                PhaseId::Backtest,
                &[
                    "Scaffolding the backtest harness",
                    "Wiring up indicators",
                    "Sweeping parameter ranges",
                    "Collecting performance stats",
                ],
                Duration::from_secs(50),
            ),
            PhaseScript::new(
                PhaseId::Debug,
                &[
                    "Reviewing the generated code",
                    "Fixing import and syntax issues",
                    "Running the final pass",
                ],
                Duration::from_secs(30),
            ),
        ])
    }
}
