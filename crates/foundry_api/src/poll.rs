use std::sync::Arc;
use std::time::Duration;

use foundry_logging::{foundry_debug, foundry_warn};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::client::AnalysisApi;
use crate::outcome::classify_probe;
use crate::types::ProbeOutcome;

/// Cadence of the recurring results probe. The per-probe timeout lives
/// in [`crate::ApiSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub cadence: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            cadence: Duration::from_millis(3000),
        }
    }
}

/// Receives classified probe outcomes as the loop produces them.
pub trait OutcomeSink: Send + Sync {
    fn emit(&self, outcome: ProbeOutcome);
}

/// The recurring results probe. One instance runs per accepted
/// submission.
///
/// Ticks are serialized: each probe is awaited before the next tick is
/// taken, and ticks that pile up behind a slow probe are skipped rather
/// than bursted. The token tears the loop down; cancelling it again
/// later is a no-op.
pub async fn run_polling_loop(
    api: Arc<dyn AnalysisApi>,
    settings: PollSettings,
    cancel: CancellationToken,
    sink: Arc<dyn OutcomeSink>,
) {
    let mut ticker = tokio::time::interval(settings.cadence);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The interval yields immediately; consume that zeroth tick so the
    // first probe lands one full cadence after the session opens.
    ticker.tick().await;

    let mut tick: u64 = 0;
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                foundry_debug!("polling loop torn down after {} tick(s)", tick);
                break;
            }
            _ = ticker.tick() => {
                tick += 1;
                let outcome = classify_probe(api.fetch_results().await);
                log_outcome(tick, &outcome);
                sink.emit(outcome);
            }
        }
    }
}

fn log_outcome(tick: u64, outcome: &ProbeOutcome) {
    match outcome {
        ProbeOutcome::Results {
            entries,
            is_complete,
        } => {
            foundry_debug!(
                "tick {}: {} result(s), is_complete={}",
                tick,
                entries.len(),
                is_complete
            );
        }
        ProbeOutcome::Empty => foundry_debug!("tick {}: no results yet", tick),
        ProbeOutcome::Timeout => foundry_warn!("tick {}: results probe timed out", tick),
        ProbeOutcome::TransportError { message } => {
            foundry_warn!("tick {}: results probe failed: {}", tick, message);
        }
    }
}
