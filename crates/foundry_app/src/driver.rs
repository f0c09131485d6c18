use std::sync::Arc;

use chrono::Utc;
use foundry_api::{
    classify_submit, run_polling_loop, AnalysisApi, AnalysisRequest, OutcomeSink, PollSettings,
};
use foundry_core::{
    Effect, Msg, PhasePlan, ProbeOutcome, ResultBody, ResultEntry, StrategyArtifacts, SubmitOutcome,
};
use foundry_logging::{foundry_info, foundry_warn};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Executes reducer effects: spawns the submit, polling, and timeline
/// tasks and feeds their completions back into the message loop.
pub struct Driver {
    api: Arc<dyn AnalysisApi>,
    msg_tx: mpsc::UnboundedSender<Msg>,
    poll_settings: PollSettings,
    phase_plan: PhasePlan,
    poll_cancel: Option<(u64, CancellationToken)>,
}

impl Driver {
    pub fn new(
        api: Arc<dyn AnalysisApi>,
        msg_tx: mpsc::UnboundedSender<Msg>,
        poll_settings: PollSettings,
        phase_plan: PhasePlan,
    ) -> Self {
        Self {
            api,
            msg_tx,
            poll_settings,
            phase_plan,
            poll_cancel: None,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.run_one(effect);
        }
    }

    fn run_one(&mut self, effect: Effect) {
        match effect {
            Effect::SubmitAnalysis { seq, ideas } => {
                foundry_info!("submitting {} idea(s), seq={}", ideas.len(), seq);
                let api = self.api.clone();
                let msg_tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let request = AnalysisRequest::from_ideas(&ideas);
                    let outcome = map_submit(classify_submit(api.submit(&request).await));
                    if let SubmitOutcome::Rejected { message } = &outcome {
                        foundry_warn!("submission rejected: {}", message);
                    }
                    let _ = msg_tx.send(Msg::SubmitFinished { seq, outcome });
                });
            }
            Effect::StartPolling { seq } => {
                let token = CancellationToken::new();
                self.poll_cancel = Some((seq, token.clone()));
                let sink = Arc::new(MsgOutcomeSink {
                    seq,
                    msg_tx: self.msg_tx.clone(),
                });
                tokio::spawn(run_polling_loop(
                    self.api.clone(),
                    self.poll_settings,
                    token,
                    sink,
                ));
            }
            Effect::StopPolling { seq, reason } => {
                if let Some((active_seq, token)) = &self.poll_cancel {
                    if *active_seq == seq {
                        foundry_info!("polling stopped ({:?}), seq={}", reason, seq);
                        // Cancelling an already-cancelled token is a no-op.
                        token.cancel();
                    }
                }
            }
            Effect::StartPhaseTimeline { seq } => {
                tokio::spawn(run_phase_timeline(
                    self.phase_plan.clone(),
                    seq,
                    self.msg_tx.clone(),
                ));
            }
        }
    }
}

/// Bridges classified probe outcomes into the message loop, stamping
/// each with its submission sequence and a wall-clock timestamp.
struct MsgOutcomeSink {
    seq: u64,
    msg_tx: mpsc::UnboundedSender<Msg>,
}

impl OutcomeSink for MsgOutcomeSink {
    fn emit(&self, outcome: foundry_api::ProbeOutcome) {
        let _ = self.msg_tx.send(Msg::ProbeFinished {
            seq: self.seq,
            outcome: map_probe(outcome),
            at: Utc::now().to_rfc3339(),
        });
    }
}

/// Walks the plan once, unconditionally. A superseded run keeps
/// executing to its end; the reducer fences its messages out by
/// sequence number.
async fn run_phase_timeline(plan: PhasePlan, seq: u64, msg_tx: mpsc::UnboundedSender<Msg>) {
    for script in plan.scripts() {
        let _ = msg_tx.send(Msg::PhaseStarted {
            seq,
            phase: script.phase,
        });
        let step = script.message_interval();
        for text in &script.messages {
            tokio::time::sleep(step).await;
            let _ = msg_tx.send(Msg::PhaseMessagePosted {
                seq,
                phase: script.phase,
                text: text.clone(),
            });
        }
        let _ = msg_tx.send(Msg::PhaseCompleted {
            seq,
            phase: script.phase,
        });
    }
}

fn map_submit(outcome: foundry_api::SubmitOutcome) -> SubmitOutcome {
    match outcome {
        foundry_api::SubmitOutcome::Accepted => SubmitOutcome::Accepted,
        foundry_api::SubmitOutcome::Rejected { message } => SubmitOutcome::Rejected { message },
    }
}

fn map_probe(outcome: foundry_api::ProbeOutcome) -> ProbeOutcome {
    match outcome {
        foundry_api::ProbeOutcome::Results {
            entries,
            is_complete,
        } => ProbeOutcome::Results {
            entries: entries.into_iter().map(map_entry).collect(),
            is_complete,
        },
        foundry_api::ProbeOutcome::Empty => ProbeOutcome::Empty,
        foundry_api::ProbeOutcome::Timeout => ProbeOutcome::Timeout,
        foundry_api::ProbeOutcome::TransportError { message } => {
            ProbeOutcome::TransportError { message }
        }
    }
}

fn map_entry(result: foundry_api::StrategyResult) -> ResultEntry {
    match result.body {
        foundry_api::StrategyResultBody::Success {
            link,
            strategy,
            backtest,
            strategy_file,
            backtest_file,
        } => ResultEntry::new(
            result.strategy_number,
            ResultBody::Success(StrategyArtifacts {
                link,
                strategy,
                backtest,
                strategy_file,
                backtest_file,
            }),
        ),
        foundry_api::StrategyResultBody::Error { message } => {
            ResultEntry::new(result.strategy_number, ResultBody::Error { message })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use foundry_core::{PhaseId, PhaseScript};

    use super::*;

    #[tokio::test]
    async fn timeline_posts_scripted_messages_in_order() {
        let plan = PhasePlan::new(vec![
            PhaseScript::new(PhaseId::Research, &["a", "b"], Duration::from_millis(20)),
            PhaseScript::new(PhaseId::Backtest, &["c"], Duration::from_millis(10)),
        ]);
        let (msg_tx, mut msg_rx) = mpsc::unbounded_channel();

        run_phase_timeline(plan, 7, msg_tx).await;

        let mut got = Vec::new();
        while let Ok(msg) = msg_rx.try_recv() {
            got.push(msg);
        }
        assert_eq!(
            got,
            vec![
                Msg::PhaseStarted {
                    seq: 7,
                    phase: PhaseId::Research,
                },
                Msg::PhaseMessagePosted {
                    seq: 7,
                    phase: PhaseId::Research,
                    text: "a".to_string(),
                },
                Msg::PhaseMessagePosted {
                    seq: 7,
                    phase: PhaseId::Research,
                    text: "b".to_string(),
                },
                Msg::PhaseCompleted {
                    seq: 7,
                    phase: PhaseId::Research,
                },
                Msg::PhaseStarted {
                    seq: 7,
                    phase: PhaseId::Backtest,
                },
                Msg::PhaseMessagePosted {
                    seq: 7,
                    phase: PhaseId::Backtest,
                    text: "c".to_string(),
                },
                Msg::PhaseCompleted {
                    seq: 7,
                    phase: PhaseId::Backtest,
                },
            ]
        );
    }

    #[test]
    fn mapped_entries_keep_stable_ids() {
        let success = foundry_api::StrategyResult {
            strategy_number: 4,
            body: foundry_api::StrategyResultBody::Success {
                link: "https://example.com".to_string(),
                strategy: "s".to_string(),
                backtest: "b".to_string(),
                strategy_file: "strategy_4.txt".to_string(),
                backtest_file: "backtest_4.py".to_string(),
            },
        };
        assert_eq!(map_entry(success).id, "strategy-4");

        let error = foundry_api::StrategyResult {
            strategy_number: 9,
            body: foundry_api::StrategyResultBody::Error {
                message: "bad transcript".to_string(),
            },
        };
        let mapped = map_entry(error);
        assert_eq!(mapped.id, "strategy-9");
        assert!(matches!(mapped.body, ResultBody::Error { .. }));
    }
}
