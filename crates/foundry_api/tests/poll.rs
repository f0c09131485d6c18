use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use foundry_api::{
    run_polling_loop, AnalysisApi, AnalysisRequest, ApiError, OutcomeSink, PollSettings,
    ProbeOutcome, ResultsEnvelope, SubmitAck,
};
use tokio_util::sync::CancellationToken;

/// Always answers "success with no results", optionally after a delay.
/// Tracks how many probes ran and how many overlapped.
struct SlowEmptyApi {
    delay: Duration,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl SlowEmptyApi {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl AnalysisApi for SlowEmptyApi {
    async fn submit(&self, _request: &AnalysisRequest) -> Result<SubmitAck, ApiError> {
        Ok(SubmitAck {
            status: "success".to_string(),
            message: None,
        })
    }

    async fn fetch_results(&self) -> Result<ResultsEnvelope, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(ResultsEnvelope {
            status: "success".to_string(),
            results: Vec::new(),
            is_complete: false,
        })
    }
}

#[derive(Default)]
struct RecordingSink {
    outcomes: Mutex<Vec<ProbeOutcome>>,
}

impl RecordingSink {
    fn count(&self) -> usize {
        self.outcomes.lock().unwrap().len()
    }
}

impl OutcomeSink for RecordingSink {
    fn emit(&self, outcome: ProbeOutcome) {
        self.outcomes.lock().unwrap().push(outcome);
    }
}

#[tokio::test]
async fn first_probe_waits_one_full_cadence() {
    let api = Arc::new(SlowEmptyApi::new(Duration::ZERO));
    let sink = Arc::new(RecordingSink::default());
    let cancel = CancellationToken::new();
    let settings = PollSettings {
        cadence: Duration::from_millis(120),
    };

    let handle = tokio::spawn(run_polling_loop(
        api.clone(),
        settings,
        cancel.clone(),
        sink.clone(),
    ));
    tokio::time::sleep(Duration::from_millis(30)).await;
    cancel.cancel();
    handle.await.unwrap();

    assert_eq!(sink.count(), 0);
    assert_eq!(api.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn loop_emits_outcomes_until_cancelled() {
    let api = Arc::new(SlowEmptyApi::new(Duration::ZERO));
    let sink = Arc::new(RecordingSink::default());
    let cancel = CancellationToken::new();
    let settings = PollSettings {
        cadence: Duration::from_millis(25),
    };

    let handle = tokio::spawn(run_polling_loop(
        api.clone(),
        settings,
        cancel.clone(),
        sink.clone(),
    ));
    tokio::time::sleep(Duration::from_millis(140)).await;
    cancel.cancel();
    handle.await.unwrap();

    let emitted = sink.count();
    assert!(emitted >= 2, "expected several probes, got {emitted}");
    assert!(sink
        .outcomes
        .lock()
        .unwrap()
        .iter()
        .all(|outcome| *outcome == ProbeOutcome::Empty));

    // Nothing more arrives after teardown.
    tokio::time::sleep(Duration::from_millis(80)).await;
    assert_eq!(sink.count(), emitted);
}

#[tokio::test]
async fn cancelling_before_the_first_tick_probes_nothing() {
    let api = Arc::new(SlowEmptyApi::new(Duration::ZERO));
    let sink = Arc::new(RecordingSink::default());
    let cancel = CancellationToken::new();
    cancel.cancel();

    run_polling_loop(
        api.clone(),
        PollSettings::default(),
        cancel.clone(),
        sink.clone(),
    )
    .await;

    assert_eq!(sink.count(), 0);
    assert_eq!(api.calls.load(Ordering::SeqCst), 0);

    // Tearing down an already torn-down loop is a no-op.
    cancel.cancel();
}

#[tokio::test]
async fn slow_probes_never_overlap() {
    let api = Arc::new(SlowEmptyApi::new(Duration::from_millis(60)));
    let sink = Arc::new(RecordingSink::default());
    let cancel = CancellationToken::new();
    let settings = PollSettings {
        cadence: Duration::from_millis(20),
    };

    let handle = tokio::spawn(run_polling_loop(
        api.clone(),
        settings,
        cancel.clone(),
        sink.clone(),
    ));
    tokio::time::sleep(Duration::from_millis(300)).await;
    cancel.cancel();
    handle.await.unwrap();

    assert_eq!(api.max_in_flight.load(Ordering::SeqCst), 1);
    let calls = api.calls.load(Ordering::SeqCst);
    assert!(
        calls < 10,
        "piled-up ticks should be skipped, saw {calls} probes"
    );
}
