use serde::Deserialize;

use crate::types::{StrategyResult, StrategyResultBody};

/// The status value both endpoints use for a healthy answer.
pub const STATUS_SUCCESS: &str = "success";

/// Acknowledgment returned by the submit endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmitAck {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Envelope returned by the results endpoint. Missing fields decode to
/// their empty forms so a sparse body still classifies.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResultsEnvelope {
    pub status: String,
    #[serde(default)]
    pub results: Vec<WireResult>,
    #[serde(default)]
    pub is_complete: bool,
}

/// One raw results entry. A populated `error` field marks the failure
/// shape; otherwise the artifact fields apply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WireResult {
    pub strategy_number: u32,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub backtest: Option<String>,
    #[serde(default)]
    pub strategy_file: Option<String>,
    #[serde(default)]
    pub backtest_file: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl From<WireResult> for StrategyResult {
    fn from(raw: WireResult) -> Self {
        let body = match raw.error {
            Some(message) => StrategyResultBody::Error { message },
            None => StrategyResultBody::Success {
                link: raw.link.unwrap_or_default(),
                strategy: raw.strategy.unwrap_or_default(),
                backtest: raw.backtest.unwrap_or_default(),
                strategy_file: raw.strategy_file.unwrap_or_default(),
                backtest_file: raw.backtest_file.unwrap_or_default(),
            },
        };
        Self {
            strategy_number: raw.strategy_number,
            body,
        }
    }
}
