use std::fmt;

/// One decoded entry from the results endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyResult {
    pub strategy_number: u32,
    pub body: StrategyResultBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyResultBody {
    Success {
        link: String,
        strategy: String,
        backtest: String,
        strategy_file: String,
        backtest_file: String,
    },
    Error {
        message: String,
    },
}

/// Classification of one results probe. Every probe collapses into
/// exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Results {
        entries: Vec<StrategyResult>,
        is_complete: bool,
    },
    Empty,
    Timeout,
    TransportError {
        message: String,
    },
}

/// Classification of the submit acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedBody,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::InvalidUrl => write!(f, "invalid url"),
            ApiErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            ApiErrorKind::Timeout => write!(f, "timeout"),
            ApiErrorKind::Network => write!(f, "network error"),
            ApiErrorKind::MalformedBody => write!(f, "malformed body"),
        }
    }
}
