use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::types::{ApiError, ApiErrorKind};
use crate::wire::{ResultsEnvelope, SubmitAck};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub submit_timeout: Duration,
    /// Bound on a single results probe, distinct from the polling
    /// cadence.
    pub probe_timeout: Duration,
}

impl ApiSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: Duration::from_secs(10),
            submit_timeout: Duration::from_secs(30),
            probe_timeout: Duration::from_millis(8000),
        }
    }
}

/// Form payload for the submit endpoint: one idea per line in a single
/// `links` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub links: String,
}

impl AnalysisRequest {
    pub fn from_ideas<S: AsRef<str>>(ideas: &[S]) -> Self {
        let links = ideas
            .iter()
            .map(|idea| idea.as_ref().trim())
            .filter(|idea| !idea.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        Self { links }
    }
}

#[async_trait::async_trait]
pub trait AnalysisApi: Send + Sync {
    async fn submit(&self, request: &AnalysisRequest) -> Result<SubmitAck, ApiError>;
    async fn fetch_results(&self) -> Result<ResultsEnvelope, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpAnalysisApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl HttpAnalysisApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        reqwest::Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(ApiErrorKind::InvalidUrl, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|err| ApiError::new(ApiErrorKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait::async_trait]
impl AnalysisApi for HttpAnalysisApi {
    async fn submit(&self, request: &AnalysisRequest) -> Result<SubmitAck, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/analyze"))
            .timeout(self.settings.submit_timeout)
            .form(&[("links", request.links.as_str())])
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode_json(response).await
    }

    async fn fetch_results(&self) -> Result<ResultsEnvelope, ApiError> {
        let response = self
            .client
            .get(self.endpoint("/results"))
            .timeout(self.settings.probe_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode_json(response).await
    }
}

async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::new(
            ApiErrorKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ));
    }
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&bytes)
        .map_err(|err| ApiError::new(ApiErrorKind::MalformedBody, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiErrorKind::Timeout, err.to_string());
    }
    ApiError::new(ApiErrorKind::Network, err.to_string())
}
