use std::time::Duration;

use engine_logging::engine_debug;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use url::Url;

use crate::{FailureKind, FetchError, SummaryRequest, SummaryResponse};

/// Relative to the server base URL.
pub const SUMMARY_PATH: &str = "api/summary_bili";
pub const HEALTH_PATH: &str = "api/health";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Whole-request limit. Summaries take minutes server-side, so there is none by default.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_bytes: 4 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait SummaryClient: Send + Sync {
    async fn summarize(&self, video_url: &str) -> Result<SummaryResponse, FetchError>;

    /// `true` when the backend answers its health probe with `{"status": "ok"}`.
    async fn health(&self) -> Result<bool, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSummaryClient {
    client: reqwest::Client,
    summary_url: Url,
    health_url: Url,
    max_bytes: u64,
}

impl ReqwestSummaryClient {
    pub fn new(settings: ClientSettings) -> Result<Self, FetchError> {
        let base = parse_base_url(&settings.base_url)?;
        let summary_url = join(&base, SUMMARY_PATH)?;
        let health_url = join(&base, HEALTH_PATH)?;

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            summary_url,
            health_url,
            max_bytes: settings.max_bytes,
        })
    }

    pub fn summary_url(&self) -> &Url {
        &self.summary_url
    }

    async fn read_json(&self, response: reqwest::Response) -> Result<Value, FetchError> {
        if let Some(content_len) = response.content_length() {
            if content_len > self.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }
}

#[async_trait::async_trait]
impl SummaryClient for ReqwestSummaryClient {
    async fn summarize(&self, video_url: &str) -> Result<SummaryResponse, FetchError> {
        let body = serde_json::to_vec(&SummaryRequest {
            url: video_url.to_string(),
        })
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;

        let response = self
            .client
            .post(self.summary_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        // Failures come back as 4xx/5xx with a JSON body, so the status is only logged.
        let status = response.status();
        engine_debug!("summary response status={}", status);
        let body = self.read_json(response).await?;
        SummaryResponse::from_json(body)
    }

    async fn health(&self) -> Result<bool, FetchError> {
        let response = self
            .client
            .get(self.health_url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;
        if !response.status().is_success() {
            return Ok(false);
        }
        let body = self.read_json(response).await?;
        Ok(body.get("status").and_then(Value::as_str) == Some("ok"))
    }
}

fn parse_base_url(raw: &str) -> Result<Url, FetchError> {
    let mut base =
        Url::parse(raw).map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(FetchError::new(
            FailureKind::InvalidUrl,
            format!("{raw} cannot be used as a base url"),
        ));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

fn join(base: &Url, path: &str) -> Result<Url, FetchError> {
    base.join(path)
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::Decode, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
