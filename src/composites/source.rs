//! Upstream access for composite resources.
//!
//! # Responsibilities
//! - Build `/composites/...` URLs against the configured base
//! - Issue uncached GET requests with a deadline
//! - Classify failures (transport, timeout, status, decode)
//!
//! # Design Decisions
//! - The loader depends on the `CompositeSource` capability, not on reqwest
//! - Non-2xx statuses are errors; bodies are only decoded on success

use std::future::Future;
use std::time::Duration;

use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::UpstreamConfig;

/// Failure while fetching from upstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("invalid upstream url: {0}")]
    Url(String),

    #[error("upstream request timed out")]
    Timeout,

    #[error("upstream transport error: {0}")]
    Transport(String),

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("undecodable upstream body: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status(404))
    }

    /// Short label for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            FetchError::Url(_) => "url",
            FetchError::Timeout => "timeout",
            FetchError::Transport(_) => "transport",
            FetchError::Status(404) => "not_found",
            FetchError::Status(_) => "status",
            FetchError::Decode(_) => "decode",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

/// Something that can GET JSON from the composites API.
///
/// `segments` are path segments below the base URL, e.g.
/// `["composites", "com.example.Foo"]`.
pub trait CompositeSource: Send + Sync {
    fn get_json(&self, segments: &[&str]) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// reqwest-backed source talking to the real upstream.
#[derive(Debug, Clone)]
pub struct HttpCompositeSource {
    client: Client,
    base_url: Url,
}

impl HttpCompositeSource {
    pub fn new(config: &UpstreamConfig) -> Result<Self, FetchError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| FetchError::Url(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::Url(config.base_url.clone()));
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL for `segments` below the base. Each segment is percent-encoded
    /// whole, so `/` inside an identifier is sent as `%2F`.
    ///
    /// `.` and `..` are rejected: URL normalisation would drop them (encoded
    /// or not) and the request would address a different resource.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        if let Some(dots) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(FetchError::Url(format!(
                "path segment `{}` cannot be addressed",
                dots
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::Url(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl CompositeSource for HttpCompositeSource {
    async fn get_json(&self, segments: &[&str]) -> Result<Value, FetchError> {
        let url = self.endpoint(segments)?;
        tracing::debug!(url = %url, "Fetching from upstream");

        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.json::<Value>().await?)
    }
}
