//! Line-oriented HTTP client for the upstream catalogue services.
//!
//! `LineClient::fetch_lines` never fails: every outcome, including
//! transport errors and non-success statuses, comes back as a list of text
//! lines. Tool handlers hand that list straight to the MCP client.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use super::error::Result;

/// Returned when a tool is bound to an empty base URL.
pub const BASE_URL_NOT_CONFIGURED: &str = "Error: base URL not configured";

/// Status and decoded body of an upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A request that produced no response (timeout, DNS, refused connection,
/// unreadable body, invalid URL).
#[derive(Debug, Error)]
#[error("{0}")]
pub struct FetchError(String);

impl FetchError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Flatten an error and its sources into one diagnostic line.
    pub fn from_source(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut msg = err.to_string();
        let mut source = err.source();
        while let Some(inner) = source {
            let text = inner.to_string();
            if !msg.contains(&text) {
                msg.push_str(": ");
                msg.push_str(&text);
            }
            source = inner.source();
        }
        Self(msg)
    }
}

/// A single GET against an upstream service.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn get(&self, url: &str) -> std::result::Result<HttpResponse, FetchError>;
}

/// `reqwest` backed implementation with a fixed per-request timeout.
///
/// `reqwest::Client` pools connections internally and is safe to share
/// between concurrent tool calls.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::from_client(client))
    }

    /// Wrap an already configured `reqwest::Client`.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get(&self, url: &str) -> std::result::Result<HttpResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_source(&e))?;

        let status = response.status().as_u16();

        // Upstream bodies are always treated as UTF-8, whatever the headers say.
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_source(&e))?;

        Ok(HttpResponse {
            status,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

/// HTTP client returning response bodies as lines of text.
#[derive(Clone)]
pub struct LineClient {
    backend: Arc<dyn HttpBackend>,
}

impl std::fmt::Debug for LineClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineClient").finish_non_exhaustive()
    }
}

impl LineClient {
    /// Create a client backed by `reqwest` with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self::with_backend(Arc::new(ReqwestBackend::new(timeout)?)))
    }

    /// Create a client over a custom backend.
    pub fn with_backend(backend: Arc<dyn HttpBackend>) -> Self {
        Self { backend }
    }

    /// Build `{base}/{endpoint}?{k=v&...}`.
    ///
    /// Trailing slashes on the base and leading slashes on the endpoint are
    /// collapsed so exactly one separator remains. Query values are inserted
    /// verbatim, in the order given.
    pub fn build_url(base_url: &str, endpoint: &str, params: &[(&str, String)]) -> String {
        let mut url = base_url.trim_end_matches('/').to_string();

        if !endpoint.is_empty() {
            url.push('/');
            url.push_str(endpoint.trim_start_matches('/'));
        }

        if !params.is_empty() {
            let query = params
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&query);
        }

        url
    }

    /// Fetch `{base_url}/{endpoint}?{params}` and return the body as lines.
    ///
    /// Failures come back as a single line:
    /// - `Error: base URL not configured` when `base_url` is empty
    /// - `Error {status}: {body}` for non-2xx responses
    /// - `Request failed: {reason}` when no response was received
    #[instrument(skip(self, params))]
    pub async fn fetch_lines(
        &self,
        base_url: &str,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Vec<String> {
        if base_url.is_empty() {
            warn!("Tool called without a configured base URL");
            return vec![BASE_URL_NOT_CONFIGURED.to_string()];
        }

        let url = Self::build_url(base_url, endpoint, params);
        debug!("GET {}", url);

        match self.backend.get(&url).await {
            Ok(response) if response.is_success() => {
                let lines: Vec<String> = response.body.lines().map(str::to_owned).collect();
                debug!("Received {} line(s) from {}", lines.len(), url);
                lines
            }
            Ok(response) => {
                warn!("Upstream {} answered with status {}", url, response.status);
                vec![format!(
                    "Error {}: {}",
                    response.status,
                    response.body.trim()
                )]
            }
            Err(e) => {
                debug!("Request failed: {}", e);
                vec![format!("Request failed: {e}")]
            }
        }
    }
}
