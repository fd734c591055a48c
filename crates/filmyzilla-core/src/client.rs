//! HTTP client for the listing site and the indirection document
//!
//! Every call is a single attempt. Failures propagate straight to the
//! caller; there is no retry and no rate limiting.

use std::time::Duration;

use tracing::debug;

use crate::error::{FilmyzillaError, Result};
use crate::types::Sources;

/// Browser-like identification; the upstream rejects default client agents
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds, `None` waits indefinitely (default: 30)
    pub timeout_secs: Option<u64>,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Some(30),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// HTTP client wrapper
///
/// Handles all outbound HTTP communication:
/// - Browser-like User-Agent header on every request
/// - Non-success status codes turned into errors
/// - JSON decoding of the indirection document
#[derive(Debug, Clone)]
pub struct FilmyzillaClient {
    client: reqwest::Client,
}

impl FilmyzillaClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent);

        if let Some(secs) = config.timeout_secs.filter(|secs| *secs > 0) {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().map_err(FilmyzillaError::HttpError)?;

        Ok(Self { client })
    }

    /// Fetch HTML content from an absolute URL
    ///
    /// # Arguments
    /// * `url` - Absolute page URL
    ///
    /// # Returns
    /// The response body as a string
    ///
    /// # Errors
    /// - `HttpError` - Network errors, timeouts, body decoding
    /// - `UpstreamStatus` - Server answered with a non-2xx status
    pub async fn fetch_html(&self, url: &str) -> Result<String> {
        debug!(url, "fetching page");
        let response = self.get(url).await?;
        response.text().await.map_err(FilmyzillaError::HttpError)
    }

    /// Fetch and decode the indirection document
    ///
    /// # Errors
    /// - `HttpError` / `UpstreamStatus` - as for [`fetch_html`](Self::fetch_html)
    /// - `InvalidSource` - Body is not JSON or lacks a string `primary` field
    pub async fn fetch_sources(&self, url: &str) -> Result<Sources> {
        debug!(url, "fetching sources document");
        let response = self.get(url).await?;
        let body = response.text().await.map_err(FilmyzillaError::HttpError)?;

        serde_json::from_str(&body).map_err(|e| FilmyzillaError::InvalidSource(e.to_string()))
    }

    /// Perform a single GET and reject non-success statuses
    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FilmyzillaError::HttpError)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FilmyzillaError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }
}
