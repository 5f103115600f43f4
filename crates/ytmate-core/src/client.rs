//! HTTP client for the upstream analyze/convert endpoints
//!
//! One outbound POST per call, form encoded, with browser-like headers.
//! No retries and no rate limiting: a single upstream failure surfaces
//! to the caller.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, ORIGIN, REFERER};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{YtMateError, Result};
use crate::url::{BASE_URL, build_analyze_url, build_convert_url, origin, referer};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const ACCEPT_JSON: &str = "application/json, text/javascript, */*; q=0.01";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Upstream base URL (default: https://yt1d.com)
    pub base_url: String,
    /// Request timeout in seconds (default: none, reqwest's own behaviour)
    pub timeout_secs: Option<u64>,
    /// User-Agent sent upstream (default: desktop Chrome)
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout_secs: None,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// Envelope returned by the analyze endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct AnalyzeEnvelope {
    #[serde(default)]
    pub status: Value,
    /// HTML fragment on success; absent or not a string otherwise
    #[serde(default)]
    pub result: Value,
}

impl AnalyzeEnvelope {
    /// The HTML payload, if the upstream reported success with a non-empty fragment
    pub fn html(&self) -> Option<&str> {
        if self.status.as_str() != Some("success") {
            return None;
        }
        self.result.as_str().filter(|html| !html.is_empty())
    }
}

/// HTTP client wrapper for the upstream site
///
/// Handles all HTTP communication with the upstream, including the
/// `Origin`/`Referer` pair the site checks and the `x-note` header the
/// convert endpoint expects.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));

        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(YtMateError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    /// Upstream base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit the analyze form
    ///
    /// # Errors
    /// - `Http` - network failure or undecodable JSON body
    /// - `UpstreamUnavailable` - non-2xx status
    pub(crate) async fn post_analyze(&self, form: &[(&str, &str)]) -> Result<AnalyzeEnvelope> {
        let request = self
            .client
            .post(build_analyze_url(&self.base_url))
            .header(ORIGIN, origin(&self.base_url))
            .header(REFERER, referer(&self.base_url))
            .form(form);

        self.send_json(request).await
    }

    /// Submit the convert form for `id`, echoing `note` as `x-note`
    ///
    /// The `x-note` header is omitted when there is no note.
    ///
    /// # Errors
    /// - `Http` - network failure, undecodable JSON body, or a note that
    ///   is not a valid header value
    /// - `UpstreamUnavailable` - non-2xx status
    pub(crate) async fn post_convert(
        &self,
        id: &str,
        note: Option<&str>,
        form: &[(&str, &str)],
    ) -> Result<Value> {
        let mut request = self
            .client
            .post(build_convert_url(&self.base_url, id))
            .header(ORIGIN, origin(&self.base_url))
            .header(REFERER, referer(&self.base_url));
        if let Some(note) = note {
            request = request.header("x-note", note);
        }
        let request = request.header("platform", "youtube").form(form);

        self.send_json(request).await
    }

    /// Perform a single request and decode its JSON body
    async fn send_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(YtMateError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(YtMateError::UpstreamUnavailable(format!(
                "upstream returned status {status}"
            )));
        }

        response.json::<T>().await.map_err(YtMateError::Http)
    }
}
