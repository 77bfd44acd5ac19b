// response-gate-providers/src/fetch.rs
// ============================================================================
// Module: Analytics API Fetcher
// Description: Authenticated GET client for the upstream analytics API.
// Purpose: Return raw payloads or structured failures without interpretation.
// Dependencies: reqwest, serde_json
// ============================================================================

//! ## Overview
//! The fetcher issues one authenticated GET per tool invocation and reports
//! the result as a total [`FetchResult`]: success carries the decoded JSON
//! body uninterpreted, failure carries an HTTP status plus body text or a
//! network-kind message. List-valued parameters serialize as repeated query
//! keys in input order; empty lists are omitted before the call.
//! Security posture: response bodies are untrusted; the fetcher never treats
//! them as anything but opaque data.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use reqwest::Client;
use reqwest::StatusCode;
use reqwest::Url;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Client-identification header value sent with every outbound request.
pub const USER_AGENT: &str = concat!("response-gate/", env!("CARGO_PKG_VERSION"));

/// Default data-fetch timeout in milliseconds.
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 30_000;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the analytics fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    /// Base URL of the analytics API, fixed for the process lifetime.
    pub base_url: String,
    /// Secret attached to every request as the authentication header.
    pub api_token: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

// ============================================================================
// SECTION: Parameter Values
// ============================================================================

/// Query parameter value accepted by the fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Single scalar, already rendered as text.
    Scalar(String),
    /// List of scalars, serialized as repeated keys under the same name.
    List(Vec<String>),
}

/// Expands parameters into ordered query pairs, dropping empty lists.
fn query_pairs(params: &[(String, ParamValue)]) -> Vec<(&str, &str)> {
    let mut pairs = Vec::new();
    for (name, value) in params {
        match value {
            ParamValue::Scalar(scalar) => pairs.push((name.as_str(), scalar.as_str())),
            ParamValue::List(items) => {
                for item in items {
                    pairs.push((name.as_str(), item.as_str()));
                }
            }
        }
    }
    pairs
}

// ============================================================================
// SECTION: Fetch Results
// ============================================================================

/// Result of one fetch attempt; total over all failure modes.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    /// Decoded JSON body, semantics uninterpreted.
    Success(Value),
    /// Structured failure suitable for direct reporting.
    Failure(FetchFailure),
}

/// Failure taxonomy for fetch attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailureKind {
    /// The server answered with a non-2xx status.
    Http,
    /// The request never completed (DNS, connect, reset, decode).
    Network,
}

impl FetchFailureKind {
    /// Returns a stable label for audit events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Network => "network",
        }
    }
}

/// Structured fetch failure carrying diagnostic detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    /// Failure taxonomy kind.
    pub kind: FetchFailureKind,
    /// HTTP status code for `Http` failures.
    pub status: Option<u16>,
    /// Response body text or underlying transport message.
    pub message: String,
}

impl FetchFailure {
    /// Constructs an HTTP-status failure carrying the body text.
    #[must_use]
    pub const fn http(status: u16, message: String) -> Self {
        Self {
            kind: FetchFailureKind::Http,
            status: Some(status),
            message,
        }
    }

    /// Constructs a network-kind failure with the underlying message.
    #[must_use]
    pub const fn network(message: String) -> Self {
        Self {
            kind: FetchFailureKind::Network,
            status: None,
            message,
        }
    }
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "request failed: HTTP {status}: {}", self.message),
            None => write!(f, "request failed: network error: {}", self.message),
        }
    }
}

// ============================================================================
// SECTION: Fetcher
// ============================================================================

/// Authenticated GET client for the analytics API.
pub struct ApiFetcher {
    /// Fetcher configuration, including the fixed base URL and secret.
    config: FetcherConfig,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl ApiFetcher {
    /// Creates a new fetcher with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetcherError`] when the base URL is invalid or the HTTP
    /// client cannot be created.
    pub fn new(config: FetcherConfig) -> Result<Self, FetcherError> {
        Url::parse(&config.base_url).map_err(|_| FetcherError::InvalidBaseUrl)?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|_| FetcherError::ClientBuild)?;
        Ok(Self {
            config,
            client,
        })
    }

    /// Fetches one endpoint, returning a total result rather than an error.
    ///
    /// Non-2xx statuses become `Http` failures with the body text; transport
    /// errors and undecodable 2xx bodies become `Network` failures.
    pub async fn fetch(&self, path: &str, params: &[(String, ParamValue)]) -> FetchResult {
        let url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Token {}", self.config.api_token))
            .query(&query_pairs(params))
            .send()
            .await;
        match response {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    decode_body(response).await
                } else {
                    let body = response.text().await.unwrap_or_default();
                    FetchResult::Failure(FetchFailure::http(status.as_u16(), body))
                }
            }
            Err(err) => FetchResult::Failure(FetchFailure::network(err.to_string())),
        }
    }
}

/// Decodes a 2xx response body as JSON.
async fn decode_body(response: reqwest::Response) -> FetchResult {
    let status: StatusCode = response.status();
    match response.json::<Value>().await {
        Ok(value) => FetchResult::Success(value),
        Err(err) => FetchResult::Failure(FetchFailure::network(format!(
            "HTTP {} body was not valid json: {err}",
            status.as_u16()
        ))),
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Fetcher construction errors.
#[derive(Debug, Error)]
pub enum FetcherError {
    /// The configured base URL failed to parse.
    #[error("invalid analytics base url")]
    InvalidBaseUrl,
    /// The HTTP client could not be created.
    #[error("http client build failed")]
    ClientBuild,
}

// ============================================================================
// SECTION: Tests
// ============================================================================
