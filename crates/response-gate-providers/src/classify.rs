// response-gate-providers/src/classify.rs
// ============================================================================
// Module: Risk Classifier Client
// Description: HTTP client for the external content-risk scoring model.
// Purpose: Reduce every classification attempt to one outcome code.
// Dependencies: response-gate-core, reqwest, tokio
// ============================================================================

//! ## Overview
//! The classifier client posts `{"inputs": <text>}` to the scoring endpoint
//! and reduces the result to a [`ClassificationOutcome`]. The configured
//! deadline is enforced with [`tokio::time::timeout`], which aborts the
//! in-flight request deterministically; dropping the future cancels the call,
//! so no timer outlives response delivery. Each call is stateless and is never
//! retried here; retry policy belongs to the caller.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use response_gate_core::ClassificationOutcome;
use response_gate_core::DEFAULT_BLOCK_THRESHOLD;
use response_gate_core::RiskClassifier;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::fetch::USER_AGENT;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default classification deadline in seconds.
pub const DEFAULT_CLASSIFIER_TIMEOUT_SECS: u64 = 10;

/// Default scoring endpoint (hosted Prompt Guard inference).
pub const DEFAULT_CLASSIFIER_URL: &str =
    "https://api-inference.huggingface.co/models/meta-llama/Llama-Prompt-Guard-2-86M";

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the classifier client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Scoring endpoint URL.
    pub url: String,
    /// Bearer secret; `None` disables classification entirely.
    pub token: Option<String>,
    /// Classification deadline in seconds.
    pub timeout_secs: u64,
    /// Risk-score cutoff above which payloads are blocked.
    pub block_threshold: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CLASSIFIER_URL.to_string(),
            token: None,
            timeout_secs: DEFAULT_CLASSIFIER_TIMEOUT_SECS,
            block_threshold: DEFAULT_BLOCK_THRESHOLD,
        }
    }
}

// ============================================================================
// SECTION: Response Shape
// ============================================================================

/// One label/score entry in the scoring response.
#[derive(Debug, Deserialize)]
struct ScoreEntry {
    /// Risk score in `[0, 1]`.
    score: f64,
}

/// Extracts the risk score from the nested-array response body.
///
/// The scoring model answers `[[{label, score}, {label, score}]]`; the second
/// entry of the first row carries the injection-risk score. Anything else is
/// unusable.
fn extract_score(rows: &[Vec<ScoreEntry>]) -> Option<f64> {
    let score = rows.first()?.get(1)?.score;
    if (0.0..=1.0).contains(&score) { Some(score) } else { None }
}

// ============================================================================
// SECTION: Classifier Client
// ============================================================================

/// HTTP client for the external risk classifier.
pub struct HttpClassifier {
    /// Classifier configuration, including the deadline and threshold.
    config: ClassifierConfig,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl HttpClassifier {
    /// Creates a new classifier client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError`] when the HTTP client cannot be created.
    pub fn new(config: ClassifierConfig) -> Result<Self, ClassifierError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|_| ClassifierError::ClientBuild)?;
        Ok(Self {
            config,
            client,
        })
    }

    /// Issues one scoring request and reduces the response to an outcome.
    ///
    /// Runs inside the caller's deadline; the deadline abort itself is handled
    /// in [`RiskClassifier::classify`].
    async fn request_score(&self, token: &str, payload: &str) -> ClassificationOutcome {
        let response = self
            .client
            .post(&self.config.url)
            .bearer_auth(token)
            .json(&json!({ "inputs": payload }))
            .send()
            .await;
        let response = match response {
            Ok(response) => response,
            Err(err) if err.is_timeout() => return ClassificationOutcome::Timeout,
            Err(_) => return ClassificationOutcome::Unavailable,
        };
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return ClassificationOutcome::InvalidToken;
        }
        if !status.is_success() {
            return ClassificationOutcome::Unavailable;
        }
        match response.json::<Vec<Vec<ScoreEntry>>>().await {
            Ok(rows) => extract_score(&rows).map_or(ClassificationOutcome::Unavailable, |score| {
                ClassificationOutcome::from_score(score, self.config.block_threshold)
            }),
            Err(_) => ClassificationOutcome::Unavailable,
        }
    }
}

#[async_trait]
impl RiskClassifier for HttpClassifier {
    async fn classify(&self, payload: &str) -> ClassificationOutcome {
        let Some(token) = self.config.token.as_deref() else {
            return ClassificationOutcome::NoToken;
        };
        let deadline = Duration::from_secs(self.config.timeout_secs);
        match tokio::time::timeout(deadline, self.request_score(token, payload)).await {
            Ok(outcome) => outcome,
            Err(_) => ClassificationOutcome::Timeout,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Classifier client construction errors.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The HTTP client could not be created.
    #[error("http client build failed")]
    ClientBuild,
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        reason = "Test-only panic-based assertions."
    )]

    use super::ScoreEntry;
    use super::extract_score;

    #[test]
    fn extract_score_reads_second_entry_of_first_row() {
        let rows = vec![vec![
            ScoreEntry {
                score: 0.02,
            },
            ScoreEntry {
                score: 0.97,
            },
        ]];
        assert_eq!(extract_score(&rows), Some(0.97));
    }

    #[test]
    fn extract_score_rejects_short_rows() {
        let rows = vec![vec![ScoreEntry {
            score: 0.5,
        }]];
        assert_eq!(extract_score(&rows), None);
        assert_eq!(extract_score(&[]), None);
    }

    #[test]
    fn extract_score_rejects_out_of_range_values() {
        let rows = vec![vec![
            ScoreEntry {
                score: 0.1,
            },
            ScoreEntry {
                score: 1.7,
            },
        ]];
        assert_eq!(extract_score(&rows), None);
    }
}
