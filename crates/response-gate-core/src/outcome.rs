// response-gate-core/src/outcome.rs
// ============================================================================
// Module: Classification Outcomes
// Description: Outcome codes produced by the risk classifier client.
// Purpose: Provide an exhaustiveness-checked outcome type for gate decisions.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every classification attempt reduces to exactly one
//! [`ClassificationOutcome`]. Outcomes never carry payload data; they are
//! metadata about the check itself, so they are safe to log and audit.
//! Adding a variant is a compile-time-visible change everywhere the gate
//! matches on outcomes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default risk-score cutoff above which a payload is blocked.
///
/// The cutoff is a policy constant carried over from the original deployment;
/// it is overridable through configuration rather than tuned here.
pub const DEFAULT_BLOCK_THRESHOLD: f64 = 0.9;

// ============================================================================
// SECTION: Outcome Type
// ============================================================================

/// Outcome of a single classification attempt.
///
/// # Invariants
/// - Variants are stable for audit labeling.
/// - Outcomes never hold raw payload data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationOutcome {
    /// No classifier secret is configured; checking is disabled by the
    /// operator and no network call was made.
    NoToken,
    /// The classifier rejected the configured secret (HTTP 401/403).
    InvalidToken,
    /// The classifier scored the payload at or below the block threshold.
    Passed,
    /// The classifier scored the payload above the block threshold.
    Blocked,
    /// The classifier could not be consulted (non-auth HTTP failure,
    /// transport error, or an unusable response body).
    Unavailable,
    /// The classification request was aborted at the configured deadline.
    Timeout,
}

impl ClassificationOutcome {
    /// Maps a risk score to a scoring outcome using the given threshold.
    #[must_use]
    pub fn from_score(score: f64, threshold: f64) -> Self {
        if score > threshold { Self::Blocked } else { Self::Passed }
    }

    /// Returns a stable label for audit events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoToken => "no_token",
            Self::InvalidToken => "invalid_token",
            Self::Passed => "passed",
            Self::Blocked => "blocked",
            Self::Unavailable => "unavailable",
            Self::Timeout => "timeout",
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
