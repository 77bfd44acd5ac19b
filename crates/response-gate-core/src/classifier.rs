// response-gate-core/src/classifier.rs
// ============================================================================
// Module: Risk Classifier Interface
// Description: Async seam between the gate and classifier transports.
// Purpose: Keep the decision table testable with injected classifiers.
// Dependencies: async-trait, crate::outcome
// ============================================================================

//! ## Overview
//! The gate never talks to a classifier service directly; it consumes a
//! [`ClassificationOutcome`] produced behind this trait. Transport
//! implementations live in `response-gate-providers`; [`StaticClassifier`]
//! covers tests and local wiring.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;

use crate::outcome::ClassificationOutcome;

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Reduces a serialized payload to a classification outcome.
///
/// Implementations must be total: every failure mode maps to an outcome
/// variant, never to an error or panic. Each call is independent; no state
/// persists across calls.
#[async_trait]
pub trait RiskClassifier: Send + Sync {
    /// Classifies the exact text that would be shown to the model.
    async fn classify(&self, payload: &str) -> ClassificationOutcome;
}

// ============================================================================
// SECTION: Static Classifier
// ============================================================================

/// Classifier returning a fixed outcome for every payload.
pub struct StaticClassifier {
    /// Outcome returned on every call.
    outcome: ClassificationOutcome,
}

impl StaticClassifier {
    /// Creates a classifier that always returns `outcome`.
    #[must_use]
    pub const fn new(outcome: ClassificationOutcome) -> Self {
        Self {
            outcome,
        }
    }
}

#[async_trait]
impl RiskClassifier for StaticClassifier {
    async fn classify(&self, _payload: &str) -> ClassificationOutcome {
        self.outcome
    }
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
        reason = "Test-only panic-based assertions."
    )]

    use super::RiskClassifier;
    use super::StaticClassifier;
    use crate::outcome::ClassificationOutcome;

    #[tokio::test]
    async fn static_classifier_returns_fixed_outcome() {
        let classifier = StaticClassifier::new(ClassificationOutcome::Blocked);
        assert_eq!(classifier.classify("anything").await, ClassificationOutcome::Blocked);
        assert_eq!(classifier.classify("").await, ClassificationOutcome::Blocked);
    }
}
