// response-gate-core/src/gate.rs
// ============================================================================
// Module: Sanitization Gate
// Description: Decision table mapping classification outcomes to verdicts.
// Purpose: Decide approve/deny for externally-sourced payloads deterministically.
// Dependencies: crate::outcome
// ============================================================================

//! ## Overview
//! The gate translates a [`ClassificationOutcome`] plus operator policy into a
//! [`GateDecision`]. `Blocked` always denies; `NoToken` and `Passed` always
//! approve; the three unavailability outcomes follow the fail-open flag, and
//! their messages state which default was applied so the decision is auditable
//! from the message text alone.
//!
//! ## Invariants
//! - A denied decision never carries a payload.
//! - Denial messages are fixed constants and never derive from payload text.
//! - `Blocked` is never overridden by fail-open: fail-open applies to the
//!   inability to check, not to a positive detection.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::outcome::ClassificationOutcome;

// ============================================================================
// SECTION: Message Constants
// ============================================================================

/// Message for approvals when no classifier is configured.
pub const MSG_NO_TOKEN: &str =
    "risk classifier not configured; data returned unchecked";
/// Message for approvals after a passing classification.
pub const MSG_PASSED: &str = "risk classifier check passed; returning data";
/// Message for unconditional denials on a positive detection.
pub const MSG_BLOCKED: &str =
    "risk classifier blocked this response: potential prompt injection detected; data withheld";
/// Reason fragment for a rejected classifier secret.
pub const REASON_INVALID_TOKEN: &str = "risk classifier rejected the configured token";
/// Reason fragment for an unreachable classifier.
pub const REASON_UNAVAILABLE: &str = "risk classifier unreachable";
/// Reason fragment for a classification deadline abort.
pub const REASON_TIMEOUT: &str = "risk classifier exceeded its deadline";
/// Suffix appended when fail-open allows data through.
pub const SUFFIX_FAIL_OPEN: &str = "; fail-open policy applied - allowing data";
/// Suffix appended when fail-closed withholds data.
pub const SUFFIX_FAIL_CLOSED: &str = "; fail-closed policy applied - blocking data";

// ============================================================================
// SECTION: Policy
// ============================================================================

/// Operator policy consulted when the classifier cannot be checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GatePolicy {
    /// Allow data through when the classifier cannot be consulted.
    pub fail_open: bool,
}

impl GatePolicy {
    /// Creates a policy with the given fail-open flag.
    #[must_use]
    pub const fn new(fail_open: bool) -> Self {
        Self {
            fail_open,
        }
    }
}

// ============================================================================
// SECTION: Gate Decision
// ============================================================================

/// Verdict for one externally-sourced payload.
///
/// Fields are private so the no-payload-on-deny invariant holds by
/// construction: [`GateDecision::approve`] is the only way to attach a
/// payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDecision {
    /// Whether the payload may be delivered to the host.
    approved: bool,
    /// Outward-facing message describing the verdict.
    message: String,
    /// The serialized payload, present only on approval.
    payload: Option<String>,
}

impl GateDecision {
    /// Constructs an approval carrying the payload.
    #[must_use]
    pub fn approve(message: impl Into<String>, payload: String) -> Self {
        Self {
            approved: true,
            message: message.into(),
            payload: Some(payload),
        }
    }

    /// Constructs a denial; the payload is withheld unconditionally.
    #[must_use]
    pub fn deny(message: impl Into<String>) -> Self {
        Self {
            approved: false,
            message: message.into(),
            payload: None,
        }
    }

    /// Returns whether the payload was approved for delivery.
    #[must_use]
    pub const fn approved(&self) -> bool {
        self.approved
    }

    /// Returns the outward-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the approved payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    /// Consumes the decision into message and optional payload.
    #[must_use]
    pub fn into_parts(self) -> (bool, String, Option<String>) {
        (self.approved, self.message, self.payload)
    }
}

// ============================================================================
// SECTION: Decision Table
// ============================================================================

/// Decides whether a payload may be delivered, given its classification.
///
/// The match is exhaustive on purpose: a new outcome variant fails to compile
/// until this table accounts for it.
#[must_use]
pub fn decide(
    outcome: ClassificationOutcome,
    policy: GatePolicy,
    payload: String,
) -> GateDecision {
    match outcome {
        ClassificationOutcome::NoToken => GateDecision::approve(MSG_NO_TOKEN, payload),
        ClassificationOutcome::Passed => GateDecision::approve(MSG_PASSED, payload),
        ClassificationOutcome::Blocked => GateDecision::deny(MSG_BLOCKED),
        ClassificationOutcome::InvalidToken => {
            policy_fallback(REASON_INVALID_TOKEN, policy, payload)
        }
        ClassificationOutcome::Unavailable => policy_fallback(REASON_UNAVAILABLE, policy, payload),
        ClassificationOutcome::Timeout => policy_fallback(REASON_TIMEOUT, policy, payload),
    }
}

/// Resolves an inability-to-check outcome using the fail-open flag.
///
/// The message always names the default that was applied so operators can
/// audit the verdict without consulting configuration.
fn policy_fallback(reason: &str, policy: GatePolicy, payload: String) -> GateDecision {
    if policy.fail_open {
        GateDecision::approve(format!("{reason}{SUFFIX_FAIL_OPEN}"), payload)
    } else {
        GateDecision::deny(format!("{reason}{SUFFIX_FAIL_CLOSED}"))
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

    use super::GateDecision;
    use super::GatePolicy;
    use super::MSG_BLOCKED;
    use super::decide;
    use crate::outcome::ClassificationOutcome;

    #[test]
    fn deny_constructor_never_carries_payload() {
        let decision = GateDecision::deny("withheld");
        assert!(!decision.approved());
        assert!(decision.payload().is_none());
    }

    #[test]
    fn blocked_denies_even_when_fail_open() {
        let decision = decide(
            ClassificationOutcome::Blocked,
            GatePolicy::new(true),
            "payload".to_string(),
        );
        assert!(!decision.approved());
        assert_eq!(decision.message(), MSG_BLOCKED);
        assert!(decision.payload().is_none());
    }

    #[test]
    fn fail_open_message_names_the_applied_default() {
        let open = decide(
            ClassificationOutcome::Timeout,
            GatePolicy::new(true),
            "payload".to_string(),
        );
        assert!(open.message().contains("allowing data"));
        let closed = decide(
            ClassificationOutcome::Timeout,
            GatePolicy::new(false),
            "payload".to_string(),
        );
        assert!(closed.message().contains("blocking data"));
    }
}
