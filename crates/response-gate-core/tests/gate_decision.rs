// response-gate-core/tests/gate_decision.rs
// ============================================================================
// Module: Gate Decision Tests
// Description: Decision-table coverage for the sanitization gate.
// Purpose: Validate approval, denial, fail-open resolution, and leak freedom.
// Dependencies: response-gate-core
// ============================================================================

//! ## Overview
//! Walks the full decision table: unconditional approvals (`NoToken`,
//! `Passed`), the unconditional denial (`Blocked`), and the three
//! policy-resolved outcomes under both fail-open and fail-closed. Also checks
//! that denied decisions never leak payload bytes and that approval messages
//! never carry a foreign denial reason.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use response_gate_core::ClassificationOutcome;
use response_gate_core::GatePolicy;
use response_gate_core::decide;
use response_gate_core::gate::MSG_BLOCKED;
use response_gate_core::gate::REASON_INVALID_TOKEN;
use response_gate_core::gate::REASON_TIMEOUT;
use response_gate_core::gate::REASON_UNAVAILABLE;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// Payload marker that appears in no gate message constant.
const PAYLOAD: &str = "ZX-SENSITIVE-PAYLOAD-7741";

/// Outcomes whose verdict is controlled by the fail-open flag.
const POLICY_RESOLVED: [ClassificationOutcome; 3] = [
    ClassificationOutcome::InvalidToken,
    ClassificationOutcome::Unavailable,
    ClassificationOutcome::Timeout,
];

// ============================================================================
// SECTION: Unconditional Rows
// ============================================================================

/// Scenario A: no classifier token set approves with an explicit notice.
#[test]
fn no_token_approves_with_unchecked_notice() {
    let decision =
        decide(ClassificationOutcome::NoToken, GatePolicy::new(false), PAYLOAD.to_string());
    assert!(decision.approved());
    assert!(decision.message().contains("not configured"));
    assert_eq!(decision.payload(), Some(PAYLOAD));
}

/// Scenario B: a passing classification approves and includes the payload.
#[test]
fn passed_approves_with_payload() {
    let decision =
        decide(ClassificationOutcome::Passed, GatePolicy::new(false), PAYLOAD.to_string());
    assert!(decision.approved());
    assert!(decision.message().contains("passed"));
    assert_eq!(decision.payload(), Some(PAYLOAD));
}

/// Scenario C: a blocking classification denies and withholds the payload.
#[test]
fn blocked_denies_and_withholds_payload() {
    let decision =
        decide(ClassificationOutcome::Blocked, GatePolicy::new(false), PAYLOAD.to_string());
    assert!(!decision.approved());
    assert!(decision.message().contains("blocked"));
    assert!(decision.payload().is_none());
}

/// The blocked row ignores fail-open entirely.
#[test]
fn blocked_is_not_overridable_by_fail_open() {
    for fail_open in [false, true] {
        let decision = decide(
            ClassificationOutcome::Blocked,
            GatePolicy::new(fail_open),
            PAYLOAD.to_string(),
        );
        assert!(!decision.approved());
        assert!(decision.payload().is_none());
    }
}

// ============================================================================
// SECTION: Policy-Resolved Rows
// ============================================================================

/// Scenario D: unavailability under fail-closed denies.
#[test]
fn unavailable_fail_closed_denies() {
    let decision =
        decide(ClassificationOutcome::Unavailable, GatePolicy::new(false), PAYLOAD.to_string());
    assert!(!decision.approved());
    assert!(decision.payload().is_none());
}

/// Scenario E: unavailability under fail-open approves and says so.
#[test]
fn unavailable_fail_open_approves_and_states_fallback() {
    let decision =
        decide(ClassificationOutcome::Unavailable, GatePolicy::new(true), PAYLOAD.to_string());
    assert!(decision.approved());
    assert!(decision.message().contains("allowing data"));
    assert_eq!(decision.payload(), Some(PAYLOAD));
}

/// Approval for every policy-resolved outcome equals the flag exactly.
#[test]
fn policy_resolved_outcomes_track_the_flag() {
    for outcome in POLICY_RESOLVED {
        for fail_open in [false, true] {
            let decision = decide(outcome, GatePolicy::new(fail_open), PAYLOAD.to_string());
            assert_eq!(decision.approved(), fail_open, "outcome {outcome:?}");
            assert_eq!(decision.payload().is_some(), fail_open, "outcome {outcome:?}");
        }
    }
}

/// Policy-resolved denials name the reason for their own outcome only.
#[test]
fn denial_messages_bind_to_their_outcome() {
    let invalid = decide(
        ClassificationOutcome::InvalidToken,
        GatePolicy::new(false),
        PAYLOAD.to_string(),
    );
    let unavailable = decide(
        ClassificationOutcome::Unavailable,
        GatePolicy::new(false),
        PAYLOAD.to_string(),
    );
    let timeout =
        decide(ClassificationOutcome::Timeout, GatePolicy::new(false), PAYLOAD.to_string());
    assert!(invalid.message().contains(REASON_INVALID_TOKEN));
    assert!(!invalid.message().contains(REASON_UNAVAILABLE));
    assert!(!invalid.message().contains(REASON_TIMEOUT));
    assert!(unavailable.message().contains(REASON_UNAVAILABLE));
    assert!(!unavailable.message().contains(REASON_TIMEOUT));
    assert!(timeout.message().contains(REASON_TIMEOUT));
    assert!(!timeout.message().contains(REASON_UNAVAILABLE));
}

// ============================================================================
// SECTION: Leak Freedom
// ============================================================================

/// Denied decisions contain zero bytes of the original payload.
#[test]
fn denied_decisions_never_leak_payload() {
    let all_outcomes = [
        ClassificationOutcome::NoToken,
        ClassificationOutcome::InvalidToken,
        ClassificationOutcome::Passed,
        ClassificationOutcome::Blocked,
        ClassificationOutcome::Unavailable,
        ClassificationOutcome::Timeout,
    ];
    for outcome in all_outcomes {
        for fail_open in [false, true] {
            let decision = decide(outcome, GatePolicy::new(fail_open), PAYLOAD.to_string());
            if !decision.approved() {
                assert!(decision.payload().is_none());
                assert!(!decision.message().contains(PAYLOAD));
            }
        }
    }
}

/// Approval messages never carry a foreign denial reason.
#[test]
fn approval_messages_never_contain_denial_text() {
    for outcome in [ClassificationOutcome::NoToken, ClassificationOutcome::Passed] {
        let decision = decide(outcome, GatePolicy::new(false), PAYLOAD.to_string());
        assert!(decision.approved());
        assert!(!decision.message().contains(MSG_BLOCKED));
        assert!(!decision.message().contains(REASON_INVALID_TOKEN));
        assert!(!decision.message().contains(REASON_UNAVAILABLE));
        assert!(!decision.message().contains(REASON_TIMEOUT));
    }
}
