// response-gate-mcp/src/audit.rs
// ============================================================================
// Module: Audit Events
// Description: Structured audit sink for gate and fetch outcomes.
// Purpose: Record every pipeline decision without leaking payload bytes.
// Dependencies: response-gate-core, serde, serde_json
// ============================================================================

//! ## Overview
//! Every dispatched tool call emits exactly one audit event: a gate event when
//! the pipeline reached a decision, or a fetch-failure event when the upstream
//! call short-circuited it. Events carry metadata only, such as the payload
//! size and never its content, so the audit stream stays safe to ship
//! anywhere. The
//! default sink writes JSON lines to stderr, keeping stdout free for the
//! stdio transport.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Event Types
// ============================================================================

/// Audit record for a completed gate decision.
#[derive(Debug, Clone, Serialize)]
pub struct GateAuditEvent {
    /// Event type tag.
    pub event: &'static str,
    /// Tool that produced the payload.
    pub tool: String,
    /// Classification outcome label.
    pub outcome: &'static str,
    /// Whether the gate approved delivery.
    pub approved: bool,
    /// Fail-open policy in effect.
    pub fail_open: bool,
    /// Size of the classified payload in bytes.
    pub payload_bytes: usize,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: u128,
}

/// Audit record for a fetch that never reached the gate.
#[derive(Debug, Clone, Serialize)]
pub struct FetchFailureAuditEvent {
    /// Event type tag.
    pub event: &'static str,
    /// Tool whose fetch failed.
    pub tool: String,
    /// Failure taxonomy label.
    pub kind: &'static str,
    /// HTTP status when the upstream answered.
    pub status: Option<u16>,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: u128,
}

/// Returns the current time as milliseconds since the Unix epoch.
#[must_use]
pub(crate) fn timestamp_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|elapsed| elapsed.as_millis()).unwrap_or(0)
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Destination for audit events.
pub trait GateAuditSink: Send + Sync {
    /// Records a gate decision event.
    fn record_gate(&self, event: &GateAuditEvent);

    /// Records a fetch failure event.
    fn record_fetch_failure(&self, event: &FetchFailureAuditEvent);
}

/// Audit sink that writes JSON lines to stderr.
pub struct StderrAuditSink;

#[allow(clippy::print_stderr, reason = "Stderr is the audit destination for this sink.")]
impl GateAuditSink for StderrAuditSink {
    fn record_gate(&self, event: &GateAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            eprintln!("{payload}");
        }
    }

    fn record_fetch_failure(&self, event: &FetchFailureAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            eprintln!("{payload}");
        }
    }
}

/// Audit sink that drops all events.
pub struct NoopAuditSink;

impl GateAuditSink for NoopAuditSink {
    fn record_gate(&self, _event: &GateAuditEvent) {}

    fn record_fetch_failure(&self, _event: &FetchFailureAuditEvent) {}
}

// ============================================================================
// SECTION: Tests
// ============================================================================
