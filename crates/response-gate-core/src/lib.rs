// response-gate-core/src/lib.rs
// ============================================================================
// Module: Response Gate Core Library
// Description: Public API surface for the Response Gate core.
// Purpose: Expose classification outcomes, gate policy, and the decision table.
// Dependencies: crate::{classifier, gate, outcome}
// ============================================================================

//! ## Overview
//! Response Gate core provides the sanitization gate that decides whether an
//! externally-sourced payload may be delivered to a language-model host. It is
//! transport-agnostic and pure: classification runs behind the
//! [`RiskClassifier`] seam, and [`decide`] maps an outcome plus policy to a
//! [`GateDecision`] deterministically.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod classifier;
pub mod gate;
pub mod outcome;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use classifier::RiskClassifier;
pub use classifier::StaticClassifier;
pub use gate::GateDecision;
pub use gate::GatePolicy;
pub use gate::decide;
pub use outcome::ClassificationOutcome;
pub use outcome::DEFAULT_BLOCK_THRESHOLD;
