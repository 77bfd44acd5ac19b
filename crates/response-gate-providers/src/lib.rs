// response-gate-providers/src/lib.rs
// ============================================================================
// Module: Response Gate Providers Library
// Description: Outbound HTTP clients for the gating pipeline.
// Purpose: Expose the analytics fetcher and the risk classifier client.
// Dependencies: response-gate-core, reqwest, tokio
// ============================================================================

//! ## Overview
//! Providers own the two outbound network calls of the pipeline: the
//! authenticated analytics fetch and the bounded classification request. Both
//! are total over their failure modes: the fetcher returns a structured
//! [`FetchResult`] and the classifier reduces every error to a
//! [`response_gate_core::ClassificationOutcome`], so callers compose them by
//! ordinary sequencing without exception paths.
//! Security posture: fetched bodies are untrusted model-visible text and must
//! pass the sanitization gate before delivery.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod classify;
pub mod fetch;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use classify::ClassifierConfig;
pub use classify::ClassifierError;
pub use classify::HttpClassifier;
pub use fetch::ApiFetcher;
pub use fetch::FetchFailure;
pub use fetch::FetchFailureKind;
pub use fetch::FetchResult;
pub use fetch::FetcherConfig;
pub use fetch::FetcherError;
pub use fetch::ParamValue;
