// response-gate-mcp/src/tools.rs
// ============================================================================
// Module: Tool Dispatch
// Description: Routes tool calls through the fetch-classify-gate pipeline.
// Purpose: Ensure every upstream payload is gated before it reaches the host.
// Dependencies: response-gate-core, response-gate-providers, serde_json
// ============================================================================

//! ## Overview
//! The router owns the per-call pipeline: validate arguments against the
//! catalog, fetch once, classify the exact text that would be emitted, and let
//! the gate decide. A fetch failure short-circuits the pipeline: nothing is
//! classified, and the failure reports directly. `list_endpoints` is the one
//! ungated tool: its output derives from the local catalog, never from the
//! network.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use response_gate_core::GatePolicy;
use response_gate_core::RiskClassifier;
use response_gate_core::decide;
use response_gate_providers::ApiFetcher;
use response_gate_providers::FetchResult;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

use crate::audit::FetchFailureAuditEvent;
use crate::audit::GateAuditEvent;
use crate::audit::GateAuditSink;
use crate::audit::timestamp_ms;
use crate::catalog;
use crate::catalog::EndpointDescriptor;

// ============================================================================
// SECTION: Tool Definitions
// ============================================================================

/// Name of the ungated catalog-listing tool.
pub const LIST_ENDPOINTS_TOOL: &str = "list_endpoints";

/// Tool definition advertised through `tools/list`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ToolDefinition {
    /// Tool name.
    pub name: String,
    /// Tool description for clients.
    pub description: String,
    /// JSON schema for tool input.
    pub input_schema: Value,
}

// ============================================================================
// SECTION: Tool Router
// ============================================================================

/// Routes tool calls through the gated pipeline.
pub struct ToolRouter {
    /// Authenticated analytics fetcher.
    fetcher: ApiFetcher,
    /// Risk classifier consulted for every fetched payload.
    classifier: Arc<dyn RiskClassifier>,
    /// Fail-open policy applied by the gate.
    policy: GatePolicy,
    /// Destination for decision audit events.
    audit: Arc<dyn GateAuditSink>,
}

impl ToolRouter {
    /// Creates a router over the given pipeline components.
    pub fn new(
        fetcher: ApiFetcher,
        classifier: Arc<dyn RiskClassifier>,
        policy: GatePolicy,
        audit: Arc<dyn GateAuditSink>,
    ) -> Self {
        Self {
            fetcher,
            classifier,
            policy,
            audit,
        }
    }

    /// Lists every registered tool with its input schema.
    #[must_use]
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        let mut tools = Vec::with_capacity(catalog::ENDPOINTS.len() + 1);
        tools.push(ToolDefinition {
            name: LIST_ENDPOINTS_TOOL.to_string(),
            description: "List all available analytics endpoints with their descriptions."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": [],
                "additionalProperties": false,
            }),
        });
        for descriptor in catalog::ENDPOINTS {
            tools.push(ToolDefinition {
                name: descriptor.name.to_string(),
                description: descriptor.description.to_string(),
                input_schema: descriptor.input_schema(),
            });
        }
        tools
    }

    /// Handles one tool call, returning the host-visible response text.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError`] for unknown tools, invalid arguments, or
    /// serialization failures. Upstream and classifier failures are not
    /// errors; they resolve inside the pipeline to denial-shaped text.
    pub async fn handle_tool_call(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<String, ToolError> {
        if name == LIST_ENDPOINTS_TOOL {
            return list_endpoints_text();
        }
        let descriptor = catalog::find(name).ok_or(ToolError::UnknownTool)?;
        let params = catalog::collect_params(descriptor, &arguments)
            .map_err(|err| ToolError::InvalidParams(err.to_string()))?;
        match self.fetcher.fetch(descriptor.path, &params).await {
            FetchResult::Failure(failure) => {
                self.audit.record_fetch_failure(&FetchFailureAuditEvent {
                    event: "fetch_failure",
                    tool: descriptor.name.to_string(),
                    kind: failure.kind.as_str(),
                    status: failure.status,
                    timestamp_ms: timestamp_ms(),
                });
                Ok(failure.to_string())
            }
            FetchResult::Success(value) => self.gate_payload(descriptor, &value).await,
        }
    }

    /// Classifies and gates a fetched payload.
    ///
    /// The text handed to the classifier is byte-identical to the text an
    /// approval emits.
    async fn gate_payload(
        &self,
        descriptor: &EndpointDescriptor,
        value: &Value,
    ) -> Result<String, ToolError> {
        let serialized =
            serde_json::to_string_pretty(value).map_err(|_| ToolError::Serialization)?;
        let payload_bytes = serialized.len();
        let outcome = self.classifier.classify(&serialized).await;
        let decision = decide(outcome, self.policy, serialized);
        self.audit.record_gate(&GateAuditEvent {
            event: "gate_decision",
            tool: descriptor.name.to_string(),
            outcome: outcome.as_str(),
            approved: decision.approved(),
            fail_open: self.policy.fail_open,
            payload_bytes,
            timestamp_ms: timestamp_ms(),
        });
        let (_, message, payload) = decision.into_parts();
        Ok(match payload {
            Some(payload) => format!("{message}\n\n{payload}"),
            None => message,
        })
    }
}

/// Renders the catalog listing for `list_endpoints`.
fn list_endpoints_text() -> Result<String, ToolError> {
    let listing: Vec<Value> = catalog::ENDPOINTS
        .iter()
        .map(|descriptor| {
            json!({
                "name": descriptor.name,
                "path": descriptor.path,
                "description": descriptor.description,
            })
        })
        .collect();
    serde_json::to_string_pretty(&listing).map_err(|_| ToolError::Serialization)
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Tool routing errors.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool name not recognized.
    #[error("unknown tool")]
    UnknownTool,
    /// Tool arguments failed validation.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
    /// Tool payload serialization failed.
    #[error("serialization failure")]
    Serialization,
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

    use super::LIST_ENDPOINTS_TOOL;
    use super::list_endpoints_text;
    use crate::catalog;

    #[test]
    fn listing_names_every_catalog_entry() {
        let text = list_endpoints_text().unwrap();
        for descriptor in catalog::ENDPOINTS {
            assert!(text.contains(descriptor.name));
            assert!(text.contains(descriptor.path));
        }
    }

    #[test]
    fn listing_tool_name_is_not_a_catalog_entry() {
        assert!(catalog::find(LIST_ENDPOINTS_TOOL).is_none());
    }
}
