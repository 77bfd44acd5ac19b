// response-gate-mcp/src/lib.rs
// ============================================================================
// Module: Response Gate MCP Server Library
// Description: MCP server wiring for the gated analytics pipeline.
// Purpose: Expose the endpoint catalog as gated JSON-RPC tools.
// Dependencies: response-gate-core, response-gate-providers, axum, tokio
// ============================================================================

//! ## Overview
//! This crate assembles the pipeline behind the MCP surface: configuration
//! loading, the static endpoint catalog, the tool router that fetches and
//! gates every upstream response, payload-free audit events, and the stdio
//! and HTTP transports. Security posture: everything arriving from the
//! analytics API is untrusted model-visible text and passes through the
//! sanitization gate before it reaches a tool response.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod catalog;
pub mod config;
pub mod server;
pub mod tools;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::GateAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use catalog::EndpointDescriptor;
pub use config::ConfigError;
pub use config::GateConfig;
pub use config::ServerTransport;
pub use server::GateMcpServer;
pub use server::McpServerError;
pub use tools::ToolError;
pub use tools::ToolRouter;
