// response-gate-cli/src/main.rs
// ============================================================================
// Module: Response Gate CLI
// Description: Command-line entry point for the gate server.
// Purpose: Load configuration, apply command-line overrides, and run the server.
// Dependencies: clap, response-gate-mcp, thiserror, tokio
// ============================================================================

//! ## Overview
//! The binary reads its configuration from `RESPONSE_GATE_`-prefixed
//! environment variables and starts the gated MCP server. Command-line flags
//! override the transport selection and bind address only; secrets always come
//! from the environment so they never appear in process listings. Errors print
//! to stderr and map to a non-zero exit code.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use response_gate_mcp::GateConfig;
use response_gate_mcp::GateMcpServer;
use response_gate_mcp::ServerTransport;
use thiserror::Error;

// ============================================================================
// SECTION: Command-Line Types
// ============================================================================

/// Response Gate: a gated MCP server for third-party analytics data.
#[derive(Debug, Parser)]
#[command(name = "response-gate", version, about)]
struct Cli {
    /// Selected subcommand.
    #[command(subcommand)]
    command: Command,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Run the gate server.
    Serve(ServeArgs),
}

/// Arguments for the `serve` subcommand.
#[derive(Debug, clap::Args)]
struct ServeArgs {
    /// Transport override: `stdio` or `http`.
    #[arg(long)]
    transport: Option<String>,

    /// Bind address override for the HTTP transport, e.g. `127.0.0.1:8999`.
    #[arg(long)]
    bind: Option<String>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Top-level CLI error.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable failure description.
    message: String,
}

impl CliError {
    /// Wraps a failure description.
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result alias for CLI operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Process entry point.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Parses arguments and dispatches the selected subcommand.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => command_serve(args).await,
    }
}

/// Runs the gate server until its transport shuts down.
async fn command_serve(args: ServeArgs) -> CliResult<ExitCode> {
    let mut config = GateConfig::from_env().map_err(|err| CliError::new(err.to_string()))?;
    apply_overrides(&mut config, &args)?;
    let server =
        GateMcpServer::from_config(config).map_err(|err| CliError::new(err.to_string()))?;
    server.serve().await.map_err(|err| CliError::new(err.to_string()))?;
    Ok(ExitCode::SUCCESS)
}

/// Applies command-line overrides to the loaded configuration.
fn apply_overrides(config: &mut GateConfig, args: &ServeArgs) -> CliResult<()> {
    if let Some(transport) = args.transport.as_deref() {
        config.transport = match transport {
            "stdio" => ServerTransport::Stdio,
            "http" => ServerTransport::Http,
            other => {
                return Err(CliError::new(format!(
                    "invalid transport '{other}': must be stdio or http"
                )));
            }
        };
    }
    if let Some(bind) = args.bind.as_deref() {
        config.bind = Some(bind.to_string());
    }
    if config.transport == ServerTransport::Http && config.bind.is_none() {
        return Err(CliError::new("bind address required for http transport"));
    }
    Ok(())
}

/// Prints an error to stderr and returns the failure exit code.
#[allow(clippy::print_stderr, reason = "CLI error reporting goes to stderr.")]
fn emit_error(message: &str) -> ExitCode {
    eprintln!("error: {message}");
    ExitCode::FAILURE
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

    use response_gate_mcp::GateConfig;
    use response_gate_mcp::ServerTransport;

    use super::ServeArgs;
    use super::apply_overrides;

    /// Builds a stdio configuration for override tests.
    fn stdio_config() -> GateConfig {
        GateConfig::from_lookup(|name| match name {
            "RESPONSE_GATE_API_TOKEN" => Some("secret".to_string()),
            "RESPONSE_GATE_API_BASE_URL" => Some("https://analytics.example.com".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn transport_override_switches_to_http() {
        let mut config = stdio_config();
        let args = ServeArgs {
            transport: Some("http".to_string()),
            bind: Some("127.0.0.1:8999".to_string()),
        };
        apply_overrides(&mut config, &args).unwrap();
        assert_eq!(config.transport, ServerTransport::Http);
        assert_eq!(config.bind.as_deref(), Some("127.0.0.1:8999"));
    }

    #[test]
    fn http_override_without_bind_is_rejected() {
        let mut config = stdio_config();
        let args = ServeArgs {
            transport: Some("http".to_string()),
            bind: None,
        };
        assert!(apply_overrides(&mut config, &args).is_err());
    }

    #[test]
    fn unknown_transport_is_rejected() {
        let mut config = stdio_config();
        let args = ServeArgs {
            transport: Some("websocket".to_string()),
            bind: None,
        };
        assert!(apply_overrides(&mut config, &args).is_err());
    }

    #[test]
    fn no_overrides_leave_config_unchanged() {
        let mut config = stdio_config();
        let args = ServeArgs {
            transport: None,
            bind: None,
        };
        apply_overrides(&mut config, &args).unwrap();
        assert_eq!(config.transport, ServerTransport::Stdio);
        assert_eq!(config.bind, None);
    }
}
