// response-gate-mcp/src/config.rs
// ============================================================================
// Module: Configuration
// Description: Environment-based configuration for the gate server.
// Purpose: Load and validate all pipeline settings once at startup.
// Dependencies: response-gate-core, response-gate-providers, url
// ============================================================================

//! ## Overview
//! Configuration is read once from `RESPONSE_GATE_`-prefixed environment
//! variables and is immutable afterwards. Loading fails closed: a malformed
//! value is a startup error, never a silent default. The fail-open flag
//! defaults to `false`, so classifier degradation blocks data unless the
//! operator opts out explicitly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use response_gate_core::DEFAULT_BLOCK_THRESHOLD;
use response_gate_providers::classify::DEFAULT_CLASSIFIER_TIMEOUT_SECS;
use response_gate_providers::classify::DEFAULT_CLASSIFIER_URL;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable holding the analytics API secret.
pub(crate) const ENV_API_TOKEN: &str = "RESPONSE_GATE_API_TOKEN";
/// Environment variable holding the analytics API base URL.
pub(crate) const ENV_API_BASE_URL: &str = "RESPONSE_GATE_API_BASE_URL";
/// Environment variable holding the classifier secret.
pub(crate) const ENV_CLASSIFIER_TOKEN: &str = "RESPONSE_GATE_CLASSIFIER_TOKEN";
/// Environment variable overriding the classifier endpoint URL.
pub(crate) const ENV_CLASSIFIER_URL: &str = "RESPONSE_GATE_CLASSIFIER_URL";
/// Environment variable selecting the fail-open policy.
pub(crate) const ENV_FAIL_OPEN: &str = "RESPONSE_GATE_FAIL_OPEN";
/// Environment variable overriding the classification deadline.
pub(crate) const ENV_CLASSIFIER_TIMEOUT_SECS: &str = "RESPONSE_GATE_CLASSIFIER_TIMEOUT_SECS";
/// Environment variable overriding the block threshold.
pub(crate) const ENV_BLOCK_THRESHOLD: &str = "RESPONSE_GATE_BLOCK_THRESHOLD";
/// Environment variable selecting the server transport.
pub(crate) const ENV_TRANSPORT: &str = "RESPONSE_GATE_TRANSPORT";
/// Environment variable holding the HTTP bind address.
pub(crate) const ENV_BIND: &str = "RESPONSE_GATE_BIND";
/// Environment variable overriding the maximum request body size.
pub(crate) const ENV_MAX_BODY_BYTES: &str = "RESPONSE_GATE_MAX_BODY_BYTES";

/// Minimum allowed classification deadline in seconds.
pub(crate) const MIN_CLASSIFIER_TIMEOUT_SECS: u64 = 1;
/// Maximum allowed classification deadline in seconds.
pub(crate) const MAX_CLASSIFIER_TIMEOUT_SECS: u64 = 120;
/// Default maximum request body size in bytes.
pub(crate) const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;
/// Maximum allowed request body size in bytes.
pub(crate) const MAX_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Server transport selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerTransport {
    /// JSON-RPC over stdin/stdout with Content-Length framing.
    Stdio,
    /// JSON-RPC over HTTP POST `/rpc`.
    Http,
}

/// Response Gate server configuration.
///
/// # Invariants
/// - Loaded once at startup; read-only afterwards.
/// - All fields passed validation at load time.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Analytics API secret sent as the token header.
    pub api_token: String,
    /// Analytics API base URL, fixed for the process lifetime.
    pub api_base_url: String,
    /// Classifier secret; `None` disables classification.
    pub classifier_token: Option<String>,
    /// Classifier scoring endpoint URL.
    pub classifier_url: String,
    /// Classification deadline in seconds.
    pub classifier_timeout_secs: u64,
    /// Risk-score cutoff above which payloads are blocked.
    pub block_threshold: f64,
    /// Whether classifier degradation allows data through.
    pub fail_open: bool,
    /// Selected server transport.
    pub transport: ServerTransport,
    /// HTTP bind address, required for the HTTP transport.
    pub bind: Option<String>,
    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl GateConfig {
    /// Loads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or any
    /// value fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or any
    /// value fails validation.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_token = require(&lookup, ENV_API_TOKEN)?;
        let api_base_url = require(&lookup, ENV_API_BASE_URL)?;
        validate_http_url(ENV_API_BASE_URL, &api_base_url)?;
        let classifier_token = lookup(ENV_CLASSIFIER_TOKEN).filter(|token| !token.is_empty());
        let classifier_url =
            lookup(ENV_CLASSIFIER_URL).unwrap_or_else(|| DEFAULT_CLASSIFIER_URL.to_string());
        validate_http_url(ENV_CLASSIFIER_URL, &classifier_url)?;
        let classifier_timeout_secs = parse_bounded(
            &lookup,
            ENV_CLASSIFIER_TIMEOUT_SECS,
            DEFAULT_CLASSIFIER_TIMEOUT_SECS,
            MIN_CLASSIFIER_TIMEOUT_SECS,
            MAX_CLASSIFIER_TIMEOUT_SECS,
        )?;
        let block_threshold = parse_threshold(&lookup)?;
        let fail_open = parse_bool(&lookup, ENV_FAIL_OPEN, false)?;
        let transport = parse_transport(&lookup)?;
        let bind = lookup(ENV_BIND).filter(|bind| !bind.is_empty());
        if transport == ServerTransport::Http && bind.is_none() {
            return Err(ConfigError::Invalid {
                var: ENV_BIND.to_string(),
                reason: "bind address required for http transport".to_string(),
            });
        }
        let max_body_bytes = parse_body_limit(&lookup)?;
        Ok(Self {
            api_token,
            api_base_url,
            classifier_token,
            classifier_url,
            classifier_timeout_secs,
            block_threshold,
            fail_open,
            transport,
            bind,
            max_body_bytes,
        })
    }
}

// ============================================================================
// SECTION: Parsing Helpers
// ============================================================================

/// Reads a required, non-empty variable.
fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
) -> Result<String, ConfigError> {
    lookup(var)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ConfigError::Missing(var.to_string()))
}

/// Validates that a value parses as an http or https URL.
fn validate_http_url(var: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|_| ConfigError::Invalid {
        var: var.to_string(),
        reason: "not a valid url".to_string(),
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Invalid {
            var: var.to_string(),
            reason: "scheme must be http or https".to_string(),
        });
    }
    Ok(())
}

/// Parses an integer variable with a default and inclusive bounds.
fn parse_bounded(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
    default: u64,
    min: u64,
    max: u64,
) -> Result<u64, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    let value = raw.parse::<u64>().map_err(|_| ConfigError::Invalid {
        var: var.to_string(),
        reason: "not an unsigned integer".to_string(),
    })?;
    if !(min..=max).contains(&value) {
        return Err(ConfigError::Invalid {
            var: var.to_string(),
            reason: format!("must be between {min} and {max}"),
        });
    }
    Ok(value)
}

/// Parses the block threshold, constrained to `(0, 1]`.
fn parse_threshold(lookup: &impl Fn(&str) -> Option<String>) -> Result<f64, ConfigError> {
    let Some(raw) = lookup(ENV_BLOCK_THRESHOLD) else {
        return Ok(DEFAULT_BLOCK_THRESHOLD);
    };
    let value = raw.parse::<f64>().map_err(|_| ConfigError::Invalid {
        var: ENV_BLOCK_THRESHOLD.to_string(),
        reason: "not a number".to_string(),
    })?;
    if !(value > 0.0 && value <= 1.0) {
        return Err(ConfigError::Invalid {
            var: ENV_BLOCK_THRESHOLD.to_string(),
            reason: "must be greater than 0 and at most 1".to_string(),
        });
    }
    Ok(value)
}

/// Parses a strict boolean variable with a default.
fn parse_bool(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
    default: bool,
) -> Result<bool, ConfigError> {
    match lookup(var).as_deref() {
        None => Ok(default),
        Some("true" | "1") => Ok(true),
        Some("false" | "0") => Ok(false),
        Some(_) => Err(ConfigError::Invalid {
            var: var.to_string(),
            reason: "must be true, false, 1, or 0".to_string(),
        }),
    }
}

/// Parses the transport selection.
fn parse_transport(
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<ServerTransport, ConfigError> {
    match lookup(ENV_TRANSPORT).as_deref() {
        None | Some("stdio") => Ok(ServerTransport::Stdio),
        Some("http") => Ok(ServerTransport::Http),
        Some(_) => Err(ConfigError::Invalid {
            var: ENV_TRANSPORT.to_string(),
            reason: "must be stdio or http".to_string(),
        }),
    }
}

/// Parses the maximum request body size.
fn parse_body_limit(lookup: &impl Fn(&str) -> Option<String>) -> Result<usize, ConfigError> {
    let default = u64::try_from(DEFAULT_MAX_BODY_BYTES).unwrap_or(u64::MAX);
    let max = u64::try_from(MAX_MAX_BODY_BYTES).unwrap_or(u64::MAX);
    let value = parse_bounded(lookup, ENV_MAX_BODY_BYTES, default, 1, max)?;
    usize::try_from(value).map_err(|_| ConfigError::Invalid {
        var: ENV_MAX_BODY_BYTES.to_string(),
        reason: "does not fit in usize".to_string(),
    })
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required variable absent or empty.
    #[error("missing required environment variable: {0}")]
    Missing(String),
    /// Variable present but unusable.
    #[error("invalid value for {var}: {reason}")]
    Invalid {
        /// Variable name.
        var: String,
        /// Validation failure description.
        reason: String,
    },
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
        clippy::float_cmp,
        reason = "Test-only panic-based assertions."
    )]

    use std::collections::HashMap;

    use super::ConfigError;
    use super::GateConfig;
    use super::ServerTransport;

    /// Builds a lookup closure over the given variable map.
    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| map.get(name).map(|value| (*value).to_string())
    }

    /// Minimal valid variable set.
    fn base_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            ("RESPONSE_GATE_API_TOKEN", "secret"),
            ("RESPONSE_GATE_API_BASE_URL", "https://analytics.example.com"),
        ]
    }

    #[test]
    fn minimal_config_uses_documented_defaults() {
        let vars = base_vars();
        let config = GateConfig::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.classifier_token, None);
        assert_eq!(config.classifier_timeout_secs, 10);
        assert_eq!(config.block_threshold, 0.9);
        assert!(!config.fail_open);
        assert_eq!(config.transport, ServerTransport::Stdio);
        assert_eq!(config.max_body_bytes, 1024 * 1024);
    }

    #[test]
    fn missing_api_token_is_a_startup_error() {
        let vars = vec![("RESPONSE_GATE_API_BASE_URL", "https://analytics.example.com")];
        let err = GateConfig::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(var) if var == "RESPONSE_GATE_API_TOKEN"));
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let mut vars = base_vars();
        vars[1] = ("RESPONSE_GATE_API_BASE_URL", "ftp://analytics.example.com");
        assert!(GateConfig::from_lookup(lookup_from(&vars)).is_err());
    }

    #[test]
    fn malformed_fail_open_is_rejected_not_defaulted() {
        let mut vars = base_vars();
        vars.push(("RESPONSE_GATE_FAIL_OPEN", "yes"));
        assert!(GateConfig::from_lookup(lookup_from(&vars)).is_err());
    }

    #[test]
    fn fail_open_accepts_strict_booleans() {
        let mut vars = base_vars();
        vars.push(("RESPONSE_GATE_FAIL_OPEN", "true"));
        let config = GateConfig::from_lookup(lookup_from(&vars)).unwrap();
        assert!(config.fail_open);
    }

    #[test]
    fn timeout_outside_bounds_is_rejected() {
        let mut vars = base_vars();
        vars.push(("RESPONSE_GATE_CLASSIFIER_TIMEOUT_SECS", "0"));
        assert!(GateConfig::from_lookup(lookup_from(&vars)).is_err());

        let mut vars = base_vars();
        vars.push(("RESPONSE_GATE_CLASSIFIER_TIMEOUT_SECS", "121"));
        assert!(GateConfig::from_lookup(lookup_from(&vars)).is_err());
    }

    #[test]
    fn threshold_outside_unit_interval_is_rejected() {
        let mut vars = base_vars();
        vars.push(("RESPONSE_GATE_BLOCK_THRESHOLD", "0"));
        assert!(GateConfig::from_lookup(lookup_from(&vars)).is_err());

        let mut vars = base_vars();
        vars.push(("RESPONSE_GATE_BLOCK_THRESHOLD", "1.5"));
        assert!(GateConfig::from_lookup(lookup_from(&vars)).is_err());
    }

    #[test]
    fn http_transport_requires_bind_address() {
        let mut vars = base_vars();
        vars.push(("RESPONSE_GATE_TRANSPORT", "http"));
        assert!(GateConfig::from_lookup(lookup_from(&vars)).is_err());

        vars.push(("RESPONSE_GATE_BIND", "127.0.0.1:8999"));
        let config = GateConfig::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.transport, ServerTransport::Http);
    }

    #[test]
    fn empty_classifier_token_means_no_token() {
        let mut vars = base_vars();
        vars.push(("RESPONSE_GATE_CLASSIFIER_TOKEN", ""));
        let config = GateConfig::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.classifier_token, None);
    }
}
