//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every field has a default so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for downstream request construction.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DownstreamConfig {
    /// Header pass-through policy.
    pub headers: HeaderPolicyConfig,

    /// Inbound body handling.
    pub body: BodyConfig,

    /// Correlation header settings.
    pub request_id: RequestIdConfig,

    /// Outbound transport settings.
    pub transport: TransportConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Header pass-through policy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HeaderPolicyConfig {
    /// Header names never copied downstream, in addition to `host`.
    pub extra_unsupported: Vec<String>,
}

/// Inbound body handling.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BodyConfig {
    /// Upper bound for a buffered body in bytes. Unbounded when absent.
    pub max_bytes: Option<usize>,
}

/// Correlation header settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RequestIdConfig {
    /// Header carrying the correlation id (e.g. "LSRequestId").
    /// Propagation is disabled when absent.
    pub key: Option<String>,

    /// Mint a new id when the inbound request carries none.
    pub generate_when_missing: bool,
}

impl Default for RequestIdConfig {
    fn default() -> Self {
        Self {
            key: None,
            generate_when_missing: true,
        }
    }
}

/// Outbound transport settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Total time allowed for one downstream exchange, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
