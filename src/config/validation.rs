//! Configuration validation.
//!
//! Serde handles syntax; this module checks the values make sense together.
//! Every problem is reported, not just the first one.

use axum::http::HeaderName;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::DownstreamConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("headers.extra_unsupported: `{0}` is not a valid header name")]
    InvalidHeaderName(String),

    #[error("request_id.key: `{0}` is not a valid header name")]
    InvalidRequestIdKey(String),

    #[error("body.max_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("transport.request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("observability.log_level: `{0}` is not a valid filter directive")]
    InvalidLogLevel(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &DownstreamConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for name in &config.headers.extra_unsupported {
        if HeaderName::from_bytes(name.as_bytes()).is_err() {
            errors.push(ValidationError::InvalidHeaderName(name.clone()));
        }
    }

    if let Some(key) = &config.request_id.key {
        if HeaderName::from_bytes(key.as_bytes()).is_err() {
            errors.push(ValidationError::InvalidRequestIdKey(key.clone()));
        }
    }

    if config.body.max_bytes == Some(0) {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if config.transport.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
