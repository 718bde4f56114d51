//! Correlation (request id) header propagation.
//!
//! A correlation id is a single header name/value pair that follows a
//! request across hops. The gateway either reuses the id the client sent or
//! mints one; the builder then adds it downstream only if it is not already
//! there, so propagation is idempotent.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

/// A correlation header name and its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId {
    key: String,
    value: String,
}

impl CorrelationId {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The id carried by `headers` under `key`, if present and non-empty.
    pub fn from_headers(key: &str, headers: &HeaderMap) -> Option<Self> {
        headers
            .get(key)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(|v| Self::new(key, v))
    }

    /// Reuse the inbound id under `key`, or mint a new UUID v4 one.
    pub fn resolve(key: &str, headers: &HeaderMap) -> Self {
        Self::from_headers(key, headers).unwrap_or_else(|| {
            let id = Uuid::new_v4().to_string();
            tracing::debug!(key = %key, request_id = %id, "Generated correlation id");
            Self::new(key, id)
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Add the id to `headers` unless it is empty or a header with the same
    /// name already exists. Returns true if a header was added.
    pub fn apply(&self, headers: &mut HeaderMap) -> bool {
        if self.key.is_empty() || self.value.is_empty() {
            return false;
        }

        let (name, value) = match (
            HeaderName::from_bytes(self.key.as_bytes()),
            HeaderValue::from_str(&self.value),
        ) {
            (Ok(name), Ok(value)) => (name, value),
            _ => {
                tracing::warn!(key = %self.key, "Correlation id is not a valid header, skipping");
                return false;
            }
        };

        if headers.contains_key(&name) {
            return false;
        }

        headers.insert(name, value);
        true
    }
}
