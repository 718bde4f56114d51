//! Header pass-through policy.
//!
//! # Design Decisions
//! - Denylist, not allowlist: every header passes unless named here
//! - `host` is always denied; it is derived from the destination URI
//! - `content-type` never passes through; the builder sets it explicitly
//! - Names compare lower-cased, values are copied untouched

use std::collections::BTreeSet;

use axum::http::{header, HeaderMap};

use crate::observability::metrics;

/// Headers that are never copied from an inbound request.
const ALWAYS_UNSUPPORTED: &[&str] = &["host"];

/// The set of inbound headers that must not reach the downstream service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFilter {
    unsupported: BTreeSet<String>,
}

impl Default for HeaderFilter {
    fn default() -> Self {
        Self {
            unsupported: ALWAYS_UNSUPPORTED.iter().map(|h| h.to_string()).collect(),
        }
    }
}

impl HeaderFilter {
    /// Build a filter that also denies the given names.
    pub fn with_extra<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .fold(Self::default(), |filter, name| filter.deny(name.as_ref()))
    }

    /// Add a name to the denylist.
    pub fn deny(mut self, name: &str) -> Self {
        self.unsupported.insert(name.to_ascii_lowercase());
        self
    }

    /// Whether a header with this name may be copied downstream.
    pub fn is_supported(&self, name: &str) -> bool {
        !self.unsupported.contains(&name.to_ascii_lowercase())
    }

    /// Names currently denied, lower-cased and sorted.
    pub fn unsupported(&self) -> impl Iterator<Item = &str> {
        self.unsupported.iter().map(String::as_str)
    }

    /// Copy `inbound` into `outbound`, skipping `Content-Type` and every denied header.
    ///
    /// All values of a multi-valued header are appended in their original order.
    pub fn copy_into(&self, mut inbound: HeaderMap, outbound: &mut HeaderMap) {
        inbound.remove(header::CONTENT_TYPE);

        for name in inbound.keys() {
            if !self.is_supported(name.as_str()) {
                tracing::debug!(header = %name, "Dropping unsupported header");
                metrics::record_filtered_header(name.as_str());
                continue;
            }

            for value in inbound.get_all(name) {
                outbound.append(name.clone(), value.clone());
            }
        }
    }
}
