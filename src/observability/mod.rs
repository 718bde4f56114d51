//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! request builder / transport produce:
//!     → tracing events (structured fields: method, uri, header, cookie)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr)
//!     → whatever metrics recorder the host process installs
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Metrics go through the `metrics` facade; without a recorder they cost nothing
//! - Filtered headers and cookies are logged by name only, never by value

pub mod logging;
pub mod metrics;
