//! Downstream request construction subsystem.
//!
//! # Data Flow
//! ```text
//! inbound Request<Body>
//!     → inbound.rs (method, query, headers, cookies, body)
//!     → builder.rs (+ destination, correlation id, policy)
//!         → query.rs (absolute URI)
//!         → body.rs (drain into memory)
//!         → headers.rs (denylist copy)
//!         → correlation.rs (idempotent request id)
//!         → cookies.rs (jar for destination host)
//!     → outbound.rs (immutable OutboundRequest)
//!     → transport (dispatch)
//! ```
//!
//! # Design Decisions
//! - Builder is owned by one task and consumed by `build`; no locks
//! - Policy is shared read-only behind `Arc`
//! - Per-header and per-cookie anomalies are filtered and logged, never raised

pub mod body;
pub mod builder;
pub mod cookies;
pub mod correlation;
pub mod error;
pub mod headers;
pub mod inbound;
pub mod outbound;
pub mod query;

pub use builder::{BuildPolicy, RequestBuilder};
pub use cookies::{Cookie, CookieJar};
pub use correlation::CorrelationId;
pub use error::RequestBuildError;
pub use headers::HeaderFilter;
pub use outbound::OutboundRequest;
pub use query::QueryString;
