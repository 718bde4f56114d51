//! Downstream request construction for an API gateway.
//!
//! Turns an inbound client request plus a resolved destination URL into an
//! immutable outbound request: filtered headers, explicit content type,
//! buffered body, idempotent correlation header and a cookie jar re-homed to
//! the destination host.

pub mod config;
pub mod observability;
pub mod request;
pub mod transport;

pub use config::DownstreamConfig;
pub use request::{BuildPolicy, CorrelationId, OutboundRequest, RequestBuildError, RequestBuilder};
pub use transport::{HyperTransport, OutboundTransport};
