//! Outbound transport subsystem.
//!
//! # Responsibilities
//! - Accept a finished `OutboundRequest` and send it downstream
//! - Return the downstream response untouched
//!
//! # Design Decisions
//! - No retries and no response processing; other pipeline stages own those
//! - One request timeout per exchange, from configuration
//! - Plain HTTP only; TLS belongs to another stage

pub mod client;

use std::future::Future;

use axum::body::Body;
use axum::http::Response;
use thiserror::Error;

use crate::request::OutboundRequest;

pub use client::HyperTransport;

/// Errors that can occur while dispatching a downstream request.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection or protocol failure.
    #[error("downstream request failed: {0}")]
    Client(#[from] hyper_util::client::legacy::Error),

    /// No response within the configured deadline.
    #[error("downstream request timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Sends finished requests to the destination service.
pub trait OutboundTransport: Send + Sync {
    fn send(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = Result<Response<Body>, TransportError>> + Send;
}
