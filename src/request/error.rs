//! Errors raised while finalizing a downstream request.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failure modes of [`RequestBuilder::build`](super::RequestBuilder::build).
///
/// None of these are retryable with the same builder: `build` consumes it.
#[derive(Debug, Error)]
pub enum RequestBuildError {
    /// A required field was never set.
    #[error("request builder is missing its {0}")]
    Configuration(&'static str),

    /// Destination and query do not form an absolute URI with a host.
    #[error("malformed downstream uri `{uri}`: {reason}")]
    MalformedUri { uri: String, reason: String },

    /// The inbound body stream failed (or exceeded the size ceiling) while draining.
    #[error("failed to read inbound request body: {0}")]
    BodyRead(#[source] axum::Error),
}

impl RequestBuildError {
    /// Stable label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RequestBuildError::Configuration(_) => "configuration",
            RequestBuildError::MalformedUri { .. } => "malformed_uri",
            RequestBuildError::BodyRead(_) => "body_read",
        }
    }

    /// Status a gateway should answer the client with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestBuildError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RequestBuildError::MalformedUri { .. } => StatusCode::BAD_GATEWAY,
            RequestBuildError::BodyRead(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for RequestBuildError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!(kind = self.kind(), error = %self, "Downstream request rejected");
        (status, status.canonical_reason().unwrap_or("Gateway error")).into_response()
    }
}
