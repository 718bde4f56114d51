//! Inbound body buffering.
//!
//! The body is drained fully into memory before the downstream request is
//! built. Streaming pass-through would replace [`drain`] and nothing else.

use axum::body::{Body, Bytes};
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

use crate::observability::metrics;
use crate::request::error::RequestBuildError;

/// Wrap any async reader (file, socket half, stdin) as a request body.
pub fn from_reader<R>(reader: R) -> Body
where
    R: AsyncRead + Send + 'static,
{
    Body::from_stream(ReaderStream::new(reader))
}

/// Read `body` to the end, failing if it yields an error or more than `limit` bytes.
///
/// The body is consumed by value, so it is dropped (and the underlying
/// stream closed) before this returns, whatever the outcome.
pub async fn drain(body: Body, limit: Option<usize>) -> Result<Bytes, RequestBuildError> {
    let bytes = axum::body::to_bytes(body, limit.unwrap_or(usize::MAX))
        .await
        .map_err(RequestBuildError::BodyRead)?;

    metrics::record_body_size(bytes.len());
    Ok(bytes)
}
