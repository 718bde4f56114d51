//! hyper-based outbound transport.

use std::time::Duration;

use axum::body::Body;
use axum::http::Response;
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::TransportConfig;
use crate::observability::metrics;
use crate::request::OutboundRequest;
use crate::transport::{OutboundTransport, TransportError};

/// Dispatches requests over a pooled hyper client.
#[derive(Clone)]
pub struct HyperTransport {
    client: Client<HttpConnector, Body>,
    timeout: Duration,
}

impl HyperTransport {
    pub fn new(config: &TransportConfig) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self {
            client,
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}

impl OutboundTransport for HyperTransport {
    async fn send(&self, request: OutboundRequest) -> Result<Response<Body>, TransportError> {
        let request = request.into_http_request();
        let method = request.method().clone();
        let uri = request.uri().to_string();

        tracing::debug!(method = %method, uri = %uri, "Dispatching downstream request");

        let response: Response<Incoming> = match tokio::time::timeout(self.timeout, self.client.request(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::error!(method = %method, uri = %uri, error = %e, "Downstream request failed");
                metrics::record_dispatch("error");
                return Err(TransportError::Client(e));
            }
            Err(_) => {
                tracing::warn!(method = %method, uri = %uri, timeout = ?self.timeout, "Downstream request timed out");
                metrics::record_dispatch("timeout");
                return Err(TransportError::Timeout(self.timeout));
            }
        };

        let status = response.status();
        metrics::record_dispatch(match status.as_u16() {
            100..=199 => "1xx",
            200..=299 => "2xx",
            300..=399 => "3xx",
            400..=499 => "4xx",
            _ => "5xx",
        });
        tracing::debug!(method = %method, uri = %uri, status = %status, "Downstream responded");

        let (parts, body) = response.into_parts();
        Ok(Response::from_parts(parts, Body::new(body)))
    }
}
