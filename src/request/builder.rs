//! Downstream request assembly.
//!
//! # Build order
//! ```text
//! destination + query  → absolute URI        (MalformedUri)
//! body stream          → buffered bytes      (BodyRead)
//! content type         → explicit header
//! inbound headers      → filtered copy       (host, content-type dropped)
//! correlation id       → added if absent
//! inbound cookies      → jar for destination host
//! ```
//!
//! One builder per inbound request. `build` consumes it, so a builder that
//! failed cannot be reused.

use std::sync::Arc;
use std::time::Instant;

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderValue, Method, Request};

use crate::config::DownstreamConfig;
use crate::observability::metrics;
use crate::request::body::drain;
use crate::request::cookies::CookieJar;
use crate::request::correlation::CorrelationId;
use crate::request::error::RequestBuildError;
use crate::request::headers::HeaderFilter;
use crate::request::outbound::OutboundRequest;
use crate::request::query::{compose_uri, QueryString};

/// Read-only settings shared by every builder in a process.
#[derive(Debug, Clone, Default)]
pub struct BuildPolicy {
    /// Inbound headers that are never forwarded.
    pub header_filter: HeaderFilter,
    /// Ceiling for buffered bodies; `None` buffers whatever arrives.
    pub max_body_bytes: Option<usize>,
}

impl BuildPolicy {
    pub fn from_config(config: &DownstreamConfig) -> Self {
        Self {
            header_filter: HeaderFilter::with_extra(&config.headers.extra_unsupported),
            max_body_bytes: config.body.max_bytes,
        }
    }
}

/// Accumulates the pieces of a downstream request.
#[derive(Default)]
pub struct RequestBuilder {
    method: Option<Method>,
    destination: Option<String>,
    query: QueryString,
    body: Option<Body>,
    content_type: Option<Vec<u8>>,
    headers: Option<HeaderMap>,
    correlation_id: Option<CorrelationId>,
    cookies: Option<Vec<(String, String)>>,
    policy: Arc<BuildPolicy>,
}

impl std::fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("method", &self.method)
            .field("destination", &self.destination)
            .field("query", &self.query)
            .field("has_body", &self.body.is_some())
            .field(
                "content_type",
                &self.content_type.as_deref().map(String::from_utf8_lossy),
            )
            .field("headers", &self.headers)
            .field("correlation_id", &self.correlation_id)
            .field("cookies", &self.cookies.as_ref().map(Vec::len))
            .finish()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a shared policy instead of the built-in one.
    pub fn with_policy(mut self, policy: Arc<BuildPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// The resolved downstream base URL, without a query.
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<QueryString>) -> Self {
        self.query = query.into();
        self
    }

    /// Attach the inbound body stream.
    ///
    /// # Panics
    /// In debug builds, if a body is already attached. Release builds drop
    /// (and so close) the earlier stream.
    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        debug_assert!(self.body.is_none(), "request body attached twice");
        if self.body.is_some() {
            tracing::warn!("Request body attached twice, dropping the first stream");
        }
        self.body = Some(body.into());
        self
    }

    /// Explicit content type. An empty value counts as unset.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into().into_bytes()).filter(|ct| !ct.is_empty());
        self
    }

    /// Explicit content type as raw header bytes, forwarded byte for byte.
    pub fn with_content_type_value(mut self, content_type: HeaderValue) -> Self {
        self.content_type = Some(content_type.as_bytes().to_vec()).filter(|ct| !ct.is_empty());
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_cookies<I, N, V>(mut self, cookies: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        self.cookies = Some(
            cookies
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        );
        self
    }

    pub fn with_correlation_id(mut self, id: impl Into<Option<CorrelationId>>) -> Self {
        self.correlation_id = id.into();
        self
    }

    /// Finalize the downstream request.
    ///
    /// # Errors
    /// - `Configuration` if method or destination was never set
    /// - `MalformedUri` if destination + query is not an absolute URI with a host
    /// - `BodyRead` if the body stream fails or exceeds the policy ceiling
    pub async fn build(self) -> Result<OutboundRequest, RequestBuildError> {
        let start_time = Instant::now();
        let method_name = self.method.clone();
        let method = method_name.as_ref().map(metrics::method_label).unwrap_or("unset");

        let result = self.assemble().await;

        match &result {
            Ok(request) => {
                tracing::debug!(
                    method = %request.method(),
                    uri = %request.uri(),
                    headers = request.headers().len(),
                    cookies = request.cookies().len(),
                    body_bytes = request.body().len(),
                    "Downstream request built"
                );
                metrics::record_build(method, "ok", start_time);
            }
            Err(e) => {
                tracing::warn!(method = ?method_name, kind = e.kind(), error = %e, "Failed to build downstream request");
                metrics::record_build(method, e.kind(), start_time);
            }
        }

        result
    }

    async fn assemble(self) -> Result<OutboundRequest, RequestBuildError> {
        let RequestBuilder {
            method,
            destination,
            query,
            body,
            content_type,
            headers,
            correlation_id,
            cookies,
            policy,
        } = self;

        let method = method.ok_or(RequestBuildError::Configuration("method"))?;
        let destination = destination.ok_or(RequestBuildError::Configuration("destination"))?;

        let uri = compose_uri(&destination, &query)?;

        let bytes = match body {
            Some(body) => drain(body, policy.max_body_bytes).await?,
            None => Bytes::new(),
        };

        let mut request = Request::new(bytes);
        *request.method_mut() = method;
        *request.uri_mut() = uri;

        if let Some(content_type) = content_type {
            set_content_type(request.headers_mut(), &content_type);
        }

        if let Some(inbound) = headers {
            policy.header_filter.copy_into(inbound, request.headers_mut());
        }

        if let Some(id) = correlation_id {
            id.apply(request.headers_mut());
        }

        let mut jar = CookieJar::new();
        for (name, value) in cookies.unwrap_or_default() {
            jar.add(request.uri(), &name, &value);
        }

        Ok(OutboundRequest::new(request, jar))
    }
}

fn set_content_type(headers: &mut HeaderMap, content_type: &[u8]) {
    headers.remove(header::CONTENT_TYPE);
    match HeaderValue::from_bytes(content_type) {
        Ok(value) => {
            headers.insert(header::CONTENT_TYPE, value);
        }
        Err(_) => {
            tracing::warn!(
                content_type = %String::from_utf8_lossy(content_type),
                "Content type cannot be sent as a header, skipping"
            );
        }
    }
}
