//! Populating a builder from an inbound axum/hyper request.

use axum::body::Body;
use axum::http::{header, Request};

use crate::request::builder::RequestBuilder;
use crate::request::cookies::parse_cookie_header;

impl RequestBuilder {
    /// Take method, query, content type, headers, cookies and body from `request`.
    ///
    /// Destination and correlation id come from their own collaborators and
    /// are left unset.
    pub fn from_inbound(request: Request<Body>) -> Self {
        let (parts, body) = request.into_parts();

        let content_type = parts.headers.get(header::CONTENT_TYPE).cloned();
        let cookies = parse_cookie_header(&parts.headers);

        tracing::trace!(
            method = %parts.method,
            path = %parts.uri.path(),
            cookies = cookies.len(),
            "Reading inbound request"
        );

        let builder = RequestBuilder::new()
            .with_method(parts.method)
            .with_query(parts.uri.query().map(|q| format!("?{q}")).unwrap_or_default())
            .with_cookies(cookies)
            .with_headers(parts.headers)
            .with_body(body);

        match content_type {
            Some(value) => builder.with_content_type_value(value),
            None => builder,
        }
    }
}
