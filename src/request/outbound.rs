//! The finalized downstream request.

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, Method, Request, Uri};

use crate::request::cookies::CookieJar;

/// An immutable request ready for the outbound transport.
///
/// Produced once by [`RequestBuilder::build`](super::RequestBuilder::build)
/// and handed over by value; nothing mutates it afterwards.
#[derive(Debug)]
pub struct OutboundRequest {
    request: Request<Bytes>,
    cookies: CookieJar,
}

impl OutboundRequest {
    pub(crate) fn new(request: Request<Bytes>, cookies: CookieJar) -> Self {
        Self { request, cookies }
    }

    pub fn method(&self) -> &Method {
        self.request.method()
    }

    pub fn uri(&self) -> &Uri {
        self.request.uri()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.request.headers()
    }

    /// The buffered body; empty when the inbound request had none.
    pub fn body(&self) -> &Bytes {
        self.request.body()
    }

    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    /// Split into the HTTP message and its cookie jar.
    pub fn into_parts(self) -> (Request<Bytes>, CookieJar) {
        (self.request, self.cookies)
    }

    /// Convert into a request a hyper client can send.
    ///
    /// The jar is rendered into a `Cookie` header unless the message already
    /// carries one passed through from the inbound request.
    pub fn into_http_request(self) -> Request<Body> {
        let (mut request, cookies) = self.into_parts();

        if !request.headers().contains_key(header::COOKIE) {
            if let Some(value) = cookies.header_value(request.uri()) {
                request.headers_mut().insert(header::COOKIE, value);
            }
        }

        request.map(Body::from)
    }
}
