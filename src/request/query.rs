//! Query string handling and downstream URI composition.

use axum::http::Uri;
use url::Url;

use crate::request::error::RequestBuildError;

/// The query component of an inbound request.
///
/// Stored with its leading `?`; empty means "no query".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString(String);

impl QueryString {
    /// Wrap a raw query, with or without its leading `?`.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw.is_empty() || raw == "?" {
            Self(String::new())
        } else if raw.starts_with('?') {
            Self(raw)
        } else {
            Self(format!("?{raw}"))
        }
    }

    /// True when there is no query to append.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw value, including the leading `?`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The value as it may appear inside a URI.
    ///
    /// `#` would start a fragment, so it is escaped. Everything else is left
    /// to the URL parser.
    pub fn to_uri_component(&self) -> String {
        self.0.replace('#', "%23")
    }
}

impl From<&str> for QueryString {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for QueryString {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<Option<&str>> for QueryString {
    fn from(raw: Option<&str>) -> Self {
        raw.map(Self::new).unwrap_or_default()
    }
}

/// Concatenate the destination base with the query and parse the result.
///
/// The result must be an absolute URI with a host, since both the transport
/// and the cookie jar need an authority to work with.
pub fn compose_uri(destination: &str, query: &QueryString) -> Result<Uri, RequestBuildError> {
    let raw = format!("{}{}", destination, query.to_uri_component());

    let malformed = |reason: String| RequestBuildError::MalformedUri {
        uri: raw.clone(),
        reason,
    };

    let url = Url::parse(&raw).map_err(|e| malformed(e.to_string()))?;
    if !url.has_host() {
        return Err(malformed("missing host".to_string()));
    }
    // A fragment in the destination would swallow the query.
    if url.fragment().is_some() {
        return Err(malformed("destination carries a fragment".to_string()));
    }

    Uri::try_from(url.as_str()).map_err(|e| malformed(e.to_string()))
}
