//! Cookie jar scoped to a downstream host.
//!
//! Inbound cookies arrive as bare name/value pairs. They are re-homed onto
//! the destination: domain is the destination host, path is `/`, and no other
//! attribute survives. The jar lives only as long as the one outbound call.

use std::collections::BTreeMap;

use axum::http::{header, HeaderMap, HeaderValue, Uri};

/// A cookie bound to a downstream host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    name: String,
    value: String,
    domain: String,
    path: String,
}

impl Cookie {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Cookies keyed by lower-cased destination host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    hosts: BTreeMap<String, Vec<Cookie>>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a cookie to the host of `uri`.
    ///
    /// Returns false (and stores nothing) when `uri` has no host or the
    /// name/value could not be sent in a `Cookie` header. A cookie with the
    /// same name on the same host is replaced.
    pub fn add(&mut self, uri: &Uri, name: &str, value: &str) -> bool {
        let Some(host) = uri.host() else {
            return false;
        };

        if !is_valid_name(name) || !is_valid_value(value) {
            tracing::debug!(cookie = %name, "Skipping cookie that cannot be forwarded");
            return false;
        }

        let domain = host.to_ascii_lowercase();
        let cookie = Cookie {
            name: name.to_string(),
            value: value.to_string(),
            domain: domain.clone(),
            path: "/".to_string(),
        };

        let cookies = self.hosts.entry(domain).or_default();
        match cookies.iter_mut().find(|c| c.name == cookie.name) {
            Some(existing) => *existing = cookie,
            None => cookies.push(cookie),
        }
        true
    }

    /// Cookies that would be sent to `uri`, in insertion order.
    pub fn cookies_for(&self, uri: &Uri) -> &[Cookie] {
        uri.host()
            .and_then(|host| self.hosts.get(&host.to_ascii_lowercase()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every cookie in the jar.
    pub fn iter(&self) -> impl Iterator<Item = &Cookie> {
        self.hosts.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.hosts.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the `Cookie` request header for `uri` (`a=1; b=2`).
    pub fn header_value(&self, uri: &Uri) -> Option<HeaderValue> {
        let cookies = self.cookies_for(uri);
        if cookies.is_empty() {
            return None;
        }

        let rendered = cookies
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ");
        HeaderValue::from_str(&rendered).ok()
    }
}

/// Extract name/value pairs from every `Cookie` header, in order.
///
/// Pairs without `=` or with an empty name are skipped.
pub fn parse_cookie_header(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), value.trim().to_string()))
        })
        .collect()
}

// RFC 6265 token: visible ASCII minus separators.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_graphic()
                && !matches!(
                    b,
                    b'(' | b')' | b'<' | b'>' | b'@' | b',' | b';' | b':' | b'\\' | b'"'
                        | b'/' | b'[' | b']' | b'?' | b'=' | b'{' | b'}'
                )
        })
}

// RFC 6265 cookie-value: cookie-octets, optionally wrapped in one pair of DQUOTEs.
fn is_valid_value(value: &str) -> bool {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);

    inner
        .bytes()
        .all(|b| b.is_ascii_graphic() && !matches!(b, b'"' | b';' | b',' | b'\\'))
}
