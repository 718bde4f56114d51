//! Metrics emitted while constructing and dispatching downstream requests.
//!
//! # Metrics
//! - `downstream_requests_built_total` (counter): build attempts by method, outcome
//! - `downstream_request_build_duration_seconds` (histogram): time spent in `build`
//! - `downstream_request_body_bytes` (histogram): size of buffered bodies
//! - `downstream_headers_filtered_total` (counter): headers dropped by the denylist
//! - `downstream_dispatch_total` (counter): transport outcomes by status class

use std::time::Instant;

use axum::http::Method;
use metrics::{counter, histogram};

/// Label for `method`; extension methods collapse into "other".
pub fn method_label(method: &Method) -> &'static str {
    match method.as_str() {
        "GET" => "GET",
        "HEAD" => "HEAD",
        "POST" => "POST",
        "PUT" => "PUT",
        "DELETE" => "DELETE",
        "CONNECT" => "CONNECT",
        "OPTIONS" => "OPTIONS",
        "TRACE" => "TRACE",
        "PATCH" => "PATCH",
        _ => "other",
    }
}

/// Record the outcome of one `build` call.
///
/// `method` should come from [`method_label`].
pub fn record_build(method: &'static str, outcome: &'static str, start_time: Instant) {
    counter!(
        "downstream_requests_built_total",
        "method" => method,
        "outcome" => outcome
    )
    .increment(1);

    histogram!("downstream_request_build_duration_seconds")
        .record(start_time.elapsed().as_secs_f64());
}

/// Record the size of a drained request body.
pub fn record_body_size(bytes: usize) {
    histogram!("downstream_request_body_bytes").record(bytes as f64);
}

/// Record a header dropped by the unsupported-header policy.
pub fn record_filtered_header(name: &str) {
    counter!("downstream_headers_filtered_total", "header" => name.to_string()).increment(1);
}

/// Record a transport outcome ("2xx".."5xx", "error" or "timeout").
pub fn record_dispatch(outcome: &'static str) {
    counter!("downstream_dispatch_total", "outcome" => outcome).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_label_bounded() {
        assert_eq!(method_label(&Method::GET), "GET");
        assert_eq!(method_label(&Method::PATCH), "PATCH");

        for raw in ["PURGE", "MKCOL", "X-RANDOM-1234"] {
            let method = Method::from_bytes(raw.as_bytes()).unwrap();
            assert_eq!(method_label(&method), "other");
        }
    }
}
