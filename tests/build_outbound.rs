//! End-to-end properties of downstream request construction.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, Method, Request};
use downstream_request::config::parse_config;
use downstream_request::{BuildPolicy, CorrelationId, RequestBuildError, RequestBuilder};

#[tokio::test]
async fn test_host_never_forwarded() {
    for host in ["host", "Host", "HOST"] {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::HeaderName::from_bytes(host.as_bytes()).unwrap(),
            HeaderValue::from_static("gateway.local"),
        );
        headers.insert(header::USER_AGENT, HeaderValue::from_static("curl/8"));

        let req = RequestBuilder::new()
            .with_method(Method::GET)
            .with_destination("http://svc.internal/")
            .with_headers(headers)
            .build()
            .await
            .unwrap();

        assert!(req.headers().get(header::HOST).is_none());
        assert_eq!(req.headers()[header::USER_AGENT], "curl/8");
    }
}

#[tokio::test]
async fn test_content_type_override_is_the_only_value() {
    let inbound = Request::builder()
        .method(Method::PUT)
        .uri("/items/1")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("<item/>"))
        .unwrap();

    let req = RequestBuilder::from_inbound(inbound)
        .with_content_type("application/xml")
        .with_destination("http://items.internal/items/1")
        .build()
        .await
        .unwrap();

    let values: Vec<_> = req.headers().get_all(header::CONTENT_TYPE).iter().collect();
    assert_eq!(values, vec!["application/xml"]);
}

#[tokio::test]
async fn test_correlation_id_idempotent_and_propagated() {
    let key = "LSRequestId";

    // Client already sent one: resolve reuses it and the builder keeps it.
    let inbound = Request::builder()
        .uri("/")
        .header(key, "client-supplied")
        .body(Body::empty())
        .unwrap();
    let id = CorrelationId::resolve(key, inbound.headers());
    let req = RequestBuilder::from_inbound(inbound)
        .with_destination("http://svc.internal/")
        .with_correlation_id(CorrelationId::new(key, "abc-123"))
        .build()
        .await
        .unwrap();
    assert_eq!(id.value(), "client-supplied");
    assert_eq!(req.headers().get_all("lsrequestid").iter().count(), 1);
    assert_eq!(req.headers()["lsrequestid"], "client-supplied");

    // No inbound id: the supplied one is added.
    let req = RequestBuilder::new()
        .with_method(Method::GET)
        .with_destination("http://svc.internal/")
        .with_correlation_id(CorrelationId::new(key, "abc-123"))
        .build()
        .await
        .unwrap();
    assert_eq!(req.headers()["lsrequestid"], "abc-123");
}

#[tokio::test]
async fn test_cookie_rehomed_to_destination() {
    let req = RequestBuilder::new()
        .with_method(Method::GET)
        .with_destination("https://svc.internal")
        .with_cookies([("session", "xyz")])
        .build()
        .await
        .unwrap();

    let cookies = req.cookies().cookies_for(req.uri());
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookies[0].name(), "session");
    assert_eq!(cookies[0].value(), "xyz");
    assert_eq!(cookies[0].domain(), "svc.internal");
}

#[tokio::test]
async fn test_body_round_trip_for_binary_payloads() {
    let payloads: Vec<Vec<u8>> = vec![
        Vec::new(),
        b"plain text".to_vec(),
        (0..=255u8).collect(),
        vec![0xAB; 256 * 1024],
    ];

    for payload in payloads {
        let req = RequestBuilder::new()
            .with_method(Method::POST)
            .with_destination("http://svc.internal/upload")
            .with_body(payload.clone())
            .build()
            .await
            .unwrap();
        assert_eq!(req.body().as_ref(), payload.as_slice());
    }
}

#[tokio::test]
async fn test_uri_composition() {
    let req = RequestBuilder::new()
        .with_method(Method::GET)
        .with_destination("http://down.stream/api")
        .with_query("?a=1&b=2")
        .build()
        .await
        .unwrap();
    assert_eq!(req.uri().to_string(), "http://down.stream/api?a=1&b=2");
}

#[tokio::test]
async fn test_policy_from_config_file_text() {
    let config = parse_config(
        r#"
        [headers]
        extra_unsupported = ["X-Internal-Token"]

        [body]
        max_bytes = 16
        "#,
    )
    .unwrap();
    let policy = Arc::new(BuildPolicy::from_config(&config));

    let mut headers = HeaderMap::new();
    headers.insert("x-internal-token", HeaderValue::from_static("secret"));
    headers.insert("x-tenant", HeaderValue::from_static("acme"));

    let req = RequestBuilder::new()
        .with_policy(policy.clone())
        .with_method(Method::POST)
        .with_destination("http://svc.internal/")
        .with_headers(headers)
        .with_body("small")
        .build()
        .await
        .unwrap();
    assert!(req.headers().get("x-internal-token").is_none());
    assert_eq!(req.headers()["x-tenant"], "acme");

    let err = RequestBuilder::new()
        .with_policy(policy)
        .with_method(Method::POST)
        .with_destination("http://svc.internal/")
        .with_body("this body is longer than sixteen bytes")
        .build()
        .await
        .unwrap_err();
    assert!(matches!(err, RequestBuildError::BodyRead(_)));
}
