//! Downstream request inspector.
//!
//! Builds the request the gateway would send downstream for the given
//! inbound pieces, prints it as JSON and optionally dispatches it.
//!
//! ```text
//! downstream-request --method POST --destination http://orders.internal/v1/orders \
//!     --query '?page=2' -H 'Accept: application/json' --cookie session=xyz \
//!     --content-type application/json --body-file order.json --send
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::to_bytes;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method};
use clap::Parser;
use serde::Serialize;

use downstream_request::config::{load_config, DownstreamConfig};
use downstream_request::observability::logging;
use downstream_request::request::body::from_reader;
use downstream_request::{
    BuildPolicy, CorrelationId, HyperTransport, OutboundRequest, OutboundTransport, RequestBuilder,
};

#[derive(Parser)]
#[command(name = "downstream-request")]
#[command(about = "Build (and optionally send) the downstream request for an inbound request", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// HTTP method of the inbound request.
    #[arg(short, long, default_value = "GET")]
    method: String,

    /// Resolved downstream base URL.
    #[arg(short, long)]
    destination: String,

    /// Raw inbound query string, e.g. "?a=1&b=2".
    #[arg(short, long, default_value = "")]
    query: String,

    /// Inbound header as "Name: value". Repeatable.
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,

    /// Inbound cookie as "name=value". Repeatable.
    #[arg(long = "cookie")]
    cookies: Vec<String>,

    /// Content type of the inbound body.
    #[arg(long)]
    content_type: Option<String>,

    /// File streamed in as the inbound body.
    #[arg(long)]
    body_file: Option<PathBuf>,

    /// Correlation id value; generated when the key is configured and this is absent.
    #[arg(long)]
    request_id: Option<String>,

    /// Dispatch the request and print the response.
    #[arg(long)]
    send: bool,
}

/// JSON view of a built request.
#[derive(Serialize)]
struct Summary {
    method: String,
    uri: String,
    headers: Vec<(String, String)>,
    cookies: Vec<CookieSummary>,
    body_bytes: usize,
}

#[derive(Serialize)]
struct CookieSummary {
    name: String,
    value: String,
    domain: String,
    path: String,
}

impl From<&OutboundRequest> for Summary {
    fn from(request: &OutboundRequest) -> Self {
        Self {
            method: request.method().to_string(),
            uri: request.uri().to_string(),
            headers: request
                .headers()
                .iter()
                .map(|(k, v)| (k.to_string(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
                .collect(),
            cookies: request
                .cookies()
                .iter()
                .map(|c| CookieSummary {
                    name: c.name().to_string(),
                    value: c.value().to_string(),
                    domain: c.domain().to_string(),
                    path: c.path().to_string(),
                })
                .collect(),
            body_bytes: request.body().len(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => DownstreamConfig::default(),
    };
    logging::init(&config.observability.log_level);

    tracing::info!(
        extra_unsupported = ?config.headers.extra_unsupported,
        max_body_bytes = ?config.body.max_bytes,
        request_id_key = ?config.request_id.key,
        "Configuration loaded"
    );

    let headers = parse_headers(&cli.headers)?;
    let cookies = cli
        .cookies
        .iter()
        .filter_map(|c| c.split_once('='))
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()));

    let correlation_id = config.request_id.key.as_deref().and_then(|key| match &cli.request_id {
        Some(value) => Some(CorrelationId::new(key, value.clone())),
        None if config.request_id.generate_when_missing => {
            Some(CorrelationId::resolve(key, &headers))
        }
        None => CorrelationId::from_headers(key, &headers),
    });

    let mut builder = RequestBuilder::new()
        .with_policy(Arc::new(BuildPolicy::from_config(&config)))
        .with_method(Method::from_bytes(cli.method.to_ascii_uppercase().as_bytes())?)
        .with_destination(cli.destination.clone())
        .with_query(cli.query.clone())
        .with_headers(headers)
        .with_cookies(cookies)
        .with_correlation_id(correlation_id);

    if let Some(content_type) = &cli.content_type {
        builder = builder.with_content_type(content_type.clone());
    }
    if let Some(path) = &cli.body_file {
        let file = tokio::fs::File::open(path).await?;
        builder = builder.with_body(from_reader(file));
    }

    let request = builder.build().await?;
    println!("{}", serde_json::to_string_pretty(&Summary::from(&request))?);

    if cli.send {
        let transport = HyperTransport::new(&config.transport);
        let response = transport.send(request).await?;
        let status = response.status();
        let (parts, body) = response.into_parts();
        let body = to_bytes(body, usize::MAX).await?;

        eprintln!("{:?} {}", parts.version, status);
        for (name, value) in &parts.headers {
            eprintln!("{}: {}", name, String::from_utf8_lossy(value.as_bytes()));
        }
        println!("{}", String::from_utf8_lossy(&body));
    }

    Ok(())
}

fn parse_headers(raw: &[String]) -> Result<HeaderMap, Box<dyn std::error::Error>> {
    let mut headers = HeaderMap::new();
    for line in raw {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| format!("header `{line}` is not in \"Name: value\" form"))?;
        headers.append(
            HeaderName::from_bytes(name.trim().as_bytes())?,
            HeaderValue::from_str(value.trim())?,
        );
    }
    Ok(headers)
}
