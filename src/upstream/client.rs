//! Forwarding client for the upstream.
//!
//! # Responsibilities
//! - Send the rewritten request over a pooled HTTP(S) connection
//! - Enforce connect and response deadlines
//! - Stream the upstream response back without buffering it, aborting the
//!   relay when the upstream body stalls past the write timeout
//!
//! # Design Decisions
//! - No retries; a failed round trip is reported once as 502 or 504
//! - Hop-by-hop headers are stripped in both directions
//! - The peer IP is appended to `X-Forwarded-For`
//! - Dropping the `forward` future aborts the in-flight upstream call

use std::error::Error as StdError;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Request, Response};
use bytes::Bytes;
use http_body_util::Full;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tower_http::timeout::TimeoutBody;

use crate::config::TimeoutConfig;
use crate::error::ProxyError;

const TCP_KEEPALIVE: Duration = Duration::from_secs(30);
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);
const POOL_MAX_IDLE_PER_HOST: usize = 100;

const X_FORWARDED_FOR: &str = "x-forwarded-for";

const HOP_BY_HOP: [&str; 9] = [
    "connection",
    "keep-alive",
    "proxy-connection",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

type HttpsClient = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

/// Pooled client used for every forwarded request.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct UpstreamClient {
    client: HttpsClient,
    response_timeout: Duration,
}

impl UpstreamClient {
    pub fn new(timeouts: &TimeoutConfig) -> Self {
        let mut http = HttpConnector::new();
        http.enforce_http(false);
        http.set_connect_timeout(Some(timeouts.connect()));
        http.set_keepalive(Some(TCP_KEEPALIVE));
        http.set_nodelay(true);

        let https = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .enable_http2()
            .wrap_connector(http);

        let client = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(POOL_IDLE_TIMEOUT)
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .build(https);

        Self {
            client,
            response_timeout: timeouts.write(),
        }
    }

    /// Send `req` upstream and hand back its response as-is.
    pub async fn forward(
        &self,
        mut req: Request<Full<Bytes>>,
        client_ip: &str,
    ) -> Result<Response<Body>, ProxyError> {
        strip_hop_by_hop(req.headers_mut());
        append_forwarded_for(req.headers_mut(), client_ip);

        let response =
            match tokio::time::timeout(self.response_timeout, self.client.request(req)).await {
                Ok(Ok(response)) => response,
                Ok(Err(e)) => return Err(ProxyError::UpstreamUnavailable(error_chain(&e))),
                Err(_) => return Err(ProxyError::UpstreamTimeout(self.response_timeout)),
            };

        let (mut parts, body) = response.into_parts();
        strip_hop_by_hop(&mut parts.headers);
        // Each gap between body frames gets the same budget as the head.
        let body = TimeoutBody::new(self.response_timeout, body);
        Ok(Response::from_parts(parts, Body::new(body)))
    }
}

/// Remove hop-by-hop headers, including any listed in `Connection`.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in &listed {
        headers.remove(name);
    }
    for name in HOP_BY_HOP {
        headers.remove(name);
    }
}

/// Append `client_ip` to any `X-Forwarded-For` chain already present.
pub fn append_forwarded_for(headers: &mut HeaderMap, client_ip: &str) {
    let prior: Vec<&str> = headers
        .get_all(X_FORWARDED_FOR)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();

    let chain = if prior.is_empty() {
        client_ip.to_string()
    } else {
        format!("{}, {}", prior.join(", "), client_ip)
    };

    match HeaderValue::from_str(&chain) {
        Ok(value) => {
            headers.insert(X_FORWARDED_FOR, value);
        }
        Err(e) => tracing::warn!(error = %e, "Dropping unrepresentable X-Forwarded-For"),
    }
}

fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
