//! Outbound request construction.
//!
//! # Responsibilities
//! - Point the request at the upstream target (scheme, authority, `Host`)
//! - Keep the original path and query untouched
//! - Swap in the mutated body and recompute `Content-Length`
//!
//! # Design Decisions
//! - Builds a fresh request from the consumed inbound parts instead of
//!   patching fields in place; nothing of the inbound request survives
//! - Method and all other headers pass through; hop-by-hop cleanup is the
//!   forwarding client's job

use axum::http::{header, request::Parts, HeaderValue, Request, Uri};
use bytes::Bytes;
use http_body_util::Full;

use crate::error::ProxyError;
use crate::upstream::UpstreamTarget;

/// Build the upstream request from inbound `parts` and the mutated `body`.
pub fn rewrite(
    parts: Parts,
    target: &UpstreamTarget,
    body: Bytes,
) -> Result<Request<Full<Bytes>>, ProxyError> {
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    let uri = Uri::builder()
        .scheme(target.scheme())
        .authority(target.host())
        .path_and_query(path_and_query)
        .build()
        .map_err(|e| ProxyError::InvalidUpstreamConfiguration(e.to_string()))?;

    let host = HeaderValue::from_str(target.host())
        .map_err(|e| ProxyError::InvalidUpstreamConfiguration(e.to_string()))?;

    let mut headers = parts.headers;
    // The body now has a known length.
    headers.remove(header::TRANSFER_ENCODING);
    headers.insert(header::HOST, host);
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));

    let mut request = Request::new(Full::new(body));
    *request.method_mut() = parts.method;
    *request.uri_mut() = uri;
    *request.headers_mut() = headers;
    Ok(request)
}
