//! Error responses produced by the proxy itself.
//!
//! # Responsibilities
//! - Map pipeline errors to status codes and short plain-text bodies
//! - Optionally mark error responses as readable cross-origin
//!
//! # Design Decisions
//! - Bodies carry `ProxyError::public_reason`, never upstream or config detail
//! - Upstream responses are relayed untouched and never pass through here

use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};

use crate::error::ProxyError;

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), self.public_reason()).into_response()
    }
}

/// Render `err`, adding `Access-Control-Allow-Origin` when configured.
pub fn error_response(err: ProxyError, allow_origin: Option<&HeaderValue>) -> Response {
    let mut response = err.into_response();
    if let Some(origin) = allow_origin {
        response
            .headers_mut()
            .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
    }
    response
}
