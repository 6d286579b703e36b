//! Error taxonomy for the store pipeline.
//!
//! Every variant is terminal for the request it belongs to. Only
//! `InvalidUpstreamConfiguration` is also fatal for the process, and only
//! when raised at startup.

use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;

/// Failures produced while handling a single store request.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("not found")]
    RouteNotFound,

    #[error("malformed peer address: {0:?}")]
    MalformedPeerAddress(String),

    #[error("failed to read request body: {0}")]
    BodyReadFailure(String),

    #[error("request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("invalid JSON body: {0}")]
    MalformedJsonBody(String),

    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("upstream did not respond within {0:?}")]
    UpstreamTimeout(Duration),

    #[error("invalid upstream configuration: {0}")]
    InvalidUpstreamConfiguration(String),
}

impl ProxyError {
    /// HTTP status reported to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::RouteNotFound => StatusCode::NOT_FOUND,
            ProxyError::MalformedPeerAddress(_)
            | ProxyError::BodyReadFailure(_)
            | ProxyError::MalformedJsonBody(_) => StatusCode::BAD_REQUEST,
            ProxyError::BodyTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ProxyError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            ProxyError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::InvalidUpstreamConfiguration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short reason safe to show to the caller.
    ///
    /// Unlike `Display`, this never includes upstream or configuration detail.
    pub fn public_reason(&self) -> &'static str {
        match self {
            ProxyError::MethodNotAllowed => "method not allowed",
            ProxyError::RouteNotFound => "not found",
            ProxyError::MalformedPeerAddress(_) => "invalid peer address",
            ProxyError::BodyReadFailure(_) => "failed to read request body",
            ProxyError::BodyTooLarge { .. } => "request body too large",
            ProxyError::MalformedJsonBody(_) => "invalid JSON body",
            ProxyError::UpstreamUnavailable(_) => "upstream unavailable",
            ProxyError::UpstreamTimeout(_) => "upstream timed out",
            ProxyError::InvalidUpstreamConfiguration(_) => "proxy misconfigured",
        }
    }

    /// Label used for the `outcome` metric dimension.
    pub fn outcome(&self) -> &'static str {
        match self {
            ProxyError::MethodNotAllowed => "method_not_allowed",
            ProxyError::RouteNotFound => "route_not_found",
            ProxyError::MalformedPeerAddress(_) => "malformed_peer",
            ProxyError::BodyReadFailure(_) => "body_read_failure",
            ProxyError::BodyTooLarge { .. } => "body_too_large",
            ProxyError::MalformedJsonBody(_) => "malformed_json",
            ProxyError::UpstreamUnavailable(_) => "upstream_unavailable",
            ProxyError::UpstreamTimeout(_) => "upstream_timeout",
            ProxyError::InvalidUpstreamConfiguration(_) => "invalid_upstream",
        }
    }
}
