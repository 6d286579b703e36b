//! Bounded request body capture.
//!
//! # Responsibilities
//! - Read an inbound body up to a hard byte ceiling
//! - Distinguish overflow (413) from transport failure (400)
//! - Reject early on an oversized declared `Content-Length`
//!
//! # Design Decisions
//! - The body is taken by value, so it is released exactly once on every
//!   exit path, including cancellation of the surrounding future
//! - Overflow is an error, never a silent truncation

use axum::http::{header, HeaderMap};
use bytes::Bytes;
use http_body::Body;
use http_body_util::{BodyExt, LengthLimitError, Limited};

use crate::error::ProxyError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Read `body` to the end, failing with `BodyTooLarge` past `limit` bytes.
pub async fn read_bounded<B>(body: B, limit: usize) -> Result<Bytes, ProxyError>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(err) if err.is::<LengthLimitError>() => Err(ProxyError::BodyTooLarge { limit }),
        Err(err) => Err(ProxyError::BodyReadFailure(err.to_string())),
    }
}

/// Reject a request whose declared `Content-Length` is already over `limit`.
///
/// A missing or unparseable header is left to [`read_bounded`].
pub fn check_declared_length(headers: &HeaderMap, limit: usize) -> Result<(), ProxyError> {
    let declared = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());

    match declared {
        Some(len) if len > limit as u64 => Err(ProxyError::BodyTooLarge { limit }),
        _ => Ok(()),
    }
}
