//! Admission predicate for the store endpoint.
//!
//! # Responsibilities
//! - Accept only `POST`
//! - Accept only paths of the form `/api/<digits>/store/`
//!
//! # Design Decisions
//! - Method is checked before path, so `GET /nope` is a 405
//! - Pattern compiled once, the gate is immutable and shared
//! - Evaluated before any body byte is read

use axum::http::{Method, StatusCode};
use regex::Regex;

use crate::error::ProxyError;

// `\d` would also match non-ASCII digits.
const STORE_PATH_PATTERN: &str = r"^/api/[0-9]+/store/$";

/// Outcome of [`RequestGate::admit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Allowed,
    Rejected {
        reason: &'static str,
        status: StatusCode,
    },
}

impl Admission {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Admission::Allowed)
    }

    /// Convert a rejection into the matching pipeline error.
    pub fn into_result(self) -> Result<(), ProxyError> {
        match self {
            Admission::Allowed => Ok(()),
            Admission::Rejected { status, .. } if status == StatusCode::METHOD_NOT_ALLOWED => {
                Err(ProxyError::MethodNotAllowed)
            }
            Admission::Rejected { .. } => Err(ProxyError::RouteNotFound),
        }
    }
}

/// Method and path gate in front of the pipeline.
#[derive(Debug, Clone)]
pub struct RequestGate {
    store_path: Regex,
}

impl RequestGate {
    pub fn new() -> Self {
        Self {
            store_path: Regex::new(STORE_PATH_PATTERN).expect("store path pattern is valid"),
        }
    }

    pub fn admit(&self, method: &Method, path: &str) -> Admission {
        if method != Method::POST {
            return Admission::Rejected {
                reason: "method not allowed",
                status: StatusCode::METHOD_NOT_ALLOWED,
            };
        }
        if !self.store_path.is_match(path) {
            return Admission::Rejected {
                reason: "not found",
                status: StatusCode::NOT_FOUND,
            };
        }
        Admission::Allowed
    }
}

impl Default for RequestGate {
    fn default() -> Self {
        Self::new()
    }
}
