//! Upstream target resolution.
//!
//! # Responsibilities
//! - Parse the configured upstream origin once at startup
//! - Keep only scheme and host (with an explicit port, if any)
//! - Reject anything the forwarding client cannot speak
//!
//! # Design Decisions
//! - No network access; this is pure parsing
//! - Immutable after construction and shared read-only across requests

use std::fmt;
use std::str::FromStr;

use axum::http::uri::Authority;
use url::Url;

use crate::error::ProxyError;

/// Origin every admitted request is forwarded to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    scheme: String,
    host: String,
}

impl UpstreamTarget {
    /// Parse and validate a configured upstream URL.
    ///
    /// Path, query, fragment and userinfo are discarded.
    pub fn resolve(raw: &str) -> Result<Self, ProxyError> {
        let url = Url::parse(raw.trim()).map_err(|e| {
            ProxyError::InvalidUpstreamConfiguration(format!("{raw:?}: {e}"))
        })?;

        let scheme = url.scheme().to_ascii_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(ProxyError::InvalidUpstreamConfiguration(format!(
                "{raw:?}: unsupported scheme {scheme:?}"
            )));
        }

        let host = match url.host_str() {
            Some(h) if !h.is_empty() => h,
            _ => {
                return Err(ProxyError::InvalidUpstreamConfiguration(format!(
                    "{raw:?}: missing host"
                )))
            }
        };
        let host = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        Authority::from_str(&host).map_err(|e| {
            ProxyError::InvalidUpstreamConfiguration(format!("{raw:?}: {e}"))
        })?;

        Ok(Self { scheme, host })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Host, including the port when one was given explicitly.
    pub fn host(&self) -> &str {
        &self.host
    }
}

impl FromStr for UpstreamTarget {
    type Err = ProxyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

impl fmt::Display for UpstreamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)
    }
}
