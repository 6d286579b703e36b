//! Sentry store proxy library.
//!
//! Validates store submissions, injects the caller's IP into
//! `user.ip_address`, and forwards them to a fixed upstream.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod payload;
pub mod routing;
pub mod upstream;

pub use config::ProxyConfig;
pub use error::ProxyError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
