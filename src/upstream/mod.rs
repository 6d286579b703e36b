//! Upstream subsystem.
//!
//! # Data Flow
//! ```text
//! configured origin URL
//!     → target.rs (scheme + host, validated once at startup)
//!
//! rewritten request
//!     → client.rs (pooled HTTP/HTTPS round trip, deadlines)
//!     → streamed response back to the caller
//! ```

pub mod client;
pub mod target;

pub use client::UpstreamClient;
pub use target::UpstreamTarget;
