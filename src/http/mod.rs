//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (peer address recorded)
//!     → server.rs (Axum setup, request-id + trace middleware)
//!     → routing gate (405 / 404)
//!     → body.rs (bounded read, 413 / 400)
//!     → net::peer + payload (client IP injected into user.ip_address)
//!     → rewrite.rs (upstream URI, Host, Content-Length)
//!     → upstream client (forward, stream response back)
//!     → response.rs (only for proxy-generated errors)
//! ```

pub mod body;
pub mod request;
pub mod response;
pub mod rewrite;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
