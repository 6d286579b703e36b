//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (method, path)
//!     → gate.rs (POST + /api/<digits>/store/ only)
//!     → Allowed, or Rejected with 404/405
//! ```
//!
//! # Design Decisions
//! - Single fixed route; no route table
//! - Gate compiled at startup, immutable at runtime

pub mod gate;

pub use gate::{Admission, RequestGate};
