//! Network-level helpers.
//!
//! # Data Flow
//! ```text
//! ConnectInfo<SocketAddr> (set by the listener)
//!     → peer.rs (bare IP literal for payload injection)
//! ```

pub mod peer;

pub use peer::extract_ip;
