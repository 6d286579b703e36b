//! Peer address handling.
//!
//! Splits the transport-reported `host:port` peer address into the bare IP
//! literal that gets injected into the event payload.

use std::net::SocketAddr;

use crate::error::ProxyError;

/// Extract the IP literal from a `host:port` peer address.
///
/// Accepts `203.0.113.5:54321` and `[2001:db8::1]:443`; anything else,
/// including an empty address, is `MalformedPeerAddress`.
pub fn extract_ip(peer: &str) -> Result<String, ProxyError> {
    peer.parse::<SocketAddr>()
        .map(|addr| addr.ip().to_string())
        .map_err(|_| ProxyError::MalformedPeerAddress(peer.to_string()))
}
