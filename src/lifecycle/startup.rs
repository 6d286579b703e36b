//! Startup banner and configuration summary.

use crate::config::ProxyConfig;
use crate::upstream::UpstreamTarget;

const BANNER: &str = r#"                _
               | |
 ___  ___ _ __ | |_ _ __ _   _ ______ _ __  _ __ _____  ___   _
/ __|/ _ \ '_ \| __| '__| | | |______| '_ \| '__/ _ \ \/ / | | |
\__ \  __/ | | | |_| |  | |_| |      | |_) | | | (_) >  <| |_| |
|___/\___|_| |_|\__|_|   \__, |      | .__/|_|  \___/_/\_\\__, |
                          __/ |      | |                   __/ |
                         |___/       |_|                  |___/
"#;

/// Print the banner to stdout and log the effective settings.
pub fn announce(config: &ProxyConfig, target: &UpstreamTarget) {
    println!("{BANNER}");
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        listen = %config.listener.bind_address,
        upstream = %target,
        read_timeout_secs = config.timeouts.read_secs,
        write_timeout_secs = config.timeouts.write_secs,
        connect_timeout_secs = config.timeouts.connect_secs,
        max_body_size = config.limits.max_body_size,
        error_allow_origin = ?config.cors.error_allow_origin,
        "Configuration loaded"
    );
}
