//! Command-line interface.
//!
//! Flags override values from the optional config file, which override the
//! built-in defaults. The merged result is validated once.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{read_config, ConfigError};
use crate::config::schema::ProxyConfig;
use crate::config::validation::validate_config;

#[derive(Debug, Default, Parser)]
#[command(name = "sentry-proxy")]
#[command(version, about = "Injects the client IP into Sentry store requests and forwards them upstream", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Upstream Sentry server
    #[arg(long, value_name = "URL")]
    pub upstream: Option<String>,

    /// Address to bind to
    #[arg(long, value_name = "ADDR")]
    pub listen: Option<String>,

    /// Read timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub read_timeout: Option<u64>,

    /// Write timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub write_timeout: Option<u64>,

    /// Connect timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub connect_timeout: Option<u64>,

    /// Maximum request body size in bytes
    #[arg(long, value_name = "BYTES")]
    pub max_body_size: Option<usize>,
}

impl Cli {
    /// Build the effective configuration.
    pub fn load(&self) -> Result<ProxyConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => ProxyConfig::default(),
        };
        self.apply(&mut config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    fn apply(&self, config: &mut ProxyConfig) {
        if let Some(url) = &self.upstream {
            config.upstream.url = url.clone();
        }
        if let Some(addr) = &self.listen {
            config.listener.bind_address = addr.clone();
        }
        if let Some(secs) = self.read_timeout {
            config.timeouts.read_secs = secs;
        }
        if let Some(secs) = self.write_timeout {
            config.timeouts.write_secs = secs;
        }
        if let Some(secs) = self.connect_timeout {
            config.timeouts.connect_secs = secs;
        }
        if let Some(bytes) = self.max_body_size {
            config.limits.max_body_size = bytes;
        }
    }
}
