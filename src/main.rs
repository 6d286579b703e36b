//! Sentry store proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────────────┐
//!                 │                      SENTRY PROXY                         │
//!                 │                                                           │
//!  POST /api/N/   │  ┌────────┐   ┌──────────┐   ┌─────────┐   ┌──────────┐  │
//!  store/  ───────┼─▶│  gate  │──▶│ bounded  │──▶│ peer IP │──▶│  inject  │  │
//!                 │  │405/404 │   │ read 413 │   │   400   │   │ JSON 400 │  │
//!                 │  └────────┘   └──────────┘   └─────────┘   └────┬─────┘  │
//!                 │                                                  │        │
//!                 │                                                  ▼        │
//!   Response      │                  ┌──────────────┐          ┌──────────┐   │
//!  ◀──────────────┼──────────────────│   upstream   │◀─────────│ rewrite  │   │     Sentry
//!                 │   (streamed)     │ client 502/4 │──────────┼──────────┼───┼───▶ upstream
//!                 │                  └──────────────┘          └──────────┘   │
//!                 └──────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use tokio::net::TcpListener;

use sentry_proxy::config::Cli;
use sentry_proxy::lifecycle::{signals, startup};
use sentry_proxy::observability::{logging, metrics};
use sentry_proxy::{HttpServer, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.load()?;

    logging::init(&config.observability);

    let server = HttpServer::new(config)?;
    startup::announce(server.config(), server.target());

    let observability = &server.config().observability;
    if observability.metrics_enabled {
        let addr = observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(server.config().listener.bind_target()).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::trigger_on_signal(&shutdown).await;
    });

    tracing::info!("Ready to serve");
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
