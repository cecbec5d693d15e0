//! Cross-origin HTTP relay.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                    RELAY                     │
//!     Client Request     │  ┌─────────┐    ┌────────────┐               │
//!     ───────────────────┼─▶│  http   │───▶│ dispatcher │               │
//!     /{format}?url=...  │  │ server  │    │ (mode)     │               │
//!                        │  └─────────┘    └─────┬──────┘               │
//!                        │                       ▼                      │
//!                        │                 ┌────────────┐               │
//!                        │                 │  fetcher   │──────────────┼───▶ Upstream
//!                        │                 │ + charset  │◀─────────────┼──── Server
//!                        │                 └─────┬──────┘               │
//!     Client Response    │  ┌─────────┐          │ FetchResult          │
//!     ◀──────────────────┼──│response │◀─────────┘                      │
//!     raw / JSON / JSONP │  │ render  │                                 │
//!                        │  └─────────┘                                 │
//!                        │  config · observability · lifecycle          │
//!                        └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use origin_relay::config::{apply_port, load_config, RelayConfig};
use origin_relay::lifecycle::startup;
use origin_relay::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "origin-relay")]
#[command(version, about = "Cross-origin HTTP relay", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address, overriding the config file and PORT
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };
    apply_port(&mut config, std::env::var("PORT").ok().as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability.log_filter);
    tracing::info!("origin-relay v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
