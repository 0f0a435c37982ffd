//! # Web Server Binary
//!
//! Serves the imprint HTTP API.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin web_server -- --config config/imprint.toml
//! cargo run --bin web_server -- --address 0.0.0.0:8000
//! ```

use clap::Parser;
use log::info;
use std::sync::Arc;

use imprint::api::{build_router, AppState};
use imprint::common::config::ImprintConfig;
use imprint::logging::init_logger;
use imprint::ImprintService;

/// Command-line arguments for the web server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (TOML format); defaults apply without it
    #[arg(short, long)]
    config: Option<String>,

    /// Listen address, overrides `server.address`
    #[arg(short, long)]
    address: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ImprintConfig::from_file(path)?,
        None => ImprintConfig::default(),
    };
    if let Some(address) = args.address {
        config.server.address = address;
    }

    info!("🚀 Initializing web server...");

    let state = Arc::new(AppState {
        service: ImprintService::from_config(&config),
        settings: config.server.clone(),
    });
    let app = build_router(state);

    let addr = config.server.address.as_str();
    info!("🌐 Web server running on http://{}", addr);
    info!("📡 API endpoints: http://{0}/api/v1/imprint, http://{0}/api/v1/imprint/parse", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
