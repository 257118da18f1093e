//! casting-catalog - talent catalog and admin editor
//!
//! Serves the public catalog and the password-gated admin editor over
//! HTTP, reading and writing talent rows through the external sheets
//! endpoint.

use anyhow::Result;
use casting_catalog::{build_router, AppState};
use casting_common::config::{ConfigOverrides, ServiceConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Command-line arguments; each overrides environment and config file
#[derive(Parser, Debug)]
#[command(name = "casting-catalog", version, about = "Casting agency talent catalog")]
struct Args {
    /// Sheets endpoint URL
    #[arg(long)]
    endpoint_url: Option<String>,

    /// HTTP listen port
    #[arg(long)]
    port: Option<u16>,

    /// HTTP bind address
    #[arg(long)]
    bind: Option<String>,

    /// Path to config.toml (default: platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Resolved before tracing is up; the file names the log level
    let (config, config_source) = ServiceConfig::load(ConfigOverrides {
        endpoint_url: args.endpoint_url,
        port: args.port,
        bind: args.bind,
        config_path: args.config,
    });

    // RUST_LOG takes precedence over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!(
        "Starting Casting Catalog (casting-catalog) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    config_source.log();

    let state = AppState::from_config(&config);
    match state.sheets() {
        Ok(client) => info!("Sheets endpoint: {}", client.endpoint_url()),
        Err(_) => warn!("Catalog will be empty until an endpoint URL is configured"),
    }

    let app = build_router(state);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("casting-catalog listening on http://{}", addr);
    info!("Admin editor: http://{}/admin", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
