//! Server entrypoint for calcouncil
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use calcouncil_infrastructure::{ConfigLoader, OpenRouterGateway};
use calcouncil_presentation::{AppState, router};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "calcouncil", about = "AI calculator escalation and council server")]
struct Cli {
    /// Path to an explicit config file (merged over the discovered ones)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bind host, overriding the configured one
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overriding the configured one
    #[arg(long)]
    port: Option<u16>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut config = ConfigLoader::load(cli.config.as_ref())
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to load configuration")?;

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    if config.upstream.api_key.is_none() {
        warn!("No OpenRouter credential configured; every stage will fail until one is set");
    }

    // === Dependency Injection ===
    let gateway = Arc::new(OpenRouterGateway::new(config.upstream.clone()));
    let state = AppState::new(gateway, config.council.pacing());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("calcouncil listening on http://{}", addr);
    axum::serve(listener, router(state))
        .await
        .context("server error")?;

    Ok(())
}
