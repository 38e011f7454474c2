//! Brewery HTTP Server Binary
//!
//! This is the main entry point for the beer catalog REST API server.
//! It loads the configuration, initializes the repository, sets up the HTTP
//! router, and serves requests until Ctrl-C.
//!
//! # Usage
//!
//! ```bash
//! # Run with the sample catalog (default)
//! cargo run --bin brewery-server
//!
//! # Start empty, on another port
//! BREWERY_SEED_DATA=false PORT=9090 cargo run --bin brewery-server
//! ```
//!
//! # Environment Variables
//!
//! - `BREWERY_CONFIG`: Path to a TOML configuration file
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `BREWERY_SEED_DATA`: Load the sample catalog at startup (default: true)
//! - `RUST_LOG`: Log filter (default: info)

use std::net::SocketAddr;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use brewery_rest::config::AppConfig;
use brewery_rest::db::RepositoryFactory;
use brewery_rest::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting brewery HTTP server");

    let config = AppConfig::load().context("Failed to load configuration")?;

    let repository = RepositoryFactory::from_settings(&config.repository).await?;
    info!("Repository initialized successfully");

    // Create application state
    let state = AppState::new(repository).with_paging(config.paging.clone());

    // Create router with all endpoints
    let app = create_router(state);

    let addr: SocketAddr = config
        .server
        .bind_address()
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind_address()))?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
