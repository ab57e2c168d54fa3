//! AltScore API Server
//!
//! HTTP API exposing risk evaluation, health check and metrics.
//! The engine holds no per-request state, so the service scales horizontally.

use altscore::config::{get_environment, EngineConfig};
use altscore::core::http::start_server;
use altscore::logging;
use dotenvy::dotenv;
use std::env;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let config = EngineConfig::load()?;

    info!("Starting AltScore API Server");
    info!(environment = %get_environment(), "Environment");
    info!(
        approve_threshold = config.decision.approve_threshold,
        hard_stop_ceiling = config.decision.hard_stop_ceiling,
        "Decision thresholds"
    );
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port, config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("API server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
            info!("API server stopped");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
