//! # Tide Timings Service Entry Point
//!
//! This binary wires the library together: it loads configuration, builds the
//! scraping service and serves the JSON API until interrupted.
//!
//! ## Environment variables
//!
//! | Variable      | Description                                      |
//! |---------------|--------------------------------------------------|
//! | `PORT`        | Listening port (default: 8080)                   |
//! | `SECRET_JWT`  | Shared secret, held in config                    |
//! | `TIDE_CONFIG` | Config file path (default: `tide-config.toml`)   |
//! | `RUST_LOG`    | Log filter (default: `info,tide_timings=debug`)  |

// Test modules
#[cfg(test)]
mod tests;

use anyhow::Context;
use std::sync::Arc;
use tide_timings_lib::api::{self, ApiState};
use tide_timings_lib::config::Config;
use tide_timings_lib::tide_data::TideService;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,tide_timings=debug,tide_timings_lib=debug")
            }),
        )
        .init();

    let config = Config::load();
    if config.secret_jwt.is_none() {
        info!("SECRET_JWT not set");
    }

    let service = TideService::new(&config.source).context("build HTTP client")?;
    info!(url = %service.url(), "Scraping tide timings");

    let app = api::router(ApiState::new(Arc::new(service)));

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {}", addr))?;
    info!(addr = %addr, "Server is running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve HTTP")?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
