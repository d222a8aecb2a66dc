//! HTTP surface mimicking the CoinMarketCap v1 cryptocurrency endpoints

pub mod error;
pub mod handlers;
pub mod params;
pub mod state;
pub mod status;

use crate::core::config::AppConfig;
use crate::store::Store;
use crate::store::refresher::spawn_refresher;
use anyhow::{Context, Result};
use axum::{Router, routing::get};
use state::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use error::AppError;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/coinmarketcap/map", get(handlers::get_map))
        .route("/coinmarketcap/map/", get(handlers::get_map))
        .route("/coinmarketcap/quotes", get(handlers::get_quotes))
        .route("/coinmarketcap/quotes/", get(handlers::get_quotes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves `store` until Ctrl-C, refreshing its quotes in the background.
pub async fn serve(config: &AppConfig, store: Arc<Store>) -> Result<()> {
    let refresher = spawn_refresher(Arc::clone(&store), config.refresh_interval());
    let app = create_router(AppState::new(store));

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    info!("Listening on {}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server terminated unexpectedly");

    refresher.abort();
    info!("Server stopped");
    served
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
