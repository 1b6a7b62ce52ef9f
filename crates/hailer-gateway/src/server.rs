// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the turn endpoint.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    routing::{get, post},
};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use hailer_core::HailerError;
use hailer_dialog::DialogEngine;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The dialog engine all turns run through.
    pub engine: Arc<DialogEngine>,
    /// Per-user turn locks. Turns for one user are serialized because they
    /// read-modify-write that user's session attributes and credentials.
    pub user_locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
    /// Process start time for uptime reporting.
    pub start_time: Instant,
}

impl GatewayState {
    pub fn new(engine: Arc<DialogEngine>) -> Self {
        Self {
            engine,
            user_locks: Arc::new(DashMap::new()),
            start_time: Instant::now(),
        }
    }
}

/// Gateway server configuration (mirrors GatewayConfig from hailer-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Builds the gateway router. Split from [`start_server`] so tests can
/// drive the handlers without binding a socket.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route("/v1/turns", post(handlers::post_turn))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the gateway HTTP server.
///
/// Binds to the configured host:port and serves until `shutdown` fires,
/// then drains in-flight requests.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), HailerError> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| HailerError::Config(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| HailerError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
