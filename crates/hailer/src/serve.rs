// SPDX-FileCopyrightText: 2026 Hailer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `hailer serve` command implementation.
//!
//! Wires the configured storage backend and provider clients into a
//! [`DialogEngine`] and serves it through the HTTP gateway until a
//! shutdown signal arrives.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use hailer_config::model::HailerConfig;
use hailer_core::{HailerError, HealthStatus, ServiceAdapter, SessionStore};
use hailer_dialog::{DialogEngine, DialogPolicy};
use hailer_gateway::{GatewayState, ServerConfig, start_server};
use hailer_geocode::GeocodeClient;
use hailer_lyft::LyftClient;
use hailer_storage::{MemorySessionStore, SqliteSessionStore};

use crate::shutdown;

pub async fn run_serve(config: HailerConfig) -> Result<(), HailerError> {
    init_tracing(&config.service.log_level);
    info!(
        service = %config.service.name,
        version = env!("CARGO_PKG_VERSION"),
        "starting"
    );

    let store = build_store(&config).await?;
    let geocode = Arc::new(GeocodeClient::new(
        config.geocode.api_key.clone(),
        Duration::from_secs(config.geocode.timeout_secs),
    )?);
    let lyft = Arc::new(build_lyft_client(&config)?);

    report_adapter(store.as_ref()).await;
    report_adapter(geocode.as_ref()).await;
    report_adapter(lyft.as_ref()).await;

    let engine = Arc::new(DialogEngine::new(
        geocode,
        lyft.clone(),
        lyft.clone(),
        lyft,
        store.clone(),
        DialogPolicy {
            max_pin_attempts: config.dialog.max_pin_attempts,
        },
    ));

    let cancel = shutdown::install_signal_handler();
    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };
    start_server(&server_config, GatewayState::new(engine), cancel).await?;

    info!("gateway stopped, shutting down adapters");
    store.shutdown().await?;
    Ok(())
}

/// Builds the session store named by `storage.backend`.
async fn build_store(config: &HailerConfig) -> Result<Arc<dyn SessionStore>, HailerError> {
    match config.storage.backend.as_str() {
        "memory" => {
            warn!("memory storage backend selected, credentials will not survive a restart");
            Ok(Arc::new(MemorySessionStore::new()))
        }
        "sqlite" => {
            let store = SqliteSessionStore::new(config.storage.database_path.clone());
            store.initialize().await?;
            info!(path = %config.storage.database_path, "sqlite store ready");
            Ok(Arc::new(store))
        }
        other => Err(HailerError::Config(format!(
            "unknown storage backend {other:?} (expected \"sqlite\" or \"memory\")"
        ))),
    }
}

fn build_lyft_client(config: &HailerConfig) -> Result<LyftClient, HailerError> {
    let (Some(client_id), Some(client_secret)) =
        (&config.lyft.client_id, &config.lyft.client_secret)
    else {
        return Err(HailerError::Config(
            "lyft.client_id and lyft.client_secret are required to serve".to_string(),
        ));
    };
    LyftClient::new(
        client_id.clone(),
        client_secret.clone(),
        Duration::from_secs(config.lyft.timeout_secs),
    )
}

/// Logs one adapter's identity and health at startup.
async fn report_adapter<A: ServiceAdapter + ?Sized>(adapter: &A) {
    match adapter.health_check().await {
        Ok(HealthStatus::Healthy) => {
            info!(name = adapter.name(), version = %adapter.version(), "adapter healthy");
        }
        Ok(HealthStatus::Degraded(reason)) => {
            warn!(name = adapter.name(), version = %adapter.version(), %reason, "adapter degraded");
        }
        Ok(HealthStatus::Unhealthy(reason)) => {
            warn!(name = adapter.name(), version = %adapter.version(), %reason, "adapter unhealthy");
        }
        Err(error) => {
            warn!(name = adapter.name(), version = %adapter.version(), %error, "health check failed");
        }
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hailer={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
