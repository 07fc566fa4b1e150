//! FitTrack Backend
//!
//! A self-hosted, single-user fitness tracking service.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! - Routes: HTTP request handling and routing
//! - Services: Business logic and the evaluation engines
//! - Stores: In-memory state containers with write-through persistence
//! - Storage: Key-value persistence of whole state blobs (Redis)

use anyhow::Result;
use fittrack_backend::device::{DeviceDataSource, DisabledBridge, HttpBridge};
use fittrack_backend::storage::{MemoryStore, RedisStore, StateStore};
use fittrack_backend::{config, routes, state::AppState};
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting FitTrack Backend"
    );

    // Connect the state store (memory-only fallback when Redis is down)
    let storage: Arc<dyn StateStore> = match RedisStore::connect(&config.storage.redis_url).await {
        Some(store) => Arc::new(store),
        None => Arc::new(MemoryStore::new()),
    };

    // Select the device data source
    let device: Arc<dyn DeviceDataSource> = if config.bridge.enabled {
        info!(url = %config.bridge.url, "Device bridge enabled");
        Arc::new(HttpBridge::new(config.bridge.url.clone()))
    } else {
        Arc::new(DisabledBridge)
    };

    // Create application state and rehydrate persisted data
    let state = AppState::new(config.clone(), storage, device);
    state.rehydrate().await;

    // Build application
    let app = routes::create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "fittrack_backend=info,tower_http=info".into()
        } else {
            "fittrack_backend=debug,tower_http=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
