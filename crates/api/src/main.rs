mod auth;
mod config;
mod error;
mod middleware;
mod pages;
mod routes;
mod state;

use std::sync::Arc;

use advisory_site_core::events::EventBus;
use advisory_site_core::image::{ImageStorage, LocalImageStorage};
use advisory_site_core::store::postgres::PgDocumentStore;
use advisory_site_core::store::SharedStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience)
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)))
        .json()
        .init();

    tracing::info!("Starting advisory site server");
    if config.jwt_secret.is_none() {
        tracing::warn!("JWT_SECRET not set; admin login disabled");
    }

    let store = connect_store(&config).await?;
    let images = open_image_storage(&config).await?;

    let event_bus = EventBus::new(config.event_bus_capacity);
    let state = state::AppState::new(store, images, config.clone(), event_bus);

    let app = routes::build_router(state)
        .layer(middleware::request_tracing::trace_layer())
        .layer(middleware::cors::cors_layer());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Connect to PostgreSQL and apply migrations. Without `DATABASE_URL` the
/// site still serves default content and every write answers 503.
async fn connect_store(config: &AppConfig) -> anyhow::Result<Option<SharedStore>> {
    let Some(url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set; store not configured");
        return Ok(None);
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .connect(url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {e}"))?;
    tracing::info!("Connected to PostgreSQL");

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {e}"))?;
    tracing::info!("Database migrations applied");

    Ok(Some(Arc::new(PgDocumentStore::new(pool))))
}

async fn open_image_storage(config: &AppConfig) -> anyhow::Result<Option<Arc<dyn ImageStorage>>> {
    let Some(dir) = config.upload_dir.as_ref() else {
        tracing::warn!("UPLOAD_DIR not set; image storage not configured");
        return Ok(None);
    };
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create upload directory {}: {e}", dir.display()))?;
    tracing::info!(dir = %dir.display(), "Image storage ready");
    Ok(Some(Arc::new(LocalImageStorage::new(dir.clone(), config.upload_base_url.clone()))))
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { tracing::info!("Received Ctrl+C, shutting down..."); }
        _ = terminate => { tracing::info!("Received SIGTERM, shutting down..."); }
    }
}
