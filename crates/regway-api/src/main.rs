//! # regway-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the Regway gateway.
//! Binds to a configurable port (default 8080).

use regway_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Build configuration from environment.
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let config = AppConfig { port };

    // Initialize database pool (optional — absent means in-memory only).
    let db_pool = regway_api::db::init_pool().await.map_err(|e| {
        tracing::error!("Database initialization failed: {e}");
        e
    })?;

    // A knowledge base that fails to load is fatal: the service must not
    // come up able to ingest but unable to answer guidance queries.
    let state = AppState::try_with_config(config, db_pool).map_err(|e| {
        tracing::error!("Knowledge base load failed: {e}");
        e
    })?;

    let app = regway_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Regway API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
