//! # regway-api — Axum API Service for the Regway Gateway
//!
//! Regway is a protocol gateway: it accepts commerce-protocol envelopes
//! and durably records them as an append-only audit trail, and it answers
//! regulatory-guidance queries with a deterministic ranker over a fixed
//! knowledge base.
//!
//! ## API Surface
//!
//! | Prefix                         | Module                 | Domain                |
//! |--------------------------------|------------------------|-----------------------|
//! | `/v1/events`                   | [`routes::events`]     | Envelope ingestion    |
//! | `/v1/guidance`                 | [`routes::guidance`]   | Guidance retrieval    |
//! | `/v1/guidance/jurisdictions`   | [`routes::guidance`]   | Dataset coverage      |
//! | `/openapi.json`                | [`openapi`]            | API specification     |
//! | `/health/*`                    | [`app`]                | Probes                |
//!
//! ## Persistence
//!
//! With `DATABASE_URL` set the event store is PostgreSQL-backed (see
//! [`db`]); without it the service runs with an in-memory store, which is
//! the mode integration tests use.
//!
//! ## OpenAPI
//!
//! Auto-generated spec via utoipa derive macros at `/openapi.json`.

pub mod db;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new()
        .merge(health)
        .merge(routes::events::router())
        .merge(routes::guidance::router())
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — 200 when the service can actually serve.
///
/// The knowledge base is loaded before state construction, so the only
/// runtime dependency to verify is the database, when one is configured.
async fn readiness(State(state): State<AppState>) -> Result<&'static str, StatusCode> {
    if state.retriever.knowledge_base().is_empty() {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    if let Some(pool) = &state.db_pool {
        if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
            tracing::warn!(error = %e, "readiness check failed against database");
            return Err(StatusCode::SERVICE_UNAVAILABLE);
        }
    }
    Ok("ready")
}
