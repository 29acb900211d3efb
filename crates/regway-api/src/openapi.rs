//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Regway API — Protocol Gateway and Regulatory Guidance",
        version = "0.3.2",
        description = "Commerce-protocol envelope ingestion with a durable audit trail, plus deterministic retrieval over a fixed regulatory knowledge base.",
        license(name = "Apache-2.0")
    ),
    paths(
        // Events
        crate::routes::events::ingest_event,
        crate::routes::events::list_events,
        // Guidance
        crate::routes::guidance::query_guidance,
        crate::routes::guidance::list_jurisdictions,
    ),
    components(schemas(
        // State record types
        crate::state::EventRecord,
        // Knowledge types
        regway_core::KnowledgeChunk,
        // Error types
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        // Event DTOs
        crate::routes::events::IngestResponse,
        crate::routes::events::EventListResponse,
        // Guidance DTOs
        crate::routes::guidance::GuidanceResponse,
        crate::routes::guidance::JurisdictionsResponse,
    )),
    tags(
        (name = "events", description = "Protocol envelope ingestion and audit listing"),
        (name = "guidance", description = "Regulatory guidance retrieval"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
///
/// Serves the OpenAPI JSON spec at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
