//! # Regulatory Guidance API
//!
//! Read-only retrieval over the immutable knowledge base:
//!
//! - **GET `/v1/guidance`** — Rank knowledge chunks against a free-text
//!   query with an optional jurisdiction hint
//! - **GET `/v1/guidance/jurisdictions`** — List jurisdictions present in
//!   the knowledge base
//!
//! Retrieval has no failure path: a process that got this far loaded its
//! dataset at startup, and ranking is a pure function of the request and
//! that dataset.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use regway_core::KnowledgeChunk;
use regway_kb::DEFAULT_TOP_K;

use crate::state::AppState;

/// Query parameters for guidance retrieval.
#[derive(Debug, Deserialize, Default)]
pub struct GuidanceParams {
    /// Free-text query; matching is case-insensitive. Absent means empty,
    /// which still ranks deterministically on chunk-text signals.
    pub query: Option<String>,
    /// Optional jurisdiction hint, compared case-insensitively for exact
    /// equality against each chunk's jurisdiction.
    pub jurisdiction: Option<String>,
    /// Maximum results to return. Defaults to 5.
    pub top_k: Option<usize>,
}

/// Ranked retrieval result.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GuidanceResponse {
    /// The query as ranked.
    pub query: String,
    /// The jurisdiction hint applied, if any.
    pub jurisdiction: Option<String>,
    /// Full chunk records in rank order, at most `top_k` of them.
    pub results: Vec<KnowledgeChunk>,
}

/// Jurisdictions covered by the knowledge base.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JurisdictionsResponse {
    /// Distinct jurisdiction labels in dataset order.
    pub jurisdictions: Vec<String>,
}

/// Construct the guidance router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/guidance", get(query_guidance))
        .route("/v1/guidance/jurisdictions", get(list_jurisdictions))
}

/// GET /v1/guidance — Rank knowledge chunks against a query.
#[utoipa::path(
    get,
    path = "/v1/guidance",
    params(
        ("query" = Option<String>, Query, description = "Free-text query"),
        ("jurisdiction" = Option<String>, Query, description = "Jurisdiction hint"),
        ("top_k" = Option<usize>, Query, description = "Result bound, default 5"),
    ),
    responses(
        (status = 200, description = "Ranked chunks", body = GuidanceResponse),
    ),
    tag = "guidance"
)]
pub async fn query_guidance(
    State(state): State<AppState>,
    Query(params): Query<GuidanceParams>,
) -> Json<GuidanceResponse> {
    let query = params.query.unwrap_or_default();
    let top_k = params.top_k.unwrap_or(DEFAULT_TOP_K);
    let results = state
        .retriever
        .retrieve(&query, params.jurisdiction.as_deref(), top_k);

    tracing::debug!(
        query = %query,
        jurisdiction = params.jurisdiction.as_deref().unwrap_or("-"),
        top_k,
        returned = results.len(),
        "guidance retrieval served"
    );

    Json(GuidanceResponse {
        query,
        jurisdiction: params.jurisdiction,
        results,
    })
}

/// GET /v1/guidance/jurisdictions — Jurisdictions present in the knowledge base.
#[utoipa::path(
    get,
    path = "/v1/guidance/jurisdictions",
    responses(
        (status = 200, description = "Distinct jurisdictions in dataset order", body = JurisdictionsResponse),
    ),
    tag = "guidance"
)]
pub async fn list_jurisdictions(State(state): State<AppState>) -> Json<JurisdictionsResponse> {
    Json(JurisdictionsResponse {
        jurisdictions: state.retriever.knowledge_base().jurisdictions(),
    })
}
