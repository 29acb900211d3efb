//! # Protocol Event API
//!
//! HTTP surface for envelope ingestion and stored-event listing:
//!
//! - **POST `/v1/events`** — Accept and durably record a protocol envelope
//! - **GET `/v1/events`** — List previously recorded events
//!
//! ## Contract
//!
//! Ingestion is accept-and-record: the body is decoded as arbitrary JSON,
//! correlation keys are extracted with `"unknown"` defaults, and the
//! entire raw body is persisted. The only client failure is an
//! undecodable body; a store write failure is surfaced as 503 with
//! nothing persisted. The listing degrades to an empty array when the
//! store is unreachable — dashboards keep rendering, and an empty result
//! means "no data right now", not "no events exist".

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use regway_core::Envelope;

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::{AppState, EventRecord};

/// Acknowledgement returned for a recorded envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IngestResponse {
    /// Always `true` on success.
    pub received: bool,
}

/// Listing of stored protocol events.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EventListResponse {
    /// Always `true`, including on a degraded read.
    pub ok: bool,
    /// Stored records in insertion order; empty when the store is degraded.
    pub events: Vec<EventRecord>,
}

/// Construct the protocol event router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/events", get(list_events).post(ingest_event))
}

/// POST /v1/events — Accept and durably record a protocol envelope.
///
/// Never rejects an envelope for missing context fields: identity is
/// defaulted and the full raw body is stored for audit. Repeated
/// identical submissions create repeated records — deduplication is
/// deliberately absent so the store remains a complete audit trail.
#[utoipa::path(
    post,
    path = "/v1/events",
    request_body = Object,
    responses(
        (status = 200, description = "Envelope recorded", body = IngestResponse),
        (status = 422, description = "Body is not decodable JSON", body = crate::error::ErrorBody),
        (status = 503, description = "Event store rejected the write", body = crate::error::ErrorBody),
    ),
    tag = "events"
)]
pub async fn ingest_event(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<IngestResponse>, AppError> {
    let raw = extract_json(body)?;
    let envelope = Envelope::from_value(&raw);

    let record = EventRecord {
        id: Uuid::new_v4(),
        action: envelope.context.action,
        transaction_id: envelope.context.transaction_id,
        // The entire raw body, not just the message sub-field.
        message: raw,
        created_at: Utc::now(),
    };

    state
        .events
        .append(&record)
        .await
        .map_err(|e| AppError::Persistence(e.to_string()))?;

    tracing::info!(
        event_id = %record.id,
        action = %record.action,
        transaction_id = %record.transaction_id,
        "protocol event recorded"
    );

    Ok(Json(IngestResponse { received: true }))
}

/// GET /v1/events — List stored protocol events.
///
/// Read-only, insertion order, no filtering or pagination. A store read
/// failure is absorbed here: the handler logs it and returns an empty
/// list with `ok: true` rather than failing interactive callers.
#[utoipa::path(
    get,
    path = "/v1/events",
    responses(
        (status = 200, description = "Stored events (empty when the store is degraded)", body = EventListResponse),
    ),
    tag = "events"
)]
pub async fn list_events(State(state): State<AppState>) -> Json<EventListResponse> {
    let events = match state.events.list_recent().await {
        Ok(events) => events,
        Err(e) => {
            tracing::warn!(error = %e, "event store read failed — serving empty list");
            Vec::new()
        }
    };

    Json(EventListResponse { ok: true, events })
}
