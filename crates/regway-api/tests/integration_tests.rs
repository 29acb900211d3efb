//! # Integration Tests for regway-api
//!
//! Tests the assembled application: health probes, envelope ingestion and
//! listing end to end, degraded-read behavior with a failing store,
//! guidance retrieval against the embedded dataset, and OpenAPI spec
//! generation.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use regway_api::state::{AppConfig, AppState, EventRecord, EventStore, StoreError};
use regway_kb::{KnowledgeBase, Retriever};

/// Helper: build the test app with an in-memory store and the embedded
/// knowledge base.
fn test_app() -> axum::Router {
    regway_api::app(AppState::new())
}

/// Helper: read response body as parsed JSON.
async fn body_json(response: axum::http::Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_event(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/events")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let app = test_app();
    let response = app.oneshot(get("/health/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let app = test_app();
    let response = app.oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

// -- Envelope Ingestion -------------------------------------------------------

#[tokio::test]
async fn test_ingest_then_list_round_trip() {
    let app = test_app();

    let envelope = json!({
        "context": {
            "domain": "retail",
            "action": "confirm",
            "transaction_id": "txn-42",
            "bap_id": "buyer.example.org"
        },
        "message": {"order": {"id": "o-1"}}
    });
    let response = app
        .clone()
        .oneshot(post_event(&envelope.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"received": true}));

    let response = app.oneshot(get("/v1/events")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listing = body_json(response).await;
    assert_eq!(listing["ok"], json!(true));
    let events = listing["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["action"], "confirm");
    assert_eq!(events[0]["transaction_id"], "txn-42");
    // The full raw body is stored, not just the message sub-field.
    assert_eq!(events[0]["message"], envelope);
}

#[tokio::test]
async fn test_ingest_defaults_missing_context_fields() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_event(r#"{"message": {"free": "form"}}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let listing = body_json(app.oneshot(get("/v1/events")).await.unwrap()).await;
    let events = listing["events"].as_array().unwrap();
    assert_eq!(events[0]["action"], "unknown");
    assert_eq!(events[0]["transaction_id"], "unknown");
}

#[tokio::test]
async fn test_ingest_rejects_malformed_json() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_event("{definitely not json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    // Nothing was persisted.
    let listing = body_json(app.oneshot(get("/v1/events")).await.unwrap()).await;
    assert!(listing["events"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_repeated_envelopes_are_all_recorded() {
    let app = test_app();
    let body = r#"{"context": {"action": "confirm", "transaction_id": "dup-1"}}"#;

    for _ in 0..3 {
        let response = app.clone().oneshot(post_event(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let listing = body_json(app.oneshot(get("/v1/events")).await.unwrap()).await;
    assert_eq!(listing["events"].as_array().unwrap().len(), 3);
}

// -- Degraded and Failing Stores ----------------------------------------------

/// Store whose every operation fails, for exercising error paths.
struct FailingEventStore;

#[axum::async_trait]
impl EventStore for FailingEventStore {
    async fn append(&self, _record: &EventRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("injected failure".to_string()))
    }

    async fn list_recent(&self) -> Result<Vec<EventRecord>, StoreError> {
        Err(StoreError::Unavailable("injected failure".to_string()))
    }
}

fn failing_store_app() -> axum::Router {
    let retriever = Retriever::new(Arc::new(
        KnowledgeBase::load_embedded().expect("embedded dataset"),
    ));
    let state = AppState::with_parts(
        AppConfig::default(),
        Arc::new(FailingEventStore),
        retriever,
    );
    regway_api::app(state)
}

#[tokio::test]
async fn test_write_failure_returns_503() {
    let app = failing_store_app();
    let response = app
        .oneshot(post_event(r#"{"context": {"action": "confirm"}}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "PERSISTENCE_FAILURE");
}

#[tokio::test]
async fn test_listing_degrades_to_empty_on_read_failure() {
    let app = failing_store_app();
    let response = app.oneshot(get("/v1/events")).await.unwrap();
    // The degraded read is indistinguishable from an empty store.
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"ok": true, "events": []}));
}

// -- Guidance Retrieval -------------------------------------------------------

#[tokio::test]
async fn test_guidance_query_against_embedded_dataset() {
    let app = test_app();
    let response = app
        .oneshot(get(
            "/v1/guidance?query=assurance%20requirements&jurisdiction=UK",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let results = body["results"].as_array().unwrap();
    assert!(!results.is_empty());
    assert!(results.len() <= 5);
    // With the UK hint, the keyword-dense SECR chunks lead the ranking.
    assert_eq!(results[0]["id"], "uk-secr-001");
    assert_eq!(results[0]["jurisdiction"], "UK");
    // Full chunk records come back, not bare identifiers.
    assert!(results[0]["source_url"].as_str().unwrap().starts_with("https://"));
}

#[tokio::test]
async fn test_guidance_is_deterministic_across_calls() {
    let app = test_app();
    let uri = "/v1/guidance?query=csrd%20scope%20reporting&top_k=3";

    let first = body_json(app.clone().oneshot(get(uri)).await.unwrap()).await;
    let second = body_json(app.oneshot(get(uri)).await.unwrap()).await;
    assert_eq!(first, second);
    assert_eq!(first["results"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_guidance_top_k_zero_returns_no_results() {
    let app = test_app();
    let response = app
        .oneshot(get("/v1/guidance?query=cbam&top_k=0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_jurisdictions_listing() {
    let app = test_app();
    let response = app.oneshot(get("/v1/guidance/jurisdictions")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["jurisdictions"], json!(["UK", "EU", "IN"]));
}

// -- OpenAPI ------------------------------------------------------------------

#[tokio::test]
async fn test_openapi_spec_lists_all_routes() {
    let app = test_app();
    let response = app.oneshot(get("/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let spec = body_json(response).await;
    let paths = spec["paths"].as_object().unwrap();
    assert!(paths.contains_key("/v1/events"));
    assert!(paths.contains_key("/v1/guidance"));
    assert!(paths.contains_key("/v1/guidance/jurisdictions"));
    assert!(paths["/v1/events"].as_object().unwrap().contains_key("post"));
    assert!(paths["/v1/events"].as_object().unwrap().contains_key("get"));
}
