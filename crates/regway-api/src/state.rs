//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! ## Architecture
//!
//! `AppState` holds the two things the service needs:
//! - **Event store** — the durable, append-only record of ingested
//!   protocol envelopes, behind the [`EventStore`] seam so the backing
//!   implementation (in-memory or Postgres) is injected at startup and
//!   swappable in tests.
//! - **Retriever** — the ranker over the immutable knowledge base,
//!   constructed once at startup.
//!
//! There is no other mutable in-process state: ingestion appends
//! independent records and retrieval is read-only, so no locking beyond
//! the store's own is required.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use regway_kb::{KbError, KnowledgeBase, Retriever};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

// -- Event Records ------------------------------------------------------------

/// The durable, persisted form of an ingested envelope.
///
/// Created exactly once per successful ingestion; never mutated or
/// deleted by this service. `message` holds the entire raw request body —
/// not just its `message` sub-field — preserving full audit fidelity even
/// when context fields were defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// Correlation key extracted from the envelope context ("unknown" when absent).
    pub action: String,
    /// Correlation key extracted from the envelope context ("unknown" when absent).
    pub transaction_id: String,
    /// The entire original request body, verbatim.
    pub message: serde_json::Value,
    /// Set once at persistence time, immutable thereafter.
    pub created_at: DateTime<Utc>,
}

/// Failure from the durable event store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store rejected an operation or is unreachable.
    #[error("event store unavailable: {0}")]
    Unavailable(String),
}

/// Storage seam for ingested protocol events.
///
/// Implementations append independent, uniquely-identified records with
/// no update-in-place, so concurrent ingestion calls may race on write
/// ordering but never corrupt data.
#[axum::async_trait]
pub trait EventStore: Send + Sync {
    /// Durably append one record. Exactly one write per successful
    /// ingestion; no deduplication — repeated submissions create
    /// repeated records.
    async fn append(&self, record: &EventRecord) -> Result<(), StoreError>;

    /// All persisted records in insertion order.
    async fn list_recent(&self) -> Result<Vec<EventRecord>, StoreError>;
}

/// Append-only in-memory event store.
///
/// The default backing when `DATABASE_URL` is not configured. A `Vec`
/// under `parking_lot::RwLock` — the lock is never held across `.await`
/// points and insertion order is the list order.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    records: RwLock<Vec<EventRecord>>,
}

impl MemoryEventStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[axum::async_trait]
impl EventStore for MemoryEventStore {
    async fn append(&self, record: &EventRecord) -> Result<(), StoreError> {
        self.records.write().push(record.clone());
        Ok(())
    }

    async fn list_recent(&self) -> Result<Vec<EventRecord>, StoreError> {
        Ok(self.records.read().clone())
    }
}

// -- Application State --------------------------------------------------------

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

/// Shared application state accessible to all route handlers.
///
/// Clone-friendly: the store and knowledge base sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Durable store of ingested protocol events.
    pub events: Arc<dyn EventStore>,
    /// Ranker over the immutable knowledge base.
    pub retriever: Retriever,
    /// PostgreSQL pool, present when running with durable persistence.
    /// Used by the readiness probe; the event store holds its own handle.
    pub db_pool: Option<PgPool>,
    /// Application configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Create state with an in-memory store and the embedded knowledge base.
    ///
    /// # Panics
    ///
    /// Panics if the embedded knowledge dataset is malformed. Production
    /// startup goes through [`AppState::try_with_config`] instead.
    pub fn new() -> Self {
        Self::try_with_config(AppConfig::default(), None)
            .expect("embedded knowledge dataset failed to load")
    }

    /// Create state with the given configuration and optional database pool.
    ///
    /// The event store is Postgres-backed when a pool is provided,
    /// in-memory otherwise. The knowledge base is loaded from the
    /// embedded dataset; a malformed dataset fails startup here, before
    /// any request is served.
    pub fn try_with_config(config: AppConfig, db_pool: Option<PgPool>) -> Result<Self, KbError> {
        let base = Arc::new(KnowledgeBase::load_embedded()?);
        let events: Arc<dyn EventStore> = match &db_pool {
            Some(pool) => Arc::new(crate::db::events::PgEventStore::new(pool.clone())),
            None => Arc::new(MemoryEventStore::new()),
        };
        Ok(Self {
            events,
            retriever: Retriever::new(base),
            db_pool,
            config,
        })
    }

    /// Create state from explicit parts. Used by tests to inject fixture
    /// knowledge bases and failing stores.
    pub fn with_parts(config: AppConfig, events: Arc<dyn EventStore>, retriever: Retriever) -> Self {
        Self {
            events,
            retriever,
            db_pool: None,
            config,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
