//! Protocol event persistence operations.
//!
//! All functions take a `&PgPool` and operate on the `protocol_events`
//! table. Event records are immutable once created — there are no update
//! operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::state::{EventRecord, EventStore, StoreError};

/// Insert a new protocol event record.
pub async fn insert(pool: &PgPool, record: &EventRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO protocol_events (id, action, transaction_id, message, created_at)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(record.id)
    .bind(&record.action)
    .bind(&record.transaction_id)
    .bind(&record.message)
    .bind(record.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// List all protocol events in insertion order.
///
/// Ordered by the append sequence rather than `created_at`, so records
/// written within the same timestamp tick keep a stable order.
pub async fn list_all(pool: &PgPool) -> Result<Vec<EventRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, EventRow>(
        "SELECT id, action, transaction_id, message, created_at
         FROM protocol_events ORDER BY seq",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(EventRow::into_record).collect())
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct EventRow {
    id: Uuid,
    action: String,
    transaction_id: String,
    message: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl EventRow {
    fn into_record(self) -> EventRecord {
        EventRecord {
            id: self.id,
            action: self.action,
            transaction_id: self.transaction_id,
            message: self.message,
            created_at: self.created_at,
        }
    }
}

/// Postgres-backed [`EventStore`].
///
/// Write failures surface as [`StoreError::Unavailable`] and propagate to
/// the ingestion caller; read failures are handed to the query layer,
/// which degrades to an empty result instead.
#[derive(Debug, Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    /// Create a store over an initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[axum::async_trait]
impl EventStore for PgEventStore {
    async fn append(&self, record: &EventRecord) -> Result<(), StoreError> {
        insert(&self.pool, record)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    async fn list_recent(&self) -> Result<Vec<EventRecord>, StoreError> {
        list_all(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}
