//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps ingestion and storage failures to HTTP status codes with JSON
//! error bodies carrying a machine-readable code. Internal error details
//! are never exposed to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses use this format for consistency across the API
/// surface.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "BAD_REQUEST", "PERSISTENCE_FAILURE").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body could not be decoded as structured data (422).
    ///
    /// The client sent syntactically valid HTTP but content that is not
    /// JSON at all. Nothing is persisted on this path.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The durable event store rejected a write or is unavailable (503).
    ///
    /// Always surfaced to the caller — no silent data loss, and no retry
    /// inside this service. Retry policy belongs to the caller.
    #[error("event store write failed: {0}")]
    Persistence(String),

    /// Internal server error (500). Message is logged but not returned
    /// to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::UNPROCESSABLE_ENTITY, "BAD_REQUEST"),
            Self::Persistence(_) => (StatusCode::SERVICE_UNAVAILABLE, "PERSISTENCE_FAILURE"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        // Log server-side errors for operator visibility.
        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::Persistence(_) => tracing::error!(error = %self, "event store write failed"),
            Self::BadRequest(_) => {}
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}
