//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Comanda                                │
//! │                                                                         │
//! │  Handler                                                               │
//! │  Result<Json<T>, ApiError>                                             │
//! │         │                                                              │
//! │         ▼                                                              │
//! │  DbError::Domain(...)  ── category ──► status code + JSON body         │
//! │  DbError::<storage>    ── logged   ──► 500, generic message            │
//! │                                                                         │
//! │  Caller receives:                                                       │
//! │  { "code": "INVALID_STATE", "message": "Tab 4 is already PAID" }       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Status mapping per category: not-found → 404, conflict → 409,
//! invalid-state → 400, validation → 400, storage failure → 500. Internal
//! details of storage failures go to the logs only, never to the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use comanda_core::DomainError;
use comanda_db::DbError;

/// API error returned from HTTP handlers.
///
/// ## Serialization
/// This is the body a caller receives when a request fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Tab not found: 9999"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// HTTP status for the response (not serialized into the body).
    #[serde(skip)]
    pub status: StatusCode,

    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Referenced entity does not exist (404)
    NotFound,

    /// Uniqueness violation, e.g. duplicate national id (409)
    Conflict,

    /// Operation not permitted in the current entity state (400)
    InvalidState,

    /// Malformed or out-of-range input (400)
    ValidationError,

    /// Storage operation failed (500)
    DatabaseError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::NOT_FOUND, ErrorCode::NotFound, message)
    }

    /// Creates an internal storage error with a generic caller-facing message.
    pub fn internal() -> Self {
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::DatabaseError,
            "Storage operation failed",
        )
    }
}

/// Converts database-layer errors to API errors.
///
/// Domain rejections keep their message and map by category; raw storage
/// failures are logged and flattened to a generic 500.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Domain(domain) => ApiError::from(domain),

            DbError::UniqueViolation { field, value } => ApiError::new(
                StatusCode::CONFLICT,
                ErrorCode::Conflict,
                format!("{} '{}' already exists", field, value),
            ),

            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::new(
                    StatusCode::BAD_REQUEST,
                    ErrorCode::ValidationError,
                    "Invalid reference",
                )
            }

            DbError::ConnectionFailed(e)
            | DbError::MigrationFailed(e)
            | DbError::QueryFailed(e)
            | DbError::TransactionFailed(e)
            | DbError::Internal(e) => {
                tracing::error!("Database error: {}", e);
                ApiError::internal()
            }

            DbError::PoolExhausted => {
                tracing::error!("Connection pool exhausted");
                ApiError::internal()
            }
        }
    }
}

/// Converts domain errors to API errors by taxonomy category.
impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let (status, code) = match &err {
            DomainError::ClientNotFound(_)
            | DomainError::TabNotFound(_)
            | DomainError::ItemNotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),

            DomainError::DuplicateNationalId(_) => (StatusCode::CONFLICT, ErrorCode::Conflict),

            DomainError::TabNotOpen { .. } | DomainError::TabHasPendingTotal { .. } => {
                (StatusCode::BAD_REQUEST, ErrorCode::InvalidState)
            }

            DomainError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::ValidationError),
        };

        ApiError::new(status, code, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================
