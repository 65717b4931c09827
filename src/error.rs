//! Tracker error types with HTTP status code mapping.
//!
//! [`TrackerError`] is the central error type for the service. Storage
//! failures are raised inside [`crate::persistence::CounterStore`] and
//! propagate unchanged to the HTTP boundary, where each variant maps to a
//! status code and a structured JSON error body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 3002,
///     "message": "corrupt counter state in tea_count.json: missing field `count`"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Codes
///
/// | Code | Variant                | HTTP Status               |
/// |------|------------------------|---------------------------|
/// | 3000 | `ConcurrencyViolation` | 500 Internal Server Error |
/// | 3001 | `StorageUnavailable`   | 503 Service Unavailable   |
/// | 3002 | `CorruptState`         | 500 Internal Server Error |
/// | 3003 | `CounterOverflow`      | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// The counter file could not be read or written.
    #[error("storage unavailable: {context}: {source}")]
    StorageUnavailable {
        /// What the store was doing when the I/O failed.
        context: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The counter file exists but does not hold a valid record.
    #[error("corrupt counter state in {path}: {reason}")]
    CorruptState {
        /// Location of the offending record.
        path: String,
        /// Why validation failed.
        reason: String,
    },

    /// Incrementing would move the counter past `u64::MAX`.
    #[error("counter overflow: cannot increment past {0}")]
    CounterOverflow(u64),

    /// Internal invariant breach in the store's critical section.
    #[error("concurrency violation: {0}")]
    ConcurrencyViolation(String),
}

impl TrackerError {
    /// Builds a [`TrackerError::StorageUnavailable`] from an I/O error.
    pub fn storage(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::StorageUnavailable {
            context: context.into(),
            source,
        }
    }

    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::ConcurrencyViolation(_) => 3000,
            Self::StorageUnavailable { .. } => 3001,
            Self::CorruptState { .. } => 3002,
            Self::CounterOverflow(_) => 3003,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::StorageUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::CorruptState { .. } | Self::CounterOverflow(_) | Self::ConcurrencyViolation(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for TrackerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!(code = self.error_code(), error = %self, "request failed");
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
