//! Unified application error types
//!
//! Provides a single error type for the request path, mapped to HTTP
//! status codes and a structured JSON body at the boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::coil::filter::FilterError;
use crate::storage::StorageError;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Client input malformed; never mutates state
    #[error("{0}")]
    Validation(String),

    /// Referenced row absent, already deleted, or an empty stats window
    #[error("{0}")]
    NotFound(String),

    /// Store or infrastructure failure
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<FilterError> for AppError {
    fn from(err: FilterError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl AppError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not-found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

/// Serializable error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for client-side handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
        };

        let body = ErrorResponse {
            code: code.to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
