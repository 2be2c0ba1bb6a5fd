//! Error types for the REST API server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    /// Persisted store is missing or empty
    StoreNotInitialized,
    /// Filter date bounds are inverted
    InvalidFilterRange(String),
    /// Generated data could not be reconciled to invariants
    ValidationFailed(String),
    /// Export destination was unwritable
    ExportFailed(String),
    /// Internal server error
    InternalError(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::StoreNotInitialized => write!(f, "Store not initialized"),
            ApiError::InvalidFilterRange(msg) => write!(f, "Invalid filter range: {}", msg),
            ApiError::ValidationFailed(msg) => write!(f, "Validation failed: {}", msg),
            ApiError::ExportFailed(msg) => write!(f, "Export failed: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::StoreNotInitialized => (
                StatusCode::CONFLICT,
                "StoreNotInitialized",
                "Store is not initialized; POST /init to generate data".to_string(),
            ),
            ApiError::InvalidFilterRange(msg) => {
                (StatusCode::BAD_REQUEST, "InvalidFilterRange", msg.clone())
            }
            ApiError::ValidationFailed(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "ValidationFailure",
                msg.clone(),
            ),
            ApiError::ExportFailed(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "ExportIOFailure",
                msg.clone(),
            ),
            ApiError::InternalError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalError",
                msg.clone(),
            ),
        };

        let body = Json(json!({
            "error": error_type,
            "message": message,
        }));

        (status, body).into_response()
    }
}

// Conversions from domain error types

impl From<crate::store::StoreError> for ApiError {
    fn from(err: crate::store::StoreError) -> Self {
        match err {
            crate::store::StoreError::NotInitialized => ApiError::StoreNotInitialized,
            crate::store::StoreError::Sqlite(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<crate::filter::FilterError> for ApiError {
    fn from(err: crate::filter::FilterError) -> Self {
        ApiError::InvalidFilterRange(err.to_string())
    }
}

impl From<crate::bootstrap::InitError> for ApiError {
    fn from(err: crate::bootstrap::InitError) -> Self {
        match err {
            crate::bootstrap::InitError::Validation(inner) => {
                ApiError::ValidationFailed(inner.to_string())
            }
            crate::bootstrap::InitError::Store(inner) => ApiError::from(inner),
            crate::bootstrap::InitError::Generator(inner) => {
                ApiError::InternalError(inner.to_string())
            }
        }
    }
}

impl From<crate::export::ExportError> for ApiError {
    fn from(err: crate::export::ExportError) -> Self {
        ApiError::ExportFailed(err.to_string())
    }
}
