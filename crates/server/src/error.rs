//! Unified error handling for route handlers.
//!
//! All route handlers return `Result<T, AppError>`. The error maps to an
//! HTTP status plus a `{"detail": "..."}` JSON body; database failures are
//! logged and hidden from the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type for the jshop API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(RepositoryError),

    /// Referenced slug or code does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate natural key, or category still in use.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Malformed or out-of-range request fields.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound("not found".to_string()),
            RepositoryError::Conflict(msg) => Self::Conflict(msg),
            other => Self::Database(other),
        }
    }
}

impl From<jshop_core::KeyError> for AppError {
    fn from(err: jshop_core::KeyError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Database(ref err) = self {
            tracing::error!(error = %err, "Request error");
        }

        let status = match &self {
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };

        // Don't expose internal error details to clients
        let detail = match &self {
            Self::Database(_) => "Internal server error".to_string(),
            Self::NotFound(msg) | Self::Conflict(msg) | Self::Validation(msg) => msg.clone(),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Lot 'ring-1' not found".to_string());
        assert_eq!(err.to_string(), "Not found: Lot 'ring-1' not found");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Conflict("test".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Validation("test".to_string())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::NotFound)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_repository_conflict_maps_to_conflict() {
        let err = AppError::from(RepositoryError::Conflict("slug taken".to_string()));
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
