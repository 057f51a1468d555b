//! Custom error types for the API service
//!
//! Every business error is translated to this taxonomy at the handler
//! boundary; nothing propagates unhandled. Unexpected failures are logged
//! server-side and surface as a generic 500.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or missing input, or a business-rule violation
    #[error("{0}")]
    Validation(String),

    /// Duplicate resource; reported as 400 like other bad requests
    #[error("{0}")]
    Conflict(String),

    /// Missing or invalid token
    #[error("Authentication required")]
    Unauthorized,

    /// Wrong role or ownership
    #[error("{0}")]
    Forbidden(String),

    /// No such entity
    #[error("{0}")]
    NotFound(String),

    /// Unexpected failure; details are logged, never sent to the client
    #[error("Server error")]
    Internal,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message; internal details are never echoed back
    pub fn message(&self) -> String {
        match self {
            ApiError::Internal | ApiError::Database(_) => "Server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "message": self.message(),
        }));

        (self.status(), body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_matches_taxonomy() {
        assert_eq!(
            ApiError::Validation("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict("Email already exists".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Forbidden("Access denied".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound("Booking not found".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_hide_details() {
        assert_eq!(ApiError::Internal.message(), "Server error");
        assert_eq!(
            ApiError::Validation("Room not available".into()).message(),
            "Room not available"
        );
    }
}
