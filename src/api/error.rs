//! Mapping from service errors to HTTP responses.

use crate::todo::services::{ErrorKind, TodoServiceError};
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Errors returned by HTTP handlers.
///
/// Implements [`IntoResponse`] to produce
/// `{ "success": false, "error": { "code", "message" } }` bodies.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// An error raised by the manager.
    #[error(transparent)]
    Service(#[from] TodoServiceError),

    /// Input rejected at the HTTP boundary.
    #[error("{0}")]
    Validation(String),

    /// The request body or path could not be decoded.
    #[error("{0}")]
    MalformedRequest(String),
}

/// Convenience alias for handler return values.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::MalformedRequest(rejection.body_text())
    }
}

impl ApiError {
    fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            Self::Service(err) => match err.kind() {
                ErrorKind::NotFound => (StatusCode::NOT_FOUND, "resource_not_found", err.to_string()),
                ErrorKind::Duplicate => (StatusCode::CONFLICT, "duplicate_resource", err.to_string()),
                ErrorKind::Validation => {
                    (StatusCode::BAD_REQUEST, "validation_error", err.to_string())
                }
                ErrorKind::BusinessRule => (
                    StatusCode::BAD_REQUEST,
                    "business_rule_violation",
                    err.to_string(),
                ),
                ErrorKind::Internal => {
                    tracing::error!(error = %err, "internal error while handling request");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal_server_error",
                        "An unexpected error occurred".to_owned(),
                    )
                }
            },
            Self::Validation(message) => {
                (StatusCode::BAD_REQUEST, "validation_error", message.clone())
            }
            Self::MalformedRequest(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "request_validation_error",
                message.clone(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.classify();
        let body = json!({
            "success": false,
            "error": {
                "code": code,
                "message": message,
            },
        });
        (status, Json(body)).into_response()
    }
}
