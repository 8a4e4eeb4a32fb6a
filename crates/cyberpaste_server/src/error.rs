//! HTTP error mapping for API handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cyberpaste_core::AppError;
use serde_json::json;

/// Wrapper routing [`AppError`] values to HTTP responses.
pub struct HttpError(pub AppError);

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.0 {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unavailable(ref msg) => {
                tracing::warn!("Backend unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Backend temporarily unavailable".to_string(),
                )
            }
            AppError::DuplicateId(ref id) => {
                // Generator collision resistance violated; never swallowed.
                tracing::error!("Paste id collision on '{}'", id);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            other => {
                tracing::error!("Internal error: {:?}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
