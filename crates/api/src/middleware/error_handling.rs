//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error bodies. Infrastructure
//! failures are reported with a generic message only; their details stay in
//! the server logs.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use meets_core::errors::MeetError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps `MeetError` and implements `IntoResponse`, so handlers can
/// return `Result<Json<T>, AppError>` and use `?` on service calls.
#[derive(Debug)]
pub struct AppError(pub MeetError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            MeetError::Validation(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            MeetError::Conflict(_) => (StatusCode::CONFLICT, self.0.to_string()),
            MeetError::Authentication(_) => (StatusCode::UNAUTHORIZED, self.0.to_string()),
            MeetError::Authorization(_) => (StatusCode::FORBIDDEN, self.0.to_string()),
            MeetError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            MeetError::Timeout(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Service temporarily unavailable".to_string(),
            ),
            MeetError::Infrastructure(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<MeetError> for AppError {
    fn from(err: MeetError) -> Self {
        AppError(err)
    }
}
