//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub const INVALID_UUID: &str = "Invalid uuid";
pub const PERSON_NOT_FOUND: &str = "Person not found.";
pub const PERSON_UNAVAILABLE: &str = "Person could not be retrieved";

/// An error returned by an API handler. The message is user-visible and
/// never carries internal details.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid_uuid() -> Self {
        Self::BadRequest(INVALID_UUID.to_string())
    }

    pub fn person_not_found() -> Self {
        Self::NotFound(PERSON_NOT_FOUND.to_string())
    }

    pub fn person_unavailable() -> Self {
        Self::Internal(PERSON_UNAVAILABLE.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}
