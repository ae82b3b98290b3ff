//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mingle_core::MatchError;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to HTTP clients as structured JSON.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested user id does not exist in the store.
    #[error("{0}")]
    NotFound(String),
}

impl From<MatchError> for ApiError {
    fn from(error: MatchError) -> Self {
        match error {
            MatchError::UnknownUser { .. } => Self::NotFound(error.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
