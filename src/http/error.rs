//! JSON error bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{core::store::StoreError, runtime::handle::RuntimeError};

/// Error rendered as `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status to send.
    pub status: StatusCode,
    /// Text placed under `error`.
    pub message: String,
}

impl ApiError {
    /// Error with an explicit status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 with `message`.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Maps a runtime failure; `persist_message` is shown when storage failed.
    pub fn from_runtime(err: RuntimeError, persist_message: &str) -> Self {
        match err {
            RuntimeError::Validation(e) => Self::bad_request(e.to_string()),
            RuntimeError::Store(e @ StoreError::DuplicateKey(_)) => Self::bad_request(e.to_string()),
            RuntimeError::Store(e @ StoreError::NotFound(_)) => {
                Self::new(StatusCode::NOT_FOUND, e.to_string())
            }
            RuntimeError::Persist(_) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, persist_message),
            e @ RuntimeError::ChannelClosed => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}

impl From<RuntimeError> for ApiError {
    fn from(err: RuntimeError) -> Self {
        Self::from_runtime(err, "Failed to save airport data")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
