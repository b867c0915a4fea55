//! Error rendering.
//!
//! Maps every failure a handler can hit to an HTTP status and a JSON body
//! of the form `{"status": "...", "error": "..."}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tonic::Code;

use crate::backend::BackendError;

/// Errors surfaced to HTTP callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input, rejected before any backend call.
    #[error("{0}")]
    InvalidRequest(String),

    /// The backend call failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The response body could not be encoded.
    #[error("failed to encode response: {0}")]
    Render(#[from] serde_json::Error),
}

/// JSON body written for every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

impl ApiError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ApiError::InvalidRequest(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Backend(err) => match err.code() {
                Some(Code::NotFound) => StatusCode::NOT_FOUND,
                Some(Code::InvalidArgument) => StatusCode::BAD_REQUEST,
                Some(Code::Unavailable) => StatusCode::SERVICE_UNAVAILABLE,
                Some(Code::DeadlineExceeded) => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::BAD_GATEWAY,
            },
            ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn status_text(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) => "Invalid request.",
            ApiError::Backend(err) => match err.code() {
                Some(Code::NotFound) => "Resource not found.",
                Some(Code::InvalidArgument) => "Rejected by backend.",
                Some(Code::Unavailable) => "Backend unavailable.",
                Some(Code::DeadlineExceeded) => "Backend timed out.",
                _ => "Backend request failed.",
            },
            ApiError::Render(_) => "Error rendering response.",
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            status: self.status_text().to_string(),
            error: self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }
        (status, Json(self.body())).into_response()
    }
}
