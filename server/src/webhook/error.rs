//! Webhook Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failure exits of the verify-then-decode pipeline.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The request body could not be read to the end.
    #[error("Failed to read request body: {0}")]
    Read(#[from] std::io::Error),

    /// The signature did not match the body, or was not valid base64.
    #[error("Invalid signature")]
    InvalidSignature,

    /// The body is not JSON of the form `{"events": [...]}`.
    #[error("Invalid webhook payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl WebhookError {
    /// Whether the request should be treated as unauthenticated.
    pub const fn is_invalid_signature(&self) -> bool {
        matches!(self, Self::InvalidSignature)
    }

    /// Machine-readable error code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Read(_) => "READ_ERROR",
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::Decode(_) => "INVALID_PAYLOAD",
        }
    }

    /// HTTP status the receiver answers with.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Read(_) | Self::Decode(_) => StatusCode::BAD_REQUEST,
            Self::InvalidSignature => StatusCode::UNAUTHORIZED,
        }
    }
}

/// Error response body for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
        });

        (self.status(), body).into_response()
    }
}

/// Result type for webhook operations.
pub type WebhookResult<T> = Result<T, WebhookError>;
