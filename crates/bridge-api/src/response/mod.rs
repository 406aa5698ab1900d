//! Response types and error handling for the status API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bridge_common::{AppError, ErrorResponse};
use thiserror::Error;
use tracing::error;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("No server at index {0}")]
    ServerNotFound(usize),

    #[error("Unknown event kind: {0}")]
    UnknownEventKind(String),
}

impl ApiError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::App(e) => StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::ServerNotFound(_) => StatusCode::NOT_FOUND,
            Self::UnknownEventKind(_) => StatusCode::BAD_REQUEST,
        }
    }

    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::ServerNotFound(_) => "UNKNOWN_SERVER",
            Self::UnknownEventKind(_) => "UNKNOWN_EVENT_KIND",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
        }

        let body = ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
