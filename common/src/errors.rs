//! Application error type.
//!
//! Every request failure ends up here and is rendered as a plain-text body
//! carrying the error message, with the matching HTTP status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Result alias used across the services.
pub type AppResult<T> = Result<T, AppError>;

/// Request-terminating errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required parameter is missing or the request body is malformed.
    #[error("{0}")]
    BadRequest(String),

    /// Query execution or row decoding failed in the database layer.
    #[error("{0}")]
    Database(String),

    /// Anything else that went wrong while producing the response.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "request rejected");
        }
        (status, self.to_string()).into_response()
    }
}
