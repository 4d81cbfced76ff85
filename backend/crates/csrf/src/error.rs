//! CSRF Error Types
//!
//! CSRF-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type CsrfResult<T> = Result<T, CsrfError>;

#[derive(Debug, Error)]
pub enum CsrfError {
    /// Supplied token missing, or not equal to the session's pending token
    #[error("Invalid CSRF token")]
    InvalidCsrfToken,

    /// A CSRF stage ran without the session layer in front of it
    #[error("Session context missing from request")]
    SessionMissing,

    /// Request body exceeded the limit while looking for a body token
    #[error("Request body too large")]
    PayloadTooLarge,

    /// Request body stream failed before it could be read
    #[error("Request body could not be read")]
    BodyUnreadable,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CsrfError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CsrfError::InvalidCsrfToken => StatusCode::FORBIDDEN,
            CsrfError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            CsrfError::BodyUnreadable => StatusCode::BAD_REQUEST,
            CsrfError::SessionMissing | CsrfError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CsrfError::InvalidCsrfToken => ErrorKind::Forbidden,
            CsrfError::PayloadTooLarge => ErrorKind::PayloadTooLarge,
            CsrfError::BodyUnreadable => ErrorKind::BadRequest,
            CsrfError::SessionMissing | CsrfError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError; server-side details stay out of the message
    pub fn to_app_error(&self) -> AppError {
        match self {
            CsrfError::InvalidCsrfToken => AppError::forbidden(self.to_string())
                .with_action("Request a new token and retry"),
            CsrfError::PayloadTooLarge => AppError::payload_too_large(self.to_string()),
            CsrfError::BodyUnreadable => AppError::bad_request(self.to_string()),
            CsrfError::SessionMissing | CsrfError::Internal(_) => {
                AppError::internal("Internal server error")
            }
        }
    }

    fn log(&self) {
        match self {
            CsrfError::InvalidCsrfToken => {
                tracing::warn!("Rejected request with invalid CSRF token");
            }
            CsrfError::SessionMissing => {
                tracing::error!("CSRF stage invoked without session layer");
            }
            CsrfError::Internal(msg) => {
                tracing::error!(message = %msg, "CSRF internal error");
            }
            _ => {
                tracing::debug!(error = %self, "CSRF error");
            }
        }
    }
}

impl From<CsrfError> for AppError {
    fn from(err: CsrfError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for CsrfError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
