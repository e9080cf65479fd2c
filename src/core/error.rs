//! Error type system for the fitleveling backend
//!
//! One typed error enum for the whole crate, with:
//! - HTTP status code mapping
//! - Generic user-facing messages (internal detail never leaves the server)
//! - Automatic response conversion for Axum handlers

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Main error type for the fitleveling backend
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Email not found or password mismatch. The two cases are collapsed
    /// on purpose so callers cannot probe which emails are registered.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Missing or invalid access token on a protected route.
    #[error("authentication failed: {0}")]
    Unauthorized(String),

    /// The user store itself failed (connection, pool, query execution).
    /// Kept separate from `InvalidCredentials` so the handler layer can
    /// answer with a server error instead of a rejection.
    #[error("user store unavailable: {0}")]
    StoreUnavailable(String),

    /// The signing secret is absent or signing failed. A startup-class
    /// fault, but checked again at issuance time so the request fails with
    /// a server error rather than carrying an unsigned token.
    #[error("signing configuration error: {0}")]
    SigningConfig(String),

    /// The password hashing library failed (e.g. a malformed stored hash).
    #[error("password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("resource not found: {0}")]
    NotFound(String),
}

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        AppError::StoreUnavailable(err.to_string())
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::StoreUnavailable(err.to_string())
    }
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,

            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,

            AppError::NotFound(_) => StatusCode::NOT_FOUND,

            AppError::StoreUnavailable(_) | AppError::SigningConfig(_) | AppError::Hashing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error kind name for structured logging
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "InvalidCredentials",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::StoreUnavailable(_) => "StoreUnavailable",
            AppError::SigningConfig(_) => "SigningConfig",
            AppError::Hashing(_) => "Hashing",
            AppError::InvalidRequest(_) => "InvalidRequest",
            AppError::NotFound(_) => "NotFound",
        }
    }

    /// The message shown to the client.
    ///
    /// Credential failures share one fixed message regardless of which
    /// field was wrong, and every server-side fault collapses to a generic
    /// message. Only request-level validation errors carry their own text.
    pub fn public_message(&self) -> String {
        match self {
            AppError::InvalidCredentials => "Email hoặc mật khẩu không đúng".to_string(),
            AppError::Unauthorized(_) => "Không được phép truy cập".to_string(),
            AppError::StoreUnavailable(_) | AppError::SigningConfig(_) | AppError::Hashing(_) => {
                "Lỗi server".to_string()
            }
            AppError::InvalidRequest(message) | AppError::NotFound(message) => message.clone(),
        }
    }
}

/// Error response body for API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Implement IntoResponse for AppError to enable automatic error handling in Axum
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        // The full error is logged server-side; the response body only
        // carries the generic message.
        tracing::error!(
            kind = self.kind(),
            status_code = %status_code,
            "Request failed: {}",
            self
        );

        let body = ErrorBody {
            message: self.public_message(),
        };

        (status_code, Json(body)).into_response()
    }
}

/// Result type alias for operations that can fail with AppError
pub type Result<T> = std::result::Result<T, AppError>;
