//! User-specific error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::core::error::json_error;

/// Errors that can occur during account and session operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// Another account already uses this email address.
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    /// The supplied email/password pair does not match an active account.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No valid session accompanies the request.
    #[error("Not authenticated")]
    Unauthorized,

    /// A field constraint was violated.
    #[error("Invalid user: {0}")]
    Validation(String),
}

impl UserError {
    /// Create a new validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::EmailTaken(_) => (StatusCode::CONFLICT, "email_taken"),
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "user_invalid"),
        };
        json_error(status, code, self.to_string())
    }
}
