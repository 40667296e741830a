//! Error types and handling for the application.
//!
//! This module defines a unified error type that can represent errors from
//! all domains and external dependencies, providing consistent error handling
//! across the entire application. The HTTP status mapping lives at this
//! boundary: domain errors carry their own responses, everything else is an
//! opaque 500.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// A specialized Result type for application operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the application.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error originating from the users domain.
    #[error("User error: {0}")]
    User(#[from] crate::domains::users::UserError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backing-store failures, propagated untranslated.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O errors from network or file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal errors that should not occur under normal operation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::Tool(err) => err.into_response(),
            Self::User(err) => err.into_response(),
            err => {
                tracing::error!("request failed: {err}");
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        }
    }
}

/// Build a JSON error response body: `{"error": {"code", "message"}}`.
pub(crate) fn json_error(status: StatusCode, code: &str, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": { "code": code, "message": message.into() }
        })),
    )
        .into_response()
}
