//! Tool-specific error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use uuid::Uuid;

use crate::core::error::json_error;

/// Errors that can occur during tool record operations.
///
/// A single flat enum rather than a hierarchy: `NotFound` covers both absent
/// records and records owned by someone else, so callers cannot distinguish
/// the two cases.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No record with this id is visible to the caller.
    #[error("Tool not found: {0}")]
    NotFound(Uuid),

    /// The backing store reported a uniqueness conflict for this id.
    #[error("Tool already exists: {0}")]
    AlreadyExists(Uuid),

    /// A field constraint was violated.
    #[error("Invalid tool: {0}")]
    Validation(String),
}

impl ToolError {
    /// Create a new validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl IntoResponse for ToolError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "tool_not_found"),
            Self::AlreadyExists(_) => (StatusCode::CONFLICT, "tool_exists"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "tool_invalid"),
        };
        json_error(status, code, self.to_string())
    }
}
