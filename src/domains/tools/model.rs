//! Tool record models.
//!
//! `Tool` is the stored record, `ToolDraft` the creation payload, and
//! `ToolPatch` a partial update where only supplied fields overwrite the
//! target record.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::error::ToolError;

/// A tool record, scoped to its owning user.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Tool {
    /// Unique identifier, assigned at creation.
    pub id: Uuid,

    /// Display name, never empty.
    pub name: String,

    /// Number of items on hand, never negative.
    pub quantity: i64,

    /// Free-text description.
    pub description: String,

    /// Image URI or path.
    pub image: String,

    /// The user this record belongs to. Immutable after creation.
    pub owner_id: Uuid,
}

impl Tool {
    /// Check the record invariants: non-empty name, non-negative quantity.
    pub fn validate(&self) -> Result<(), ToolError> {
        if self.name.is_empty() {
            return Err(ToolError::validation("name must not be empty"));
        }
        if self.quantity < 0 {
            return Err(ToolError::validation("quantity must not be negative"));
        }
        Ok(())
    }
}

/// Payload for creating a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDraft {
    pub name: String,

    pub quantity: i64,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub image: String,
}

impl ToolDraft {
    /// Build a full record from this draft: fresh id, server-assigned owner,
    /// text fields trimmed.
    pub fn into_tool(self, owner_id: Uuid) -> Tool {
        Tool {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            quantity: self.quantity,
            description: self.description.trim().to_string(),
            image: self.image.trim().to_string(),
            owner_id,
        }
    }
}

/// Partial update for a tool.
///
/// Each field is independently optional; `None` leaves the target field
/// unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolPatch {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl ToolPatch {
    /// Overwrite the supplied fields on `tool`, leaving the rest untouched.
    pub fn apply(&self, tool: &mut Tool) {
        if let Some(name) = &self.name {
            tool.name = name.clone();
        }
        if let Some(quantity) = self.quantity {
            tool.quantity = quantity;
        }
        if let Some(description) = &self.description {
            tool.description = description.clone();
        }
        if let Some(image) = &self.image {
            tool.image = image.clone();
        }
    }
}
