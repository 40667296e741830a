//! User account models.
//!
//! The stored `User` row is kept separate from the `PublicUser` API view so
//! the password hash can never end up in a response body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::error::UserError;

/// A user account row.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// The externally visible view of a user.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            is_active: user.is_active,
        }
    }
}

/// Registration payload.
#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub password: String,
}

impl UserCreate {
    /// Check the account constraints before hashing and persisting.
    pub fn validate(&self) -> Result<(), UserError> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(UserError::validation("email address is not valid"));
        }
        if self.password.len() < 8 {
            return Err(UserError::validation(
                "password must be at least 8 characters",
            ));
        }
        Ok(())
    }
}
