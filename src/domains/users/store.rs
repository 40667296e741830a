//! User account and session store.
//!
//! Accounts live in the `users` table; sessions are rows in `access_tokens`
//! keyed by the token fingerprint, with a server-side expiry. The tools
//! domain only ever sees the resulting active user id.

use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use super::auth;
use super::error::UserError;
use super::model::{User, UserCreate};
use crate::core::error::{Error, Result};

/// Store for user accounts and their session tokens.
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
    token_lifetime_secs: i64,
}

impl UserStore {
    /// Create a store over an existing pool.
    pub fn new(pool: SqlitePool, token_lifetime_secs: i64) -> Self {
        Self {
            pool,
            token_lifetime_secs,
        }
    }

    /// Register a new account.
    ///
    /// Emails are normalized to lowercase; a duplicate surfaces as
    /// [`UserError::EmailTaken`].
    pub async fn create(&self, payload: UserCreate) -> Result<User> {
        payload.validate()?;
        let email = payload.email.trim().to_lowercase();

        let user = User {
            id: Uuid::new_v4(),
            email: email.clone(),
            password_hash: auth::hash_password(&payload.password),
            is_active: true,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO users (id, email, password_hash, is_active, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.is_active)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                UserError::EmailTaken(email).into()
            }
            err => Error::from(err),
        })?;

        debug!(user_id = %user.id, "registered user");
        Ok(user)
    }

    /// Verify credentials and issue a session token.
    ///
    /// An unknown email, a wrong password, and an inactive account are all
    /// reported as [`UserError::InvalidCredentials`].
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let email = email.trim().to_lowercase();
        let user = self
            .get_by_email(&email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !auth::verify_password(password, &user.password_hash) || !user.is_active {
            return Err(UserError::InvalidCredentials.into());
        }

        self.purge_expired().await?;

        let token = auth::generate_token();
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO access_tokens (token_hash, user_id, created_at, expires_at) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(auth::token_fingerprint(&token))
        .bind(user.id)
        .bind(now)
        .bind(now + Duration::seconds(self.token_lifetime_secs))
        .execute(&self.pool)
        .await?;

        debug!(user_id = %user.id, "issued session token");
        Ok(token)
    }

    /// Resolve a raw session token to its active user.
    pub async fn user_for_token(&self, token: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            "SELECT u.id, u.email, u.password_hash, u.is_active, u.created_at \
             FROM users u \
             JOIN access_tokens t ON t.user_id = u.id \
             WHERE t.token_hash = ? AND t.expires_at > ? AND u.is_active = ?",
        )
        .bind(auth::token_fingerprint(token))
        .bind(Utc::now())
        .bind(true)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or_else(|| UserError::Unauthorized.into())
    }

    /// Revoke a session token. Revoking an unknown token is a no-op.
    pub async fn revoke(&self, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM access_tokens WHERE token_hash = ?")
            .bind(auth::token_fingerprint(token))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, is_active, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn purge_expired(&self) -> Result<()> {
        sqlx::query("DELETE FROM access_tokens WHERE expires_at <= ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
