//! Session and credential primitives.
//!
//! Passwords are stored as salted, iterated SHA-256 digests; session tokens
//! are random 32-byte values handed to the client base64url-encoded and kept
//! in the database only as a SHA-256 fingerprint. Comparisons against stored
//! digests are constant-time.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use super::error::UserError;
use super::model::User;
use crate::core::error::Error;
use crate::core::server::AppState;

/// Name of the session cookie set on login.
pub const SESSION_COOKIE: &str = "tool_session";

const SALT_BYTES: usize = 16;
const TOKEN_BYTES: usize = 32;
const PASSWORD_ROUNDS: u32 = 100_000;

/// Hash a password with a fresh random salt.
///
/// The output is `base64url(salt) $ base64url(digest)`.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_BYTES];
    rand::rng().fill_bytes(&mut salt);
    let digest = digest_password(password, &salt);
    format!(
        "{}${}",
        URL_SAFE_NO_PAD.encode(salt),
        URL_SAFE_NO_PAD.encode(digest)
    )
}

/// Verify a password against a stored hash in constant time.
///
/// Malformed stored values verify as false rather than erroring.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt, expected)) = stored.split_once('$') else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (URL_SAFE_NO_PAD.decode(salt), URL_SAFE_NO_PAD.decode(expected))
    else {
        return false;
    };
    let actual = digest_password(password, &salt);
    actual.as_slice().ct_eq(expected.as_slice()).into()
}

fn digest_password(password: &str, salt: &[u8]) -> Vec<u8> {
    let mut digest = Sha256::new()
        .chain_update(salt)
        .chain_update(password.as_bytes())
        .finalize();
    for _ in 1..PASSWORD_ROUNDS {
        digest = Sha256::new()
            .chain_update(salt)
            .chain_update(&digest)
            .finalize();
    }
    digest.to_vec()
}

/// Generate a fresh session token for the wire.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// The database-side fingerprint of a token. Raw tokens are never stored.
pub fn token_fingerprint(token: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(token.as_bytes()))
}

/// Build the `Set-Cookie` value for a new session.
pub fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}")
}

/// Build the `Set-Cookie` value that clears the session.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Extract the session token from a request, bearer header first.
pub fn request_token(headers: &HeaderMap) -> Option<String> {
    bearer_token(headers).or_else(|| cookie_token(headers))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    raw.strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// The authenticated, active user behind the current request.
///
/// This is the boundary the rest of the application trusts: handlers taking
/// a `CurrentUser` never see a request without a valid session.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Error> {
        let token = request_token(&parts.headers).ok_or(UserError::Unauthorized)?;
        let user = state.users.user_for_token(&token).await?;
        Ok(Self(user))
    }
}
