//! Account and session routes, mounted under `/auth`.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::json;

use super::auth;
use super::model::{PublicUser, UserCreate};
use crate::core::error::Result;
use crate::core::server::AppState;

/// Build the `/auth` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

/// Login form body, matching the HTML login form fields.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

async fn register(
    State(state): State<AppState>,
    Json(payload): Json<UserCreate>,
) -> Result<(StatusCode, Json<PublicUser>)> {
    let user = state.users.create(payload).await?;
    Ok((StatusCode::CREATED, Json(PublicUser::from(&user))))
}

async fn login(
    State(state): State<AppState>,
    Form(credentials): Form<Credentials>,
) -> Result<impl IntoResponse> {
    let token = state
        .users
        .login(&credentials.email, &credentials.password)
        .await?;
    let cookie = auth::session_cookie(&token, state.config.auth.token_lifetime_secs);
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "access_token": token, "token_type": "bearer" })),
    ))
}

async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<impl IntoResponse> {
    if let Some(token) = auth::request_token(&headers) {
        state.users.revoke(&token).await?;
    }
    Ok((
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, auth::clear_session_cookie())],
    ))
}
