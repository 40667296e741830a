//! Server-rendered HTML routes.
//!
//! These handlers drive the same stores as the JSON API but answer with
//! HTML pages and redirects. Unauthenticated requests are sent to the login
//! page instead of receiving a 401.

use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::StatusCode;
use axum::http::header;
use axum::http::request::Parts;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use uuid::Uuid;

use super::pages;
use crate::core::error::{Error, Result};
use crate::core::server::AppState;
use crate::domains::tools::{ToolDraft, ToolPatch};
use crate::domains::users::routes::Credentials;
use crate::domains::users::{CurrentUser, User, UserCreate, UserError, auth};

/// Build the HTML router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/search", get(search))
        .route("/create", get(create_form).post(create))
        .route("/edit/{tool_id}", get(edit_form).post(edit))
        .route("/delete/{tool_id}", post(delete))
        .route("/update_quantity/{tool_id}", post(update_quantity))
        .route("/login", get(login_form).post(login))
        .route("/register", get(register_form).post(register))
        .route("/logout", post(logout))
}

/// The authenticated user behind an HTML request.
///
/// Same boundary as [`CurrentUser`], but a missing or invalid session
/// redirects to `/login` rather than rejecting with a status code.
struct WebUser(User);

impl FromRequestParts<AppState> for WebUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Redirect> {
        CurrentUser::from_request_parts(parts, state)
            .await
            .map(|CurrentUser(user)| Self(user))
            .map_err(|_| Redirect::to("/login"))
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: String,
}

/// Form body shared by the create and edit pages. The HTML form does not
/// expose the image field; the JSON API does.
#[derive(Debug, Deserialize)]
struct ToolForm {
    name: String,
    description: String,
    quantity: i64,
}

#[derive(Debug, Deserialize)]
struct QuantityForm {
    action: String,
}

/// Apply a quantity action, clamping the result at a floor of zero.
///
/// The clamp lives here, in the handler layer; the store's own validation
/// still rejects negative quantities defensively.
fn adjust_quantity(quantity: i64, action: &str) -> i64 {
    let adjusted = if action == "increment" {
        quantity + 1
    } else {
        quantity - 1
    };
    adjusted.max(0)
}

async fn index(State(state): State<AppState>, WebUser(user): WebUser) -> Result<Html<String>> {
    let tools = state.tools.list(user.id, None).await?;
    Ok(Html(pages::index_page(&user.email, &tools, None)))
}

async fn search(
    State(state): State<AppState>,
    WebUser(user): WebUser,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>> {
    let tools = state.tools.search(user.id, &params.query).await?;
    Ok(Html(pages::index_page(
        &user.email,
        &tools,
        Some(&params.query),
    )))
}

async fn create_form(WebUser(user): WebUser) -> Html<String> {
    Html(pages::tool_form_page(&user.email, None))
}

async fn create(
    State(state): State<AppState>,
    WebUser(user): WebUser,
    Form(form): Form<ToolForm>,
) -> Result<Redirect> {
    let draft = ToolDraft {
        name: form.name,
        quantity: form.quantity,
        description: form.description,
        image: String::new(),
    };
    state.tools.create(user.id, draft).await?;
    Ok(Redirect::to("/"))
}

async fn edit_form(
    State(state): State<AppState>,
    WebUser(user): WebUser,
    Path(tool_id): Path<Uuid>,
) -> Result<Html<String>> {
    let tool = state.tools.get_by_id(user.id, tool_id).await?;
    Ok(Html(pages::tool_form_page(&user.email, Some(&tool))))
}

async fn edit(
    State(state): State<AppState>,
    WebUser(user): WebUser,
    Path(tool_id): Path<Uuid>,
    Form(form): Form<ToolForm>,
) -> Result<Redirect> {
    let mut tool = state.tools.get_by_id(user.id, tool_id).await?;
    let patch = ToolPatch {
        name: Some(form.name),
        description: Some(form.description),
        quantity: Some(form.quantity),
        image: None,
    };
    patch.apply(&mut tool);
    state.tools.update(user.id, &tool).await?;
    Ok(Redirect::to("/"))
}

async fn delete(
    State(state): State<AppState>,
    WebUser(user): WebUser,
    Path(tool_id): Path<Uuid>,
) -> Result<Redirect> {
    state.tools.delete(user.id, tool_id).await?;
    Ok(Redirect::to("/"))
}

async fn update_quantity(
    State(state): State<AppState>,
    WebUser(user): WebUser,
    Path(tool_id): Path<Uuid>,
    Form(form): Form<QuantityForm>,
) -> Result<Redirect> {
    let mut tool = state.tools.get_by_id(user.id, tool_id).await?;
    let patch = ToolPatch {
        quantity: Some(adjust_quantity(tool.quantity, &form.action)),
        ..ToolPatch::default()
    };
    patch.apply(&mut tool);
    state.tools.update(user.id, &tool).await?;
    Ok(Redirect::to("/"))
}

async fn login_form() -> Html<String> {
    Html(pages::login_page(None))
}

async fn login(
    State(state): State<AppState>,
    Form(credentials): Form<Credentials>,
) -> Result<Response> {
    match state
        .users
        .login(&credentials.email, &credentials.password)
        .await
    {
        Ok(token) => {
            let cookie = auth::session_cookie(&token, state.config.auth.token_lifetime_secs);
            Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response())
        }
        Err(Error::User(UserError::InvalidCredentials)) => Ok((
            StatusCode::UNAUTHORIZED,
            Html(pages::login_page(Some("Invalid email or password."))),
        )
            .into_response()),
        Err(err) => Err(err),
    }
}

async fn register_form() -> Html<String> {
    Html(pages::register_page(None))
}

async fn register(
    State(state): State<AppState>,
    Form(payload): Form<UserCreate>,
) -> Result<Response> {
    match state.users.create(payload).await {
        Ok(_) => Ok(Redirect::to("/login").into_response()),
        Err(Error::User(UserError::EmailTaken(_))) => Ok((
            StatusCode::CONFLICT,
            Html(pages::register_page(Some(
                "That email address is already registered.",
            ))),
        )
            .into_response()),
        Err(Error::User(UserError::Validation(message))) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(pages::register_page(Some(&message))),
        )
            .into_response()),
        Err(err) => Err(err),
    }
}

async fn logout(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> Result<impl IntoResponse> {
    if let Some(token) = auth::request_token(&headers) {
        state.users.revoke(&token).await?;
    }
    Ok((
        [(header::SET_COOKIE, auth::clear_session_cookie())],
        Redirect::to("/login"),
    ))
}
