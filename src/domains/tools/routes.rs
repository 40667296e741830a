//! JSON API routes for tools, mounted under `/api/tool`.
//!
//! The handlers resolve the authenticated user, invoke one store operation,
//! and map the typed failure onto an HTTP status: `NotFound` → 404,
//! `AlreadyExists` → 409, `Validation` → 422.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use super::model::{Tool, ToolDraft, ToolPatch};
use crate::core::error::Result;
use crate::core::server::AppState;
use crate::domains::users::CurrentUser;

/// Build the `/api/tool` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tool", get(list_tools).post(create_tool))
        .route("/api/tool/search", get(search_tools))
        .route(
            "/api/tool/{tool_id}",
            get(get_tool).patch(patch_tool).delete(delete_tool),
        )
}

#[derive(Debug, Deserialize)]
struct ListParams {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: String,
}

async fn create_tool(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(draft): Json<ToolDraft>,
) -> Result<(StatusCode, Json<Tool>)> {
    let tool = state.tools.create(user.id, draft).await?;
    Ok((StatusCode::CREATED, Json(tool)))
}

async fn get_tool(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(tool_id): Path<Uuid>,
) -> Result<Json<Tool>> {
    let tool = state.tools.get_by_id(user.id, tool_id).await?;
    Ok(Json(tool))
}

async fn list_tools(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Tool>>> {
    let tools = state.tools.list(user.id, params.name.as_deref()).await?;
    Ok(Json(tools))
}

async fn search_tools(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Tool>>> {
    let tools = state.tools.search(user.id, &params.query).await?;
    Ok(Json(tools))
}

async fn patch_tool(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(tool_id): Path<Uuid>,
    Json(patch): Json<ToolPatch>,
) -> Result<Json<Tool>> {
    let mut tool = state.tools.get_by_id(user.id, tool_id).await?;
    patch.apply(&mut tool);
    let tool = state.tools.update(user.id, &tool).await?;
    Ok(Json(tool))
}

async fn delete_tool(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(tool_id): Path<Uuid>,
) -> Result<StatusCode> {
    state.tools.delete(user.id, tool_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
