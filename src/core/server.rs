//! HTTP application assembly and lifecycle.
//!
//! Builds the axum router from the domain routers, wires the shared state
//! and middleware layers, and runs the accept loop.

use std::sync::Arc;

use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::config::Config;
use super::database::Database;
use super::error::Result;
use crate::domains::tools::ToolStore;
use crate::domains::users::UserStore;
use crate::domains::{tools, users, web};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The tool record store.
    pub tools: ToolStore,

    /// The user account and session store.
    pub users: UserStore,

    /// Server configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Build the state from a connected database and configuration.
    pub fn new(db: &Database, config: Config) -> Self {
        Self {
            tools: ToolStore::new(db.pool().clone()),
            users: UserStore::new(db.pool().clone(), config.auth.token_lifetime_secs),
            config: Arc::new(config),
        }
    }
}

/// Build the full application router.
pub fn build_router(state: AppState) -> Router {
    let mut app = Router::new()
        .merge(tools::routes::router())
        .merge(users::routes::router())
        .merge(web::routes::router())
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http());

    if state.config.http.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app.with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: AppState) -> Result<()> {
    let addr = format!("{}:{}", state.config.http.host, state.config.http.port);
    let cors_status = if state.config.http.enable_cors {
        "enabled"
    } else {
        "disabled"
    };

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Ready - listening on {addr} (CORS {cors_status})");
    info!("  → JSON API: /api/tool");
    info!("  → Web app:  /");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    async fn test_app() -> Router {
        let db = Database::in_memory().await.expect("in-memory database");
        build_router(AppState::new(&db, Config::default()))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = test_app().await;
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_api_requires_authentication() {
        let app = test_app().await;
        let response = app
            .oneshot(Request::get("/api/tool").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_web_redirects_anonymous_to_login() {
        let app = test_app().await;
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn test_register_login_create_get_round_trip() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(
                Request::post("/auth/register")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"email":"user@example.com","password":"correct horse"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(
                Request::post("/auth/login")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(
                        "email=user%40example.com&password=correct%20horse",
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let token = body_json(response).await["access_token"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(
                Request::post("/api/tool")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::from(r#"{"name":"Hammer","quantity":5}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["name"], "Hammer");
        let tool_id = created["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(
                Request::get(format!("/api/tool/{tool_id}"))
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let fetched = body_json(response).await;
        assert_eq!(fetched["quantity"], 5);
        assert_eq!(fetched["description"], "");
    }

    #[tokio::test]
    async fn test_get_missing_tool_is_404() {
        let app = test_app().await;

        app.clone()
            .oneshot(
                Request::post("/auth/register")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"email":"user@example.com","password":"correct horse"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::post("/auth/login")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(
                        "email=user%40example.com&password=correct%20horse",
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        let token = body_json(response).await["access_token"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .oneshot(
                Request::get(format!("/api/tool/{}", uuid::Uuid::new_v4()))
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "tool_not_found");
    }
}
