#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use taskboard_api::config::ServerConfig;
use taskboard_api::router::build_app_router;
use taskboard_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses a single explicit CORS origin and a 30-second request timeout. The
/// database URL is unused because the pool is supplied by `sqlx::test`.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        database_url: String::new(),
        db_max_connections: 5,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_with_config(pool, test_config())
}

/// Same as [`build_test_app`] with a caller-supplied configuration.
pub fn build_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config).expect("test router should build")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

/// Create a user through the API and return its id.
pub async fn create_user(pool: &PgPool, name: &str) -> String {
    let app = build_test_app(pool.clone());
    let json = body_json(
        post_json(
            app,
            "/api/users",
            serde_json::json!({"name": name, "email": format!("{}@example.com", name.to_lowercase())}),
        )
        .await,
    )
    .await;
    json["id"].as_str().unwrap().to_string()
}

/// Create a project owned by `owner_id` and return its id.
pub async fn create_project(pool: &PgPool, owner_id: &str, name: &str) -> String {
    let app = build_test_app(pool.clone());
    let json = body_json(
        post_json(
            app,
            "/api/projects",
            serde_json::json!({"name": name, "description": "test project", "owner_id": owner_id}),
        )
        .await,
    )
    .await;
    json["id"].as_str().unwrap().to_string()
}

/// Create a task in `project_id` and return its JSON.
pub async fn create_task(pool: &PgPool, project_id: &str, title: &str) -> serde_json::Value {
    let app = build_test_app(pool.clone());
    body_json(
        post_json(
            app,
            "/api/tasks",
            serde_json::json!({"title": title, "description": "test task", "project_id": project_id}),
        )
        .await,
    )
    .await
}

/// Set a task's status through the dedicated endpoint and return its JSON.
pub async fn set_status(pool: &PgPool, task_id: &str, status: &str) -> serde_json::Value {
    let app = build_test_app(pool.clone());
    body_json(
        patch_json(
            app,
            &format!("/api/tasks/{task_id}/status"),
            serde_json::json!({"status": status}),
        )
        .await,
    )
    .await
}
