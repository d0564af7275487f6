pub mod comment;
pub mod health;
pub mod metrics;
pub mod project;
pub mod task;
pub mod user;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                   API root (message, version, endpoints)
///
/// /users                              list, create
/// /users/{id}                         get, update, delete
///
/// /projects                           list, create
/// /projects/{id}                      get, update, delete (cascades to tasks)
///
/// /tasks                              list (?project_id&assigned_to&status), create
/// /tasks/{id}                         get, update, delete (cascades to comments)
/// /tasks/{id}/status                  set status (PATCH)
///
/// /comments                           list (?task_id), create
/// /comments/{id}                      delete
///
/// /metrics/project/{id}               per-project completion metrics
/// /metrics/overview                   store-wide metrics
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root::index))
        .nest("/users", user::router())
        .nest("/projects", project::router())
        .nest("/tasks", task::router())
        .nest("/comments", comment::router())
        .nest("/metrics", metrics::router())
}
