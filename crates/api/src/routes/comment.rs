//! Route definitions for the `/comments` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::comment;
use crate::state::AppState;

/// Routes mounted at `/comments`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(comment::list).post(comment::create))
        .route("/{id}", delete(comment::delete))
}
