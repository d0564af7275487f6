//! Route definitions for the `/metrics` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::metrics;
use crate::state::AppState;

/// Routes mounted at `/metrics`.
///
/// ```text
/// GET /project/{id}   -> project
/// GET /overview       -> overview
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/project/{id}", get(metrics::project))
        .route("/overview", get(metrics::overview))
}
