//! Handler for the API root.

use axum::Json;
use serde::Serialize;

/// Top-level resource paths advertised by the API root.
#[derive(Debug, Serialize)]
pub struct EndpointIndex {
    pub users: &'static str,
    pub projects: &'static str,
    pub tasks: &'static str,
    pub comments: &'static str,
    pub metrics: &'static str,
}

/// Response payload for `GET /api`.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub endpoints: EndpointIndex,
}

/// GET /api
pub async fn index() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Project Management API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: EndpointIndex {
            users: "/api/users",
            projects: "/api/projects",
            tasks: "/api/tasks",
            comments: "/api/comments",
            metrics: "/api/metrics",
        },
    })
}
