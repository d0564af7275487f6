//! Shared response body types for API handlers.

use serde::Serialize;

/// `{ "message": "..." }` body returned by delete endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// `"<Entity> deleted successfully"`.
    pub fn deleted(entity: &str) -> Self {
        Self {
            message: format!("{entity} deleted successfully"),
        }
    }
}
