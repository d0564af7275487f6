//! Comment entity model and DTO. Comments are never edited.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskboard_core::types::{DbId, Timestamp};

/// A comment row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub task_id: DbId,
    pub user_id: DbId,
    pub text: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new comment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComment {
    pub task_id: DbId,
    pub user_id: DbId,
    pub text: String,
}
