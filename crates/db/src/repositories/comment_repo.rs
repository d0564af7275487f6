//! Repository for the `comments` table.

use sqlx::PgPool;
use taskboard_core::types::new_id;

use crate::models::comment::{Comment, CreateComment};
use crate::MAX_LIST_ROWS;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, task_id, user_id, text, created_at";

/// Provides create/list/delete operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a new comment, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateComment) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (id, task_id, user_id, text)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(new_id())
            .bind(&input.task_id)
            .bind(&input.user_id)
            .bind(&input.text)
            .fetch_one(pool)
            .await
    }

    /// List comments in creation order, optionally restricted to one task.
    pub async fn list(pool: &PgPool, task_id: Option<&str>) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments
             WHERE ($1::TEXT IS NULL OR task_id = $1)
             ORDER BY created_at ASC, id ASC
             LIMIT $2"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(task_id)
            .bind(MAX_LIST_ROWS)
            .fetch_all(pool)
            .await
    }

    /// Delete a comment by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every comment on a task. Returns the number of rows removed.
    pub async fn delete_by_task(pool: &PgPool, task_id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE task_id = $1")
            .bind(task_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
