//! Repository for the `tasks` table.

use sqlx::PgPool;
use taskboard_core::task::{StatusTransition, TaskStatus};
use taskboard_core::types::{new_id, Timestamp};

use crate::models::task::{CreateTask, Task, TaskFilter, UpdateTask};
use crate::MAX_LIST_ROWS;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, project_id, assigned_to, status, priority, \
                       created_at, updated_at, completed_at";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task in `TODO`, returning the created row.
    ///
    /// Project and assignee are not checked here; callers verify them first.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (id, title, description, project_id, assigned_to, status, priority)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(new_id())
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.project_id)
            .bind(&input.assigned_to)
            .bind(TaskStatus::Todo.as_str())
            .bind(input.priority.unwrap_or_default().as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a task by its ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Check whether a task with the given ID exists.
    pub async fn exists(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM tasks WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// List tasks matching every set field of `filter`, in creation order,
    /// capped at [`MAX_LIST_ROWS`].
    pub async fn list(pool: &PgPool, filter: &TaskFilter) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE ($1::TEXT IS NULL OR project_id = $1)
               AND ($2::TEXT IS NULL OR assigned_to = $2)
               AND ($3::TEXT IS NULL OR status = $3)
             ORDER BY created_at ASC, id ASC
             LIMIT $4"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(&filter.project_id)
            .bind(&filter.assigned_to)
            .bind(filter.status.map(TaskStatus::as_str))
            .bind(MAX_LIST_ROWS)
            .fetch_all(pool)
            .await
    }

    /// Every task in a project, uncapped. Used by the metrics scan.
    pub async fn list_all_by_project(
        pool: &PgPool,
        project_id: &str,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE project_id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Every task currently in `status`, uncapped. Used by the metrics scan.
    pub async fn list_all_by_status(
        pool: &PgPool,
        status: TaskStatus,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE status = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(status.as_str())
            .fetch_all(pool)
            .await
    }

    /// Update a task. Only non-`None` fields in `input` are applied and
    /// `updated_at` is set to `now`.
    ///
    /// When `transition` is given its status and `completed_at` are written
    /// too; otherwise both columns keep their stored values.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &UpdateTask,
        transition: Option<StatusTransition>,
        now: Timestamp,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                assigned_to = COALESCE($4, assigned_to),
                priority = COALESCE($5, priority),
                status = COALESCE($6, status),
                completed_at = CASE WHEN $6::TEXT IS NULL THEN completed_at
                                    ELSE $7::TIMESTAMPTZ END,
                updated_at = $8
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.assigned_to)
            .bind(input.priority.map(|p| p.as_str()))
            .bind(transition.map(|t| t.status.as_str()))
            .bind(transition.and_then(|t| t.completed_at))
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    /// Write a status transition and nothing else.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_status(
        pool: &PgPool,
        id: &str,
        transition: StatusTransition,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                status = $2,
                completed_at = $3,
                updated_at = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(transition.status.as_str())
            .bind(transition.completed_at)
            .bind(transition.updated_at)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task by ID. Returns `true` if a row was removed.
    ///
    /// Comments are not touched here; see
    /// [`crate::repositories::CommentRepo::delete_by_task`].
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every task in a project. Returns the number of rows removed.
    pub async fn delete_by_project(pool: &PgPool, project_id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE project_id = $1")
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Count all tasks.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
