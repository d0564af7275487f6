//! Repository for the `users` table.

use sqlx::PgPool;
use taskboard_core::types::new_id;
use taskboard_core::validation::DEFAULT_AVATAR_COLOR;

use crate::models::user::{CreateUser, UpdateUser, User};
use crate::MAX_LIST_ROWS;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, avatar_color, created_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, name, email, avatar_color)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(new_id())
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.avatar_color.as_deref().unwrap_or(DEFAULT_AVATAR_COLOR))
            .fetch_one(pool)
            .await
    }

    /// Find a user by ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Check whether a user with the given ID exists.
    pub async fn exists(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// List users in creation order, capped at [`MAX_LIST_ROWS`].
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM users ORDER BY created_at ASC, id ASC LIMIT $1");
        sqlx::query_as::<_, User>(&query)
            .bind(MAX_LIST_ROWS)
            .fetch_all(pool)
            .await
    }

    /// Update a user. Only non-`None` fields in `input` are applied; no
    /// timestamp is touched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                avatar_color = COALESCE($4, avatar_color)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.avatar_color)
            .fetch_optional(pool)
            .await
    }

    /// Delete a user by ID. Returns `true` if a row was removed.
    ///
    /// Projects, tasks and comments referencing the user are left as-is.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count all users.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}

