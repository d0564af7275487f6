//! Handlers for the `/comments` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use taskboard_db::models::comment::{Comment, CreateComment};
use taskboard_db::repositories::{CommentRepo, TaskRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::query::CommentListParams;
use crate::response::MessageResponse;
use crate::state::AppState;

/// POST /api/comments
///
/// Both the task and the author must exist.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateComment>,
) -> AppResult<Json<Comment>> {
    if !TaskRepo::exists(&state.pool, &input.task_id).await? {
        return Err(AppError::not_found("Task", input.task_id));
    }
    if !UserRepo::exists(&state.pool, &input.user_id).await? {
        return Err(AppError::not_found("User", input.user_id));
    }

    let comment = CommentRepo::create(&state.pool, &input).await?;

    tracing::info!(
        comment_id = %comment.id,
        task_id = %comment.task_id,
        "Comment created"
    );

    Ok(Json(comment))
}

/// GET /api/comments?task_id=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CommentListParams>,
) -> AppResult<Json<Vec<Comment>>> {
    let task_id = params.task_id();
    let comments = CommentRepo::list(&state.pool, task_id.as_deref()).await?;
    Ok(Json(comments))
}

/// DELETE /api/comments/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    if !CommentRepo::delete(&state.pool, &id).await? {
        return Err(AppError::not_found("Comment", id));
    }
    Ok(Json(MessageResponse::deleted("Comment")))
}
