//! Handlers for the `/tasks` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use taskboard_core::task::StatusTransition;
use taskboard_db::models::task::{CreateTask, Task, UpdateTask, UpdateTaskStatus};
use taskboard_db::repositories::{CommentRepo, ProjectRepo, TaskRepo, UserRepo};
use taskboard_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::query::TaskListParams;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Fail with 404 unless the user an assignment points at exists.
async fn ensure_assignee_exists(pool: &DbPool, assigned_to: Option<&str>) -> AppResult<()> {
    if let Some(user_id) = assigned_to {
        if !UserRepo::exists(pool, user_id).await? {
            return Err(AppError::not_found("Assigned user", user_id));
        }
    }
    Ok(())
}

/// POST /api/tasks
///
/// The project, and the assignee if one is given, must exist.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTask>,
) -> AppResult<Json<Task>> {
    if !ProjectRepo::exists(&state.pool, &input.project_id).await? {
        return Err(AppError::not_found("Project", input.project_id));
    }
    ensure_assignee_exists(&state.pool, input.assigned_to.as_deref()).await?;

    let task = TaskRepo::create(&state.pool, &input).await?;

    tracing::info!(
        task_id = %task.id,
        project_id = %task.project_id,
        "Task created"
    );

    Ok(Json(task))
}

/// GET /api/tasks?project_id=&assigned_to=&status=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<TaskListParams>,
) -> AppResult<Json<Vec<Task>>> {
    let tasks = TaskRepo::list(&state.pool, &params.into()).await?;
    Ok(Json(tasks))
}

/// GET /api/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Task>> {
    let task = TaskRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Task", id))?;
    Ok(Json(task))
}

/// PUT /api/tasks/{id}
///
/// Applies only the fields present in the body and bumps `updated_at`.
/// A present `status` goes through [`StatusTransition`], exactly as the
/// dedicated status endpoint does.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    if input.is_empty() {
        return get_by_id(State(state), Path(id)).await;
    }

    if !TaskRepo::exists(&state.pool, &id).await? {
        return Err(AppError::not_found("Task", id));
    }
    ensure_assignee_exists(&state.pool, input.assigned_to.as_deref()).await?;

    let now = Utc::now();
    let transition = input.status.map(|status| StatusTransition::to(status, now));

    let task = TaskRepo::update(&state.pool, &id, &input, transition, now)
        .await?
        .ok_or_else(|| AppError::not_found("Task", id))?;

    if let Some(transition) = transition {
        tracing::info!(
            task_id = %task.id,
            status = %transition.status,
            "Task status changed"
        );
    }

    Ok(Json(task))
}

/// PATCH /api/tasks/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTaskStatus>,
) -> AppResult<Json<Task>> {
    let transition = StatusTransition::to(input.status, Utc::now());

    let task = TaskRepo::update_status(&state.pool, &id, transition)
        .await?
        .ok_or_else(|| AppError::not_found("Task", id))?;

    tracing::info!(
        task_id = %task.id,
        status = %transition.status,
        "Task status changed"
    );

    Ok(Json(task))
}

/// DELETE /api/tasks/{id}
///
/// Removes the task, then its comments, as two separate statements.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    if !TaskRepo::delete(&state.pool, &id).await? {
        return Err(AppError::not_found("Task", id));
    }

    let comments_removed = CommentRepo::delete_by_task(&state.pool, &id).await?;

    tracing::info!(task_id = %id, comments_removed, "Task deleted");

    Ok(Json(MessageResponse::deleted("Task")))
}
