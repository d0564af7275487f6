//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use taskboard_db::models::project::{CreateProject, Project, UpdateProject};
use taskboard_db::repositories::{ProjectRepo, TaskRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

/// POST /api/projects
///
/// The owner must exist at creation time.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<Json<Project>> {
    if !UserRepo::exists(&state.pool, &input.owner_id).await? {
        return Err(AppError::not_found("Owner user", input.owner_id));
    }

    let project = ProjectRepo::create(&state.pool, &input).await?;

    tracing::info!(
        project_id = %project.id,
        owner_id = %project.owner_id,
        "Project created"
    );

    Ok(Json(project))
}

/// GET /api/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))?;
    Ok(Json(project))
}

/// PUT /api/projects/{id}
///
/// Bumps `updated_at` when at least one field is present.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    let project = if input.is_empty() {
        ProjectRepo::find_by_id(&state.pool, &id).await?
    } else {
        ProjectRepo::update(&state.pool, &id, &input, Utc::now()).await?
    };

    let project = project.ok_or_else(|| AppError::not_found("Project", id))?;
    Ok(Json(project))
}

/// DELETE /api/projects/{id}
///
/// Removes the project, then its tasks, as two separate statements.
/// Comments on those tasks are not removed.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    if !ProjectRepo::delete(&state.pool, &id).await? {
        return Err(AppError::not_found("Project", id));
    }

    let tasks_removed = TaskRepo::delete_by_project(&state.pool, &id).await?;

    tracing::info!(project_id = %id, tasks_removed, "Project deleted");

    Ok(Json(MessageResponse::deleted("Project")))
}
