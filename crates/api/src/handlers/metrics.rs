//! Handlers for the `/metrics` resource.
//!
//! Both endpoints load task rows wholesale and hand them to the pure
//! aggregation functions in [`taskboard_core::metrics`].

use axum::extract::{Path, State};
use axum::Json;
use taskboard_core::metrics::{
    overview_metrics, project_metrics, OverviewMetrics, ProjectMetrics, StoreTotals, TaskSample,
};
use taskboard_core::task::TaskStatus;
use taskboard_db::repositories::{ProjectRepo, TaskRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/metrics/project/{id}
pub async fn project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProjectMetrics>> {
    if !ProjectRepo::exists(&state.pool, &id).await? {
        return Err(AppError::not_found("Project", id));
    }

    let tasks = TaskRepo::list_all_by_project(&state.pool, &id).await?;
    let samples: Vec<TaskSample> = tasks.iter().map(TaskSample::from).collect();

    Ok(Json(project_metrics(&samples)))
}

/// GET /api/metrics/overview
///
/// The average completion time only considers tasks currently `DONE`.
pub async fn overview(State(state): State<AppState>) -> AppResult<Json<OverviewMetrics>> {
    let totals = StoreTotals {
        projects: ProjectRepo::count(&state.pool).await?,
        tasks: TaskRepo::count(&state.pool).await?,
        users: UserRepo::count(&state.pool).await?,
    };

    let done = TaskRepo::list_all_by_status(&state.pool, TaskStatus::Done).await?;
    let samples: Vec<TaskSample> = done.iter().map(TaskSample::from).collect();

    Ok(Json(overview_metrics(totals, &samples)))
}
