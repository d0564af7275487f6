//! Query parameter types for list endpoints.
//!
//! Empty id values (`?project_id=`) are treated as absent.

use serde::Deserialize;
use taskboard_core::task::TaskStatus;
use taskboard_core::validation::non_empty;
use taskboard_db::models::task::TaskFilter;

/// Query parameters for `GET /tasks`.
#[derive(Debug, Default, Deserialize)]
pub struct TaskListParams {
    pub project_id: Option<String>,
    pub assigned_to: Option<String>,
    pub status: Option<TaskStatus>,
}

impl From<TaskListParams> for TaskFilter {
    fn from(params: TaskListParams) -> Self {
        TaskFilter {
            project_id: non_empty(params.project_id),
            assigned_to: non_empty(params.assigned_to),
            status: params.status,
        }
    }
}

/// Query parameters for `GET /comments`.
#[derive(Debug, Default, Deserialize)]
pub struct CommentListParams {
    pub task_id: Option<String>,
}

impl CommentListParams {
    pub fn task_id(self) -> Option<String> {
        non_empty(self.task_id)
    }
}
