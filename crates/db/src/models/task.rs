//! Task entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskboard_core::metrics::TaskSample;
use taskboard_core::task::{TaskPriority, TaskStatus};
use taskboard_core::types::{DbId, Timestamp};

/// A task row from the `tasks` table.
///
/// `completed_at` is only ever written alongside `status`; see
/// [`taskboard_core::task::StatusTransition`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub project_id: DbId,
    pub assigned_to: Option<DbId>,
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,
    #[sqlx(try_from = "String")]
    pub priority: TaskPriority,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

impl From<&Task> for TaskSample {
    fn from(task: &Task) -> Self {
        TaskSample {
            status: task.status,
            created_at: task.created_at,
            completed_at: task.completed_at,
        }
    }
}

/// DTO for creating a new task. New tasks always start in `TODO`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: String,
    pub project_id: DbId,
    pub assigned_to: Option<DbId>,
    /// Defaults to `MEDIUM` if omitted or null.
    pub priority: Option<TaskPriority>,
}

/// DTO for updating an existing task. All fields are optional; a present
/// `status` also re-derives `completed_at`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<DbId>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

impl UpdateTask {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.assigned_to.is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }
}

/// Body of `PATCH /tasks/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskStatus {
    pub status: TaskStatus,
}

/// AND-combined filters for listing tasks. `None` means "any".
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub project_id: Option<DbId>,
    pub assigned_to: Option<DbId>,
    pub status: Option<TaskStatus>,
}
