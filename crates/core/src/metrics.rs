//! Task completion metrics: per-project breakdowns and the global overview.
//!
//! Both computations are full scans over records the caller has already
//! loaded. The per-project average counts every task that carries a
//! `completed_at`, whatever its current status; the overview average only
//! ever sees tasks the caller selected by `status = DONE`.

use serde::Serialize;

use crate::task::TaskStatus;
use crate::types::Timestamp;

/// Seconds in one day, used to express completion durations in days.
pub const SECS_PER_DAY: f64 = 86_400.0;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// The slice of a task row the metrics engine reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskSample {
    pub status: TaskStatus,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

impl TaskSample {
    /// Days between creation and completion, if the task has a completion
    /// stamp. Negative when `completed_at` predates `created_at`.
    pub fn completion_days(&self) -> Option<f64> {
        self.completed_at.map(|completed| {
            let delta = completed - self.created_at;
            duration_secs(delta) / SECS_PER_DAY
        })
    }
}

/// Total seconds of a duration, keeping sub-second precision.
fn duration_secs(delta: chrono::Duration) -> f64 {
    match delta.num_microseconds() {
        Some(micros) => micros as f64 / 1_000_000.0,
        None => delta.num_milliseconds() as f64 / 1_000.0,
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Completion statistics for a single project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectMetrics {
    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub in_progress_tasks: i64,
    pub todo_tasks: i64,
    pub average_completion_time_days: Option<f64>,
    pub completion_rate: f64,
}

/// Store-wide totals and the average completion time of finished tasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewMetrics {
    pub total_projects: i64,
    pub total_tasks: i64,
    pub total_users: i64,
    pub completed_tasks: i64,
    pub average_completion_time_days: Option<f64>,
}

/// Collection-wide counts the overview needs alongside the DONE tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreTotals {
    pub projects: i64,
    pub tasks: i64,
    pub users: i64,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Round to two decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Mean completion time in days over every sample with a `completed_at`,
/// rounded to two decimals. `None` when no sample qualifies.
pub fn average_completion_days(samples: &[TaskSample]) -> Option<f64> {
    let days: Vec<f64> = samples
        .iter()
        .filter_map(TaskSample::completion_days)
        .collect();
    if days.is_empty() {
        return None;
    }
    let mean = days.iter().sum::<f64>() / days.len() as f64;
    Some(round2(mean))
}

/// Compute metrics for all tasks belonging to one project.
///
/// `IN_REVIEW` tasks count toward `total_tasks` only, so the three named
/// buckets may sum to less than the total.
pub fn project_metrics(tasks: &[TaskSample]) -> ProjectMetrics {
    let count = |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count() as i64;

    let total_tasks = tasks.len() as i64;
    let completed_tasks = count(TaskStatus::Done);

    let completion_rate = if total_tasks > 0 {
        completed_tasks as f64 / total_tasks as f64 * 100.0
    } else {
        0.0
    };

    ProjectMetrics {
        total_tasks,
        completed_tasks,
        in_progress_tasks: count(TaskStatus::InProgress),
        todo_tasks: count(TaskStatus::Todo),
        average_completion_time_days: average_completion_days(tasks),
        completion_rate: round2(completion_rate),
    }
}

/// Compute the global overview from store totals and the `DONE` tasks.
///
/// `done_tasks` is expected to be the result of a `status = DONE` query;
/// the average is taken over exactly what is passed in.
pub fn overview_metrics(totals: StoreTotals, done_tasks: &[TaskSample]) -> OverviewMetrics {
    OverviewMetrics {
        total_projects: totals.projects,
        total_tasks: totals.tasks,
        total_users: totals.users,
        completed_tasks: done_tasks.len() as i64,
        average_completion_time_days: average_completion_days(done_tasks),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn base() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn open(status: TaskStatus) -> TaskSample {
        TaskSample {
            status,
            created_at: base(),
            completed_at: None,
        }
    }

    fn finished_after(duration: Duration) -> TaskSample {
        TaskSample {
            status: TaskStatus::Done,
            created_at: base(),
            completed_at: Some(base() + duration),
        }
    }

    // -- round2 -----------------------------------------------------------

    #[test]
    fn round2_truncates_to_two_places() {
        assert_eq!(round2(33.333_333), 33.33);
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(100.0), 100.0);
    }

    // -- completion_days --------------------------------------------------

    #[test]
    fn completion_days_is_none_without_stamp() {
        assert_eq!(open(TaskStatus::Done).completion_days(), None);
    }

    #[test]
    fn completion_days_counts_fractional_days() {
        let sample = finished_after(Duration::hours(36));
        assert_eq!(sample.completion_days(), Some(1.5));
    }

    #[test]
    fn completion_days_keeps_negative_durations() {
        let sample = finished_after(Duration::hours(-12));
        assert_eq!(sample.completion_days(), Some(-0.5));
    }

    // -- project_metrics --------------------------------------------------

    #[test]
    fn empty_project_has_zero_rate_and_no_average() {
        let m = project_metrics(&[]);
        assert_eq!(m.total_tasks, 0);
        assert_eq!(m.completion_rate, 0.0);
        assert_eq!(m.average_completion_time_days, None);
    }

    #[test]
    fn single_done_task_is_full_completion() {
        let m = project_metrics(&[finished_after(Duration::days(2))]);
        assert_eq!(m.total_tasks, 1);
        assert_eq!(m.completed_tasks, 1);
        assert_eq!(m.completion_rate, 100.0);
        assert_eq!(m.average_completion_time_days, Some(2.0));
    }

    #[test]
    fn in_review_counts_only_toward_total() {
        let tasks = [
            open(TaskStatus::Todo),
            open(TaskStatus::InProgress),
            open(TaskStatus::InReview),
            finished_after(Duration::days(1)),
        ];
        let m = project_metrics(&tasks);
        assert_eq!(m.total_tasks, 4);
        assert_eq!(m.todo_tasks, 1);
        assert_eq!(m.in_progress_tasks, 1);
        assert_eq!(m.completed_tasks, 1);
        assert!(m.todo_tasks + m.in_progress_tasks + m.completed_tasks <= m.total_tasks);
        assert_eq!(m.completion_rate, 25.0);
    }

    #[test]
    fn completion_rate_is_rounded() {
        let tasks = [
            finished_after(Duration::days(1)),
            open(TaskStatus::Todo),
            open(TaskStatus::Todo),
        ];
        assert_eq!(project_metrics(&tasks).completion_rate, 33.33);
    }

    #[test]
    fn project_average_ignores_status_and_uses_stamp_presence() {
        // A stamped task whose status is no longer DONE still counts here.
        let stale = TaskSample {
            status: TaskStatus::InProgress,
            created_at: base(),
            completed_at: Some(base() + Duration::days(4)),
        };
        let tasks = [finished_after(Duration::days(2)), stale];
        let m = project_metrics(&tasks);
        assert_eq!(m.completed_tasks, 1);
        assert_eq!(m.average_completion_time_days, Some(3.0));
    }

    #[test]
    fn average_is_rounded_to_two_places() {
        let tasks = [
            finished_after(Duration::hours(1)),
            finished_after(Duration::hours(2)),
        ];
        // 1.5h = 0.0625 days
        assert_eq!(project_metrics(&tasks).average_completion_time_days, Some(0.06));
    }

    #[test]
    fn instant_completion_averages_to_zero_not_none() {
        let m = project_metrics(&[finished_after(Duration::zero())]);
        assert_eq!(m.average_completion_time_days, Some(0.0));
    }

    // -- overview_metrics -------------------------------------------------

    #[test]
    fn overview_passes_totals_through() {
        let totals = StoreTotals {
            projects: 3,
            tasks: 10,
            users: 4,
        };
        let m = overview_metrics(totals, &[finished_after(Duration::days(1))]);
        assert_eq!(m.total_projects, 3);
        assert_eq!(m.total_tasks, 10);
        assert_eq!(m.total_users, 4);
        assert_eq!(m.completed_tasks, 1);
        assert_eq!(m.average_completion_time_days, Some(1.0));
    }

    #[test]
    fn overview_with_no_done_tasks_has_no_average() {
        let m = overview_metrics(StoreTotals::default(), &[]);
        assert_eq!(m.completed_tasks, 0);
        assert_eq!(m.average_completion_time_days, None);
    }

    #[test]
    fn metrics_serialize_null_average() {
        let json = serde_json::to_value(project_metrics(&[])).unwrap();
        assert!(json["average_completion_time_days"].is_null());
        assert_eq!(json["completion_rate"], 0.0);
    }
}
