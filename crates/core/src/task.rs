//! Task status and priority enums, plus the status transition rule.
//!
//! Statuses and priorities are stored as their upper-case spellings in
//! `TEXT` columns and travel over the wire in the same form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Workflow position of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    InReview,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::InReview,
        TaskStatus::Done,
    ];

    /// The stored / serialized spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::InReview => "IN_REVIEW",
            Self::Done => "DONE",
        }
    }

    pub fn is_done(self) -> bool {
        self == Self::Done
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown task status '{s}'")))
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Relative urgency of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 4] = [
        TaskPriority::Low,
        TaskPriority::Medium,
        TaskPriority::High,
        TaskPriority::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown task priority '{s}'")))
    }
}

impl TryFrom<String> for TaskPriority {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Status transition rule
// ---------------------------------------------------------------------------

/// Fields persisted whenever a write carries a `status`.
///
/// Every status-to-status move is legal, self-transitions included. The
/// previous state of the task plays no part: entering `DONE` always stamps
/// a fresh `completed_at`, and any other status clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTransition {
    pub status: TaskStatus,
    pub completed_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}

impl StatusTransition {
    /// Derive the fields to write for a move to `status` at time `now`.
    pub fn to(status: TaskStatus, now: Timestamp) -> Self {
        Self {
            status,
            completed_at: status.is_done().then_some(now),
            updated_at: now,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn at(hour: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    // -- Serialization ----------------------------------------------------

    #[test]
    fn status_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
    }

    #[test]
    fn priority_deserializes_upper_case() {
        let priority: TaskPriority = serde_json::from_str("\"CRITICAL\"").unwrap();
        assert_eq!(priority, TaskPriority::Critical);
    }

    #[test]
    fn lower_case_status_is_rejected_by_serde() {
        assert!(serde_json::from_str::<TaskStatus>("\"done\"").is_err());
    }

    #[test]
    fn as_str_matches_serde_spelling() {
        for status in TaskStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        for priority in TaskPriority::ALL {
            let json = serde_json::to_string(&priority).unwrap();
            assert_eq!(json, format!("\"{}\"", priority.as_str()));
        }
    }

    // -- Parsing ----------------------------------------------------------

    #[test]
    fn status_parses_from_stored_text() {
        assert_eq!("IN_REVIEW".parse::<TaskStatus>().unwrap(), TaskStatus::InReview);
        assert_eq!(
            TaskStatus::try_from("DONE".to_string()).unwrap(),
            TaskStatus::Done
        );
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        assert_matches!("ARCHIVED".parse::<TaskStatus>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn unknown_priority_is_a_validation_error() {
        assert_matches!(
            TaskPriority::try_from("urgent".to_string()),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn defaults_are_todo_and_medium() {
        assert_eq!(TaskStatus::default(), TaskStatus::Todo);
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
    }

    // -- Transition rule --------------------------------------------------

    #[test]
    fn done_stamps_completed_at_with_write_time() {
        let now = at(10);
        let t = StatusTransition::to(TaskStatus::Done, now);
        assert_eq!(t.status, TaskStatus::Done);
        assert_eq!(t.completed_at, Some(now));
        assert_eq!(t.updated_at, now);
    }

    #[test]
    fn non_done_statuses_clear_completed_at() {
        for status in [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::InReview] {
            let t = StatusTransition::to(status, at(10));
            assert_eq!(t.completed_at, None, "{status} must clear completed_at");
            assert_eq!(t.updated_at, at(10));
        }
    }

    #[test]
    fn reentering_done_refreshes_the_timestamp() {
        let first = StatusTransition::to(TaskStatus::Done, at(9));
        let second = StatusTransition::to(TaskStatus::Done, at(9) + Duration::hours(5));
        assert_ne!(first.completed_at, second.completed_at);
        assert_eq!(second.completed_at, Some(at(14)));
    }

    #[test]
    fn every_transition_pair_is_deterministic() {
        let now = at(12);
        for _from in TaskStatus::ALL {
            for to in TaskStatus::ALL {
                let t = StatusTransition::to(to, now);
                assert_eq!(t.completed_at.is_some(), to.is_done());
            }
        }
    }
}
