//! Domain logic for the taskboard backend.
//!
//! Holds the id/timestamp conventions, the shared error type, the task
//! status rules and the metrics engine. Nothing in here touches the
//! database or HTTP; callers load records and pass them in.

pub mod error;
pub mod metrics;
pub mod task;
pub mod types;
pub mod validation;
