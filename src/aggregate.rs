//! Aggregate projections derived from a task collection snapshot.
//!
//! Both projections are pure folds over the input: same snapshot in, same
//! projection out, regardless of input order. A record whose status,
//! priority, or due date falls outside what the dashboard understands fails
//! the whole pass with [`Error::DataIntegrity`] - no partial projection is
//! ever produced, which keeps the counting invariants (cells sum to the
//! collection size) trustworthy.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::task::{TaskPriority, TaskRecord, TaskStatus};

/// Per-day status triple. Serializes with the service's status labels so the
/// chart layer can consume it directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    #[serde(rename = "To-Do")]
    pub to_do: u64,
    #[serde(rename = "In Progress")]
    pub in_progress: u64,
    #[serde(rename = "Completed")]
    pub completed: u64,
}

impl StatusCounts {
    fn bump(&mut self, status: TaskStatus) {
        match status {
            TaskStatus::ToDo => self.to_do += 1,
            TaskStatus::InProgress => self.in_progress += 1,
            TaskStatus::Completed => self.completed += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.to_do + self.in_progress + self.completed
    }
}

/// Calendar-day keyed status counts. Days with no tasks are absent; the
/// renderer treats absent days as all-zero.
pub type StatusByDay = BTreeMap<NaiveDate, StatusCounts>;

/// Priority counts with all three buckets always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    #[serde(rename = "Low")]
    pub low: u64,
    #[serde(rename = "Medium")]
    pub medium: u64,
    #[serde(rename = "High")]
    pub high: u64,
}

impl PriorityCounts {
    pub fn total(&self) -> u64 {
        self.low + self.medium + self.high
    }
}

/// Group tasks by the calendar day of their due date and status.
///
/// Day triples are created lazily at {0,0,0} on first encounter.
pub fn by_day_and_status(tasks: &[TaskRecord]) -> Result<StatusByDay> {
    let mut days = StatusByDay::new();
    for task in tasks {
        let status = TaskStatus::lookup(&task.status).ok_or_else(|| {
            Error::DataIntegrity(format!("task {}: unknown status '{}'", task.id, task.status))
        })?;
        let day = due_day(&task.due_date).ok_or_else(|| {
            Error::DataIntegrity(format!(
                "task {}: unparseable due date '{}'",
                task.id, task.due_date
            ))
        })?;
        days.entry(day).or_default().bump(status);
    }
    Ok(days)
}

/// Count tasks per priority bucket.
///
/// All three buckets are pre-seeded; on success `total()` equals the
/// collection size.
pub fn by_priority(tasks: &[TaskRecord]) -> Result<PriorityCounts> {
    let mut counts = PriorityCounts::default();
    for task in tasks {
        let priority = TaskPriority::lookup(&task.priority).ok_or_else(|| {
            Error::DataIntegrity(format!(
                "task {}: unknown priority '{}'",
                task.id, task.priority
            ))
        })?;
        match priority {
            TaskPriority::Low => counts.low += 1,
            TaskPriority::Medium => counts.medium += 1,
            TaskPriority::High => counts.high += 1,
        }
    }
    Ok(counts)
}

/// Truncate a due date to its calendar day. Accepts plain `YYYY-MM-DD` as-is
/// and RFC 3339 datetimes by dropping the time-of-day component (in UTC, the
/// way the service's own dashboard did it).
fn due_day(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|datetime| datetime.with_timezone(&Utc).date_naive())
}
