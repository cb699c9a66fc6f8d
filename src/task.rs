//! Task model for taskdash.
//!
//! `TaskRecord` mirrors the task service's wire format exactly: `status`,
//! `priority`, and `due_date` stay raw strings as fetched, so records the
//! service should never have produced still survive a refresh and are only
//! rejected when the aggregation layer counts them. `TaskDraft` is the typed
//! outbound shape for creates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier assigned by the task service. Stable once assigned.
pub type TaskId = u64;

pub const TASK_STATUSES: [&str; 3] = ["To-Do", "In Progress", "Completed"];
pub const TASK_PRIORITIES: [&str; 3] = ["Low", "Medium", "High"];

/// Task workflow status, spelled the way the service spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "To-Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::ToDo, TaskStatus::InProgress, TaskStatus::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To-Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }

    /// Case-insensitive lookup against the known spellings.
    pub fn lookup(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
    }

    /// Parse user input, rejecting anything outside the known set.
    pub fn parse(raw: &str) -> Result<Self> {
        Self::lookup(raw).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "unknown task status '{}' (expected {})",
                raw.trim(),
                TASK_STATUSES.join(", ")
            ))
        })
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority, spelled the way the service spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
        }
    }

    /// Case-insensitive lookup against the known spellings.
    pub fn lookup(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str().eq_ignore_ascii_case(trimmed))
    }

    /// Parse user input, rejecting anything outside the known set.
    pub fn parse(raw: &str) -> Result<Self> {
        Self::lookup(raw).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "unknown task priority '{}' (expected {})",
                raw.trim(),
                TASK_PRIORITIES.join(", ")
            ))
        })
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task as fetched from the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: TaskId,
    #[serde(rename = "task_title")]
    pub title: String,
    #[serde(rename = "task_description")]
    pub description: String,
    pub priority: String,
    pub due_date: String,
    pub status: String,
}

/// User-supplied data for creating a task, prior to server-assigned fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDraft {
    #[serde(rename = "task_title")]
    pub title: String,
    #[serde(rename = "task_description")]
    pub description: String,
    pub priority: TaskPriority,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
}

/// Order a collection for display. Snapshots are sets keyed by id; a stable
/// id order keeps listings and snapshot comparisons deterministic.
pub fn sort_for_display(tasks: &mut [TaskRecord]) {
    tasks.sort_by_key(|task| task.id);
}
