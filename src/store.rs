//! Authoritative local task collection, kept consistent with the remote
//! service.
//!
//! The store never patches its collection in place. Every mutating command
//! ends in a full re-fetch, so the visible snapshot is always either exactly
//! a prior service response or untouched after a failed call. Mutating
//! commands are serialized through one gate; whichever refresh completes
//! last wins wholesale.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{watch, Mutex};

use crate::error::{Error, Result};
use crate::repository::TaskRepository;
use crate::task::{self, TaskDraft, TaskId, TaskRecord, TaskStatus};

/// An immutable point-in-time copy of the task collection, ordered by id.
pub type Snapshot = Arc<Vec<TaskRecord>>;

/// Single owner of the local task collection.
///
/// Publishes `None` until the first successful refresh, so subscribers can
/// tell "no data yet" apart from "refreshed to empty". Failed refreshes leave
/// the previous snapshot in place and are returned to the caller, never
/// swallowed.
pub struct TaskStore {
    repository: Arc<dyn TaskRepository>,
    published: watch::Sender<Option<Snapshot>>,
    write_gate: Mutex<()>,
}

impl TaskStore {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        let (published, _) = watch::channel(None);
        Self {
            repository,
            published,
            write_gate: Mutex::new(()),
        }
    }

    /// Subscribe to snapshot replacements.
    pub fn subscribe(&self) -> watch::Receiver<Option<Snapshot>> {
        self.published.subscribe()
    }

    /// The most recently published snapshot, if any refresh has succeeded.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.published.borrow().clone()
    }

    /// Re-fetch the whole collection and replace the snapshot atomically.
    pub async fn refresh(&self) -> Result<Snapshot> {
        let _gate = self.write_gate.lock().await;
        self.refresh_locked().await
    }

    /// Create a task, then re-fetch so the snapshot carries server-assigned
    /// fields. A failed create leaves the collection untouched.
    pub async fn create(&self, draft: &TaskDraft) -> Result<TaskRecord> {
        let _gate = self.write_gate.lock().await;
        let created = self.repository.create(draft).await?;
        self.refresh_locked().await?;
        Ok(created)
    }

    /// Transition a task's status, then re-fetch. No optimistic local
    /// mutation: a rejected update changes nothing.
    pub async fn set_status(&self, id: TaskId, new_status: TaskStatus) -> Result<TaskRecord> {
        let _gate = self.write_gate.lock().await;
        let updated = self.repository.update_status(id, new_status).await?;
        self.refresh_locked().await?;
        Ok(updated)
    }

    /// Look up a single task without touching the bulk collection.
    ///
    /// A missing id is an absent result, not a failure.
    pub async fn find_by_id(&self, id: TaskId) -> Result<Option<TaskRecord>> {
        match self.repository.get_by_id(id).await {
            Ok(record) => Ok(Some(record)),
            Err(Error::TaskNotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn refresh_locked(&self) -> Result<Snapshot> {
        let mut tasks = self.repository.list_all().await?;
        validate_unique_ids(&tasks)?;
        task::sort_for_display(&mut tasks);
        let snapshot: Snapshot = Arc::new(tasks);
        self.published.send_replace(Some(Arc::clone(&snapshot)));
        Ok(snapshot)
    }
}

fn validate_unique_ids(tasks: &[TaskRecord]) -> Result<()> {
    let mut seen = HashSet::new();
    for task in tasks {
        if !seen.insert(task.id) {
            return Err(Error::DataIntegrity(format!(
                "duplicate task id {} in service response",
                task.id
            )));
        }
    }
    Ok(())
}
