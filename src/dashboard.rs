//! Dashboard controller: orchestrates store refreshes, re-runs the
//! aggregators on every snapshot, and publishes the combined state to the
//! presentation layer.
//!
//! The controller is a relay. Command outcomes are the store's outcomes,
//! with no retries and no fallback values; its only own logic is re-running
//! the pure aggregation on each snapshot event.

use std::sync::Arc;

use tokio::sync::watch;

use crate::aggregate::{self, PriorityCounts, StatusByDay};
use crate::error::Result;
use crate::store::{Snapshot, TaskStore};
use crate::task::{TaskDraft, TaskId, TaskRecord, TaskStatus};

/// Everything the presentation layer renders from.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Raw collection, id-ordered. `None` until the first successful refresh.
    pub tasks: Option<Snapshot>,
    /// Stacked daily chart input.
    pub status_by_day: StatusByDay,
    /// Priority pie chart input.
    pub priority_counts: PriorityCounts,
    /// Set when the latest snapshot could not be aggregated; the projections
    /// above then still show the last valid aggregation pass.
    pub integrity_error: Option<String>,
    /// Single-task lookup result. Absent when no match or the lookup failed.
    pub search: Option<TaskRecord>,
}

/// Controller over a shared [`TaskStore`].
///
/// Subscribes to the store on construction and re-aggregates per snapshot
/// event. Commands that trigger a refresh also apply the resulting snapshot
/// before returning, so a caller always observes its own write. Must be
/// created inside a tokio runtime.
pub struct Dashboard {
    store: Arc<TaskStore>,
    state: watch::Sender<DashboardState>,
}

impl Dashboard {
    pub fn new(store: Arc<TaskStore>) -> Arc<Self> {
        let (state, _) = watch::channel(DashboardState::default());
        let dashboard = Arc::new(Self { store, state });

        let weak = Arc::downgrade(&dashboard);
        let mut snapshots = dashboard.store.subscribe();
        tokio::spawn(async move {
            while snapshots.changed().await.is_ok() {
                let snapshot = snapshots.borrow_and_update().clone();
                let Some(dashboard) = weak.upgrade() else {
                    break;
                };
                if let Some(snapshot) = snapshot {
                    dashboard.apply_snapshot(snapshot);
                }
            }
        });

        dashboard
    }

    /// Initial load: one refresh, projections published on success.
    pub async fn init(&self) -> Result<()> {
        self.refresh().await
    }

    pub async fn refresh(&self) -> Result<()> {
        let snapshot = self.store.refresh().await?;
        self.apply_snapshot(snapshot);
        Ok(())
    }

    pub async fn create(&self, draft: &TaskDraft) -> Result<TaskRecord> {
        let created = self.store.create(draft).await?;
        if let Some(snapshot) = self.store.snapshot() {
            self.apply_snapshot(snapshot);
        }
        Ok(created)
    }

    pub async fn set_status(&self, id: TaskId, new_status: TaskStatus) -> Result<TaskRecord> {
        let updated = self.store.set_status(id, new_status).await?;
        if let Some(snapshot) = self.store.snapshot() {
            self.apply_snapshot(snapshot);
        }
        Ok(updated)
    }

    /// Single-task lookup. The published SearchResult goes absent on both a
    /// miss and a failed lookup; the error (if any) is still relayed.
    pub async fn search(&self, id: TaskId) -> Result<Option<TaskRecord>> {
        let result = self.store.find_by_id(id).await;
        let found = match &result {
            Ok(found) => found.clone(),
            Err(_) => None,
        };
        self.state.send_modify(|state| state.search = found);
        result
    }

    /// Drop the published SearchResult, independent of the bulk collection.
    pub fn clear_search(&self) {
        self.state.send_modify(|state| state.search = None);
    }

    /// Subscribe to published dashboard state.
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    /// The currently published state.
    pub fn state(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    fn apply_snapshot(&self, snapshot: Snapshot) {
        let aggregated = aggregate::by_day_and_status(&snapshot)
            .and_then(|days| aggregate::by_priority(&snapshot).map(|priorities| (days, priorities)));

        self.state.send_modify(|state| {
            state.tasks = Some(snapshot);
            match aggregated {
                Ok((days, priorities)) => {
                    state.status_by_day = days;
                    state.priority_counts = priorities;
                    state.integrity_error = None;
                }
                Err(err) => {
                    // Prior valid projections stay published; the listing
                    // still reflects the raw collection.
                    state.integrity_error = Some(err.to_string());
                }
            }
        });
    }
}
