//! Dashboard controller orchestration: projections, integrity faults, and
//! the search lifecycle.

mod support;

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use taskdash::aggregate::{PriorityCounts, StatusCounts};
use taskdash::dashboard::Dashboard;
use taskdash::store::TaskStore;
use taskdash::task::TaskStatus;

use support::{draft, record, FakeService};

fn scenario_service() -> Arc<FakeService> {
    Arc::new(FakeService::seeded(vec![
        record(1, "Low", "2024-01-10", "To-Do"),
        record(2, "Low", "2024-01-10", "Completed"),
        record(3, "High", "2024-01-11", "To-Do"),
    ]))
}

fn dashboard_over(service: Arc<FakeService>) -> (Arc<TaskStore>, Arc<Dashboard>) {
    let store = Arc::new(TaskStore::new(service));
    let dashboard = Dashboard::new(Arc::clone(&store));
    (store, dashboard)
}

fn day(year: i32, month: u32, day_of_month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day_of_month).expect("date")
}

#[tokio::test]
async fn init_publishes_collection_and_projections() {
    let (_, dashboard) = dashboard_over(scenario_service());
    dashboard.init().await.expect("init");

    let state = dashboard.state();
    assert_eq!(state.tasks.expect("tasks").len(), 3);
    assert_eq!(
        state.priority_counts,
        PriorityCounts {
            low: 2,
            medium: 0,
            high: 1
        }
    );
    assert_eq!(
        state.status_by_day[&day(2024, 1, 10)],
        StatusCounts {
            to_do: 1,
            in_progress: 0,
            completed: 1
        }
    );
    assert_eq!(
        state.status_by_day[&day(2024, 1, 11)],
        StatusCounts {
            to_do: 1,
            in_progress: 0,
            completed: 0
        }
    );
    assert!(state.integrity_error.is_none());
    assert!(state.search.is_none());
}

#[tokio::test]
async fn set_status_recomputes_projections() {
    let (_, dashboard) = dashboard_over(scenario_service());
    dashboard.init().await.expect("init");

    dashboard
        .set_status(3, TaskStatus::Completed)
        .await
        .expect("set status");

    let state = dashboard.state();
    assert_eq!(
        state.status_by_day[&day(2024, 1, 11)],
        StatusCounts {
            to_do: 0,
            in_progress: 0,
            completed: 1
        }
    );
}

#[tokio::test]
async fn create_recomputes_projections() {
    let (_, dashboard) = dashboard_over(scenario_service());
    dashboard.init().await.expect("init");

    dashboard.create(&draft("one more")).await.expect("create");

    let state = dashboard.state();
    assert_eq!(state.priority_counts.low, 3);
    assert_eq!(state.priority_counts.total(), 4);
    assert_eq!(state.status_by_day[&day(2024, 1, 10)].to_do, 2);
}

#[tokio::test]
async fn integrity_fault_retains_prior_projections() {
    let service = scenario_service();
    let (_, dashboard) = dashboard_over(service.clone());
    dashboard.init().await.expect("init");
    let good = dashboard.state();

    service.push_raw(record(4, "Urgent", "2024-01-12", "To-Do"));
    dashboard.refresh().await.expect("refresh itself succeeds");

    let state = dashboard.state();
    assert_eq!(state.tasks.expect("tasks").len(), 4);
    let message = state.integrity_error.expect("integrity error");
    assert!(message.contains("task 4"));
    // Charts keep drawing the last valid aggregation pass.
    assert_eq!(state.priority_counts, good.priority_counts);
    assert_eq!(state.status_by_day, good.status_by_day);
}

#[tokio::test]
async fn integrity_fault_on_first_load_reports_empty_projections() {
    let service = Arc::new(FakeService::new());
    service.push_raw(record(1, "Urgent", "2024-01-10", "To-Do"));
    let (_, dashboard) = dashboard_over(service);

    dashboard.init().await.expect("init");

    let state = dashboard.state();
    assert!(state.integrity_error.is_some());
    assert_eq!(state.priority_counts, PriorityCounts::default());
    assert!(state.status_by_day.is_empty());
    assert_eq!(state.tasks.expect("tasks").len(), 1);
}

#[tokio::test]
async fn recovery_clears_the_integrity_error() {
    let service = scenario_service();
    let (_, dashboard) = dashboard_over(service.clone());
    service.push_raw(record(4, "Urgent", "2024-01-12", "To-Do"));
    dashboard.init().await.expect("init");
    assert!(dashboard.state().integrity_error.is_some());

    service.set_tasks(vec![record(1, "Low", "2024-01-10", "To-Do")]);
    dashboard.refresh().await.expect("refresh");

    let state = dashboard.state();
    assert!(state.integrity_error.is_none());
    assert_eq!(state.priority_counts.total(), 1);
}

#[tokio::test]
async fn search_hits_publish_and_misses_stay_absent() {
    let (_, dashboard) = dashboard_over(scenario_service());

    let found = dashboard.search(2).await.expect("search");
    assert_eq!(found.expect("present").id, 2);
    assert_eq!(dashboard.state().search.expect("published").id, 2);

    let missing = dashboard.search(99).await.expect("search");
    assert!(missing.is_none());
    assert!(dashboard.state().search.is_none());
}

#[tokio::test]
async fn search_failure_resets_the_published_result() {
    let service = scenario_service();
    let (_, dashboard) = dashboard_over(service.clone());

    dashboard.search(2).await.expect("search");
    assert!(dashboard.state().search.is_some());

    service.set_fail_reads(true);
    dashboard.search(2).await.expect_err("read failure");
    assert!(dashboard.state().search.is_none());
}

#[tokio::test]
async fn clear_search_is_independent_of_the_collection() {
    let (_, dashboard) = dashboard_over(scenario_service());
    dashboard.init().await.expect("init");
    dashboard.search(1).await.expect("search");

    dashboard.clear_search();

    let state = dashboard.state();
    assert!(state.search.is_none());
    assert_eq!(state.tasks.expect("tasks").len(), 3);
}

#[tokio::test]
async fn failed_commands_leave_published_state_unchanged() {
    let service = scenario_service();
    let (_, dashboard) = dashboard_over(service.clone());
    dashboard.init().await.expect("init");
    let before = dashboard.state();

    service.set_fail_writes(true);
    dashboard.create(&draft("doomed")).await.expect_err("write failure");

    let state = dashboard.state();
    assert_eq!(
        state.tasks.expect("tasks").len(),
        before.tasks.expect("tasks").len()
    );
    assert_eq!(state.priority_counts, before.priority_counts);
    assert_eq!(state.status_by_day, before.status_by_day);
}

#[tokio::test]
async fn store_refreshes_propagate_through_the_subscription() {
    let (store, dashboard) = dashboard_over(scenario_service());
    let mut states = dashboard.subscribe();

    // Refresh the store directly, not through the controller.
    store.refresh().await.expect("refresh");

    tokio::time::timeout(Duration::from_secs(1), states.changed())
        .await
        .expect("state update within a second")
        .expect("channel open");

    let state = states.borrow_and_update().clone();
    assert_eq!(state.tasks.expect("tasks").len(), 3);
    assert_eq!(state.priority_counts.total(), 3);
}

#[tokio::test]
async fn late_store_events_after_teardown_are_ignored() {
    let (store, dashboard) = dashboard_over(scenario_service());
    dashboard.init().await.expect("init");
    drop(dashboard);

    // The store keeps working; nothing is listening and nothing blows up.
    let snapshot = store.refresh().await.expect("refresh");
    assert_eq!(snapshot.len(), 3);
}
