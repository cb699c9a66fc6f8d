//! taskdash command implementations.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::repository::HttpTaskRepository;
use crate::store::TaskStore;
use crate::task::{TaskDraft, TaskId, TaskPriority, TaskRecord, TaskStatus};

pub struct ConnectOptions {
    pub base_url: Option<String>,
    pub config: Option<PathBuf>,
}

pub struct NewOptions {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub due: String,
    pub status: String,
}

fn connect(options: ConnectOptions) -> Result<Arc<Dashboard>> {
    let mut config = Config::resolve(options.config.as_ref())?;
    if let Some(base_url) = options.base_url {
        config.service.base_url = base_url;
        config.service.validate()?;
    }
    let repository = Arc::new(HttpTaskRepository::from_config(&config.service)?);
    let store = Arc::new(TaskStore::new(repository));
    Ok(Dashboard::new(store))
}

pub async fn list(connect_options: ConnectOptions, output: OutputOptions) -> Result<()> {
    let dashboard = connect(connect_options)?;
    dashboard.refresh().await?;

    let state = dashboard.state();
    let tasks: &[TaskRecord] = match &state.tasks {
        Some(snapshot) => snapshot.as_slice(),
        None => &[],
    };

    let mut human = HumanOutput::new(format!("Tasks ({})", tasks.len()));
    for task in tasks {
        human.push_detail(describe(task));
    }
    if let Some(message) = &state.integrity_error {
        human.push_warning(message.clone());
    }

    emit_success(output, "list", &tasks, Some(&human))
}

pub async fn new_task(
    options: NewOptions,
    connect_options: ConnectOptions,
    output: OutputOptions,
) -> Result<()> {
    let draft = TaskDraft {
        title: options.title,
        description: options.description,
        priority: TaskPriority::parse(&options.priority)?,
        due_date: parse_due(&options.due)?,
        status: TaskStatus::parse(&options.status)?,
    };

    let dashboard = connect(connect_options)?;
    let created = dashboard.create(&draft).await?;

    let mut human = HumanOutput::new(format!("Created task {}", created.id));
    human.push_summary("title", created.title.clone());
    human.push_summary("priority", created.priority.clone());
    human.push_summary("due", created.due_date.clone());
    human.push_summary("status", created.status.clone());

    emit_success(output, "new", &created, Some(&human))
}

pub async fn set_status(
    id: TaskId,
    status: &str,
    connect_options: ConnectOptions,
    output: OutputOptions,
) -> Result<()> {
    let new_status = TaskStatus::parse(status)?;

    let dashboard = connect(connect_options)?;
    let updated = dashboard.set_status(id, new_status).await?;

    let mut human = HumanOutput::new(format!("Task {} is now {}", updated.id, updated.status));
    human.push_summary("title", updated.title.clone());

    emit_success(output, "status", &updated, Some(&human))
}

pub async fn show(id: TaskId, connect_options: ConnectOptions, output: OutputOptions) -> Result<()> {
    let dashboard = connect(connect_options)?;
    let found = dashboard.search(id).await?;

    let human = match &found {
        Some(task) => {
            let mut human = HumanOutput::new(describe(task));
            if !task.description.is_empty() {
                human.push_detail(task.description.clone());
            }
            human
        }
        None => HumanOutput::new(format!("No task with id {id}")),
    };

    emit_success(output, "show", &found, Some(&human))
}

pub async fn stats(connect_options: ConnectOptions, output: OutputOptions) -> Result<()> {
    let dashboard = connect(connect_options)?;
    dashboard.init().await?;

    let state = dashboard.state();
    let total_tasks = state.tasks.as_ref().map(|tasks| tasks.len()).unwrap_or(0);

    #[derive(serde::Serialize)]
    struct StatsData<'a> {
        total_tasks: usize,
        status_by_day: &'a crate::aggregate::StatusByDay,
        priority_counts: &'a crate::aggregate::PriorityCounts,
        #[serde(skip_serializing_if = "Option::is_none")]
        integrity_error: &'a Option<String>,
    }

    let mut human = HumanOutput::new("Task aggregates");
    human.push_summary("tasks", total_tasks.to_string());
    human.push_summary("days", state.status_by_day.len().to_string());
    for (day, counts) in &state.status_by_day {
        human.push_detail(format!(
            "{day}  To-Do {} | In Progress {} | Completed {}",
            counts.to_do, counts.in_progress, counts.completed
        ));
    }
    human.push_detail(format!(
        "Priority: Low {} | Medium {} | High {}",
        state.priority_counts.low, state.priority_counts.medium, state.priority_counts.high
    ));
    if let Some(message) = &state.integrity_error {
        human.push_warning(message.clone());
    }

    let data = StatsData {
        total_tasks,
        status_by_day: &state.status_by_day,
        priority_counts: &state.priority_counts,
        integrity_error: &state.integrity_error,
    };

    emit_success(output, "stats", &data, Some(&human))
}

fn parse_due(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        Error::InvalidArgument(format!("invalid due date '{}' (expected YYYY-MM-DD)", raw.trim()))
    })
}

fn describe(task: &TaskRecord) -> String {
    format!(
        "#{} [{}] ({}) due {}  {}",
        task.id, task.status, task.priority, task.due_date, task.title
    )
}
