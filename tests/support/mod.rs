#![allow(dead_code)]

//! Shared test support: an in-memory stand-in for the remote task service.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use taskdash::error::{Error, Result};
use taskdash::repository::TaskRepository;
use taskdash::task::{TaskDraft, TaskId, TaskPriority, TaskRecord, TaskStatus};

/// In-memory task service double with failure injection.
pub struct FakeService {
    tasks: Mutex<Vec<TaskRecord>>,
    next_id: AtomicU64,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    list_calls: AtomicU64,
}

impl FakeService {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    pub fn seeded(tasks: Vec<TaskRecord>) -> Self {
        let next_id = tasks.iter().map(|task| task.id).max().unwrap_or(0) + 1;
        Self {
            tasks: Mutex::new(tasks),
            next_id: AtomicU64::new(next_id),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            list_calls: AtomicU64::new(0),
        }
    }

    /// Replace the service-side collection wholesale.
    pub fn set_tasks(&self, tasks: Vec<TaskRecord>) {
        *self.tasks.lock().expect("tasks lock") = tasks;
    }

    /// Inject a record as-is, bypassing draft validation. Lets tests plant
    /// data the dashboard should reject (unknown priorities, duplicate ids).
    pub fn push_raw(&self, record: TaskRecord) {
        self.tasks.lock().expect("tasks lock").push(record);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> u64 {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn unavailable() -> Error {
        Error::Service {
            status: 503,
            message: "service offline".to_string(),
        }
    }
}

#[async_trait]
impl TaskRepository for FakeService {
    async fn list_all(&self) -> Result<Vec<TaskRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        Ok(self.tasks.lock().expect("tasks lock").clone())
    }

    async fn get_by_id(&self, id: TaskId) -> Result<TaskRecord> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        self.tasks
            .lock()
            .expect("tasks lock")
            .iter()
            .find(|task| task.id == id)
            .cloned()
            .ok_or(Error::TaskNotFound(id))
    }

    async fn create(&self, draft: &TaskDraft) -> Result<TaskRecord> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        if draft.title.trim().is_empty() {
            return Err(Error::DraftRejected("title required".to_string()));
        }
        let record = TaskRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: draft.title.clone(),
            description: draft.description.clone(),
            priority: draft.priority.as_str().to_string(),
            due_date: draft.due_date.to_string(),
            status: draft.status.as_str().to_string(),
        };
        self.tasks.lock().expect("tasks lock").push(record.clone());
        Ok(record)
    }

    async fn update_status(&self, id: TaskId, new_status: TaskStatus) -> Result<TaskRecord> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        let mut tasks = self.tasks.lock().expect("tasks lock");
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(Error::TaskNotFound(id))?;
        task.status = new_status.as_str().to_string();
        Ok(task.clone())
    }
}

pub fn record(id: TaskId, priority: &str, due_date: &str, status: &str) -> TaskRecord {
    TaskRecord {
        id,
        title: format!("task {id}"),
        description: String::new(),
        priority: priority.to_string(),
        due_date: due_date.to_string(),
        status: status.to_string(),
    }
}

pub fn draft(title: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        description: "from test".to_string(),
        priority: TaskPriority::Low,
        due_date: NaiveDate::from_ymd_opt(2024, 1, 10).expect("date"),
        status: TaskStatus::ToDo,
    }
}
