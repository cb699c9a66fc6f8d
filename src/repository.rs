//! Remote task service access.
//!
//! [`TaskRepository`] is the only boundary the sync layer depends on; the
//! store never touches the wire directly. [`HttpTaskRepository`] speaks the
//! task service's actual REST routes, including its `/api/`-prefixed status
//! transition endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;

use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::task::{TaskDraft, TaskId, TaskRecord, TaskStatus};

/// Repository contract for task CRUD against the remote source of truth.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Fetch the full task collection.
    async fn list_all(&self) -> Result<Vec<TaskRecord>>;

    /// Fetch a single task. Missing ids surface as [`Error::TaskNotFound`].
    async fn get_by_id(&self, id: TaskId) -> Result<TaskRecord>;

    /// Create a task from a draft; the service assigns the id.
    async fn create(&self, draft: &TaskDraft) -> Result<TaskRecord>;

    /// Transition a task's status.
    async fn update_status(&self, id: TaskId, status: TaskStatus) -> Result<TaskRecord>;
}

/// HTTP implementation of [`TaskRepository`].
pub struct HttpTaskRepository {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTaskRepository {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn collection_url(&self) -> String {
        format!("{}/tasks/", self.base_url)
    }

    fn task_url(&self, id: TaskId) -> String {
        format!("{}/tasks/{id}", self.base_url)
    }

    fn status_url(&self, id: TaskId) -> String {
        format!("{}/api/tasks/{id}/status", self.base_url)
    }
}

#[async_trait]
impl TaskRepository for HttpTaskRepository {
    async fn list_all(&self) -> Result<Vec<TaskRecord>> {
        let response = self.client.get(self.collection_url()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(service_error(status, read_body(response).await));
        }
        Ok(response.json().await?)
    }

    async fn get_by_id(&self, id: TaskId) -> Result<TaskRecord> {
        let response = self.client.get(self.task_url(id)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(lookup_error(status, id, read_body(response).await));
        }
        Ok(response.json().await?)
    }

    async fn create(&self, draft: &TaskDraft) -> Result<TaskRecord> {
        let response = self
            .client
            .post(self.collection_url())
            .json(draft)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(create_error(status, read_body(response).await));
        }
        Ok(response.json().await?)
    }

    async fn update_status(&self, id: TaskId, new_status: TaskStatus) -> Result<TaskRecord> {
        let response = self
            .client
            .patch(self.status_url(id))
            .json(&json!({ "status": new_status }))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(lookup_error(status, id, read_body(response).await));
        }
        Ok(response.json().await?)
    }
}

async fn read_body(response: reqwest::Response) -> String {
    response.text().await.unwrap_or_default()
}

fn lookup_error(status: StatusCode, id: TaskId, body: String) -> Error {
    if status == StatusCode::NOT_FOUND {
        Error::TaskNotFound(id)
    } else {
        service_error(status, body)
    }
}

fn create_error(status: StatusCode, body: String) -> Error {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            Error::DraftRejected(message_or(body, "draft rejected"))
        }
        _ => service_error(status, body),
    }
}

fn service_error(status: StatusCode, body: String) -> Error {
    Error::Service {
        status: status.as_u16(),
        message: message_or(body, status.canonical_reason().unwrap_or("unexpected response")),
    }
}

fn message_or(body: String, fallback: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
