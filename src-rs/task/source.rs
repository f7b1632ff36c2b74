use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use super::types::{Task, TasksEnvelope};
use crate::error::ServiceError;

/// Page size requested from the backend on every lookup.
pub const FETCH_LIMIT: usize = 1000;

/// Yields the backend's raw task rows; typing happens at lookup.
#[async_trait]
pub trait TaskSource: Send + Sync {
    async fn fetch_tasks(&self, limit: usize) -> Result<Vec<Value>, ServiceError>;
}

pub struct HttpTaskSource {
    base_url: String,
    timeout: Duration,
}

impl HttpTaskSource {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn tasks_url(&self, limit: usize) -> String {
        format!("{}/api/tasks?limit={}", self.base_url, limit)
    }
}

#[async_trait]
impl TaskSource for HttpTaskSource {
    async fn fetch_tasks(&self, limit: usize) -> Result<Vec<Value>, ServiceError> {
        // One client per call; dropped with the request.
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| ServiceError::BackendRequest(err.to_string()))?;
        let url = self.tasks_url(limit);
        debug!(%url, "fetching tasks");

        let resp = client
            .get(&url)
            .send()
            .await
            .map_err(|err| ServiceError::BackendRequest(err.to_string()))?;
        if resp.status() != StatusCode::OK {
            warn!(status = resp.status().as_u16(), "backend refused task listing");
            return Err(ServiceError::BackendUnavailable);
        }
        let envelope = resp
            .json::<TasksEnvelope>()
            .await
            .map_err(|err| ServiceError::BackendRequest(err.to_string()))?;
        Ok(envelope.data)
    }
}

/// First row whose `id` matches; rows without an integer id are skipped.
pub fn find_task(records: &[Value], id: i64) -> Result<Task, ServiceError> {
    let record = records
        .iter()
        .find(|record| record.get("id").and_then(Value::as_i64) == Some(id))
        .ok_or(ServiceError::NotFound(id))?;
    Task::from_record(record)
        .map_err(|err| ServiceError::Unexpected(format!("malformed task {}: {}", id, err)))
}

pub async fn resolve_task(source: &dyn TaskSource, id: i64) -> Result<Task, ServiceError> {
    let records = source.fetch_tasks(FETCH_LIMIT).await?;
    debug!(count = records.len(), id, "resolving task");
    find_task(&records, id)
}
