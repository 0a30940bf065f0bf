//! HTTP client for the task service.
//!
//! Endpoints, relative to the configured API URL:
//!
//! | Operation | Request                                  | Success |
//! |-----------|------------------------------------------|---------|
//! | list      | `GET /tasks/` (optional `?removed=&checked=`) | 200 + JSON array |
//! | create    | `POST /tasks/` with `{value, checked, removed}` | 2xx + created task |
//! | update    | `PUT /tasks/{id}/` with any subset of the fields | 200 + updated task |
//! | delete    | `DELETE /tasks/{id}/`                    | 2xx     |
//!
//! ```rust,no_run
//! use tasksync::api::{TaskApi, TaskClient};
//! use tasksync::libs::config::ServerConfig;
//!
//! # async fn run() -> Result<(), tasksync::api::RemoteError> {
//! let client = TaskClient::new(&ServerConfig::default());
//! let tasks = client.list_tasks().await?;
//! println!("{} task(s)", tasks.len());
//! # Ok(())
//! # }
//! ```

use super::{RemoteError, TaskApi, TaskQuery};
use crate::libs::config::ServerConfig;
use crate::libs::task::{Task, TaskDraft, TaskId, TaskPatch};
use crate::msg_debug;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

/// Task service client backed by `reqwest`.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct TaskClient {
    client: Client,
    base_url: String,
}

impl TaskClient {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/tasks/", self.base_url)
    }

    fn item_url(&self, id: TaskId) -> String {
        format!("{}/tasks/{}/", self.base_url, id)
    }

    /// Lists tasks using the service's own filtering.
    pub async fn list_tasks_where(&self, query: TaskQuery) -> Result<Vec<Task>, RemoteError> {
        let url = self.collection_url();
        let response = Self::send(&url, self.client.get(&url).query(&query)).await?;
        Self::decode(&url, response).await
    }

    async fn send(url: &str, request: RequestBuilder) -> Result<Response, RemoteError> {
        msg_debug!(format!("Sending request to {}", url));
        let response = request.send().await.map_err(|source| RemoteError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(RemoteError::Status {
            url: url.to_string(),
            status,
            body: RemoteError::excerpt(&body),
        })
    }

    async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, RemoteError> {
        let body = response.text().await.map_err(|source| RemoteError::Transport {
            url: url.to_string(),
            source,
        })?;
        serde_json::from_str(&body).map_err(|e| RemoteError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

impl TaskApi for TaskClient {
    async fn list_tasks(&self) -> Result<Vec<Task>, RemoteError> {
        let url = self.collection_url();
        let response = Self::send(&url, self.client.get(&url)).await?;
        Self::decode(&url, response).await
    }

    async fn create_task(&self, draft: TaskDraft) -> Result<Task, RemoteError> {
        let url = self.collection_url();
        let response = Self::send(&url, self.client.post(&url).json(&draft)).await?;
        Self::decode(&url, response).await
    }

    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> Result<Task, RemoteError> {
        let url = self.item_url(id);
        let response = Self::send(&url, self.client.put(&url).json(&patch)).await?;
        Self::decode(&url, response).await
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), RemoteError> {
        let url = self.item_url(id);
        Self::send(&url, self.client.delete(&url)).await?;
        Ok(())
    }
}
