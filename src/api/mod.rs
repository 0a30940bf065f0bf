//! Access to the remote task service.
//!
//! [`TaskApi`] is the seam between the reconciler and the network: the
//! reconciler only ever talks to the service through it, which keeps the
//! synchronization logic testable against an in-memory double. The HTTP
//! implementation is [`tasks::TaskClient`].
//!
//! Every operation is one request and one response. Nothing is retried; any
//! transport failure or non-success status is reported as a [`RemoteError`]
//! that carries the underlying cause.

use crate::libs::filter::Filter;
use crate::libs::task::{Task, TaskDraft, TaskId, TaskPatch};
use reqwest::StatusCode;
use serde::Serialize;
use std::future::Future;
use thiserror::Error;

pub mod tasks;

pub use tasks::TaskClient;

/// Longest response body excerpt kept in a [`RemoteError::Status`].
pub const BODY_EXCERPT_LEN: usize = 200;

/// Failure of a single call to the task service.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("{url} responded with {status}: {body}")]
    Status { url: String, status: StatusCode, body: String },

    /// The response body is not the expected JSON.
    #[error("unexpected response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl RemoteError {
    /// Shortens a response body for inclusion in an error.
    pub fn excerpt(body: &str) -> String {
        let body = body.trim();
        match body.char_indices().nth(BODY_EXCERPT_LEN) {
            Some((cut, _)) => format!("{}...", &body[..cut]),
            None => body.to_string(),
        }
    }
}

/// CRUD operations of the task service.
///
/// Methods return `Send` futures so calls can run as background tokio tasks
/// while the caller carries on with the optimistic local state.
pub trait TaskApi: Send + Sync + 'static {
    /// Fetches the whole task collection.
    fn list_tasks(&self) -> impl Future<Output = Result<Vec<Task>, RemoteError>> + Send;

    /// Creates a task; the returned task carries the server-assigned id.
    fn create_task(&self, draft: TaskDraft) -> impl Future<Output = Result<Task, RemoteError>> + Send;

    /// Applies a partial update and returns the updated task.
    fn update_task(&self, id: TaskId, patch: TaskPatch) -> impl Future<Output = Result<Task, RemoteError>> + Send;

    /// Permanently deletes a task.
    fn delete_task(&self, id: TaskId) -> impl Future<Output = Result<(), RemoteError>> + Send;
}

/// Server-side filtering supported by the list endpoint.
///
/// Serialized as `?removed=true&checked=false`; absent fields are not sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
}

impl TaskQuery {
    /// Query selecting the same tasks a view filter shows.
    pub fn for_filter(filter: Filter) -> Self {
        match filter {
            Filter::All => TaskQuery {
                removed: Some(false),
                checked: None,
            },
            Filter::Checked => TaskQuery {
                removed: Some(false),
                checked: Some(true),
            },
            Filter::Unchecked => TaskQuery {
                removed: Some(false),
                checked: Some(false),
            },
            Filter::Removed => TaskQuery {
                removed: Some(true),
                checked: None,
            },
        }
    }
}
