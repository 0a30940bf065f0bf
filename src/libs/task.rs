//! Task data model shared by the remote client, the reconciler and the views.
//!
//! A [`Task`] is identified by a [`TaskId`]. Identifiers handed out by the
//! task service are positive; identifiers minted locally for tasks whose
//! creation has not been confirmed yet are negative (see
//! [`TaskId::is_provisional`]). The two ranges never overlap, so a
//! provisional entry can live in the same collection as confirmed ones.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl TaskId {
    /// Returns `true` for identifiers minted locally before the server
    /// assigned a final one.
    pub fn is_provisional(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(TaskId)
    }
}

/// A single entry of the task list.
///
/// `removed` marks a soft-deleted task that can still be restored. It is
/// independent from `checked`: a completed task can be removed and keeps its
/// completion state when restored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub value: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub removed: bool,
}

impl Task {
    pub fn new(id: TaskId, value: &str) -> Self {
        Task {
            id,
            value: value.to_string(),
            checked: false,
            removed: false,
        }
    }

    /// Only open tasks can be renamed.
    pub fn is_editable(&self) -> bool {
        !self.checked && !self.removed
    }

    /// Tasks in the trash keep their completion state frozen.
    pub fn is_checkable(&self) -> bool {
        !self.removed
    }

    /// Builds the creation payload for this task.
    pub fn draft(&self) -> TaskDraft {
        TaskDraft {
            value: self.value.clone(),
            checked: self.checked,
            removed: self.removed,
        }
    }

    /// Applies the fields present in `patch`, leaving the others untouched.
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(value) = &patch.value {
            self.value = value.clone();
        }
        if let Some(checked) = patch.checked {
            self.checked = checked;
        }
        if let Some(removed) = patch.removed {
            self.removed = removed;
        }
    }
}

/// Body of a creation request. The server assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub value: String,
    pub checked: bool,
    pub removed: bool,
}

impl TaskDraft {
    pub fn new(value: &str) -> Self {
        TaskDraft {
            value: value.to_string(),
            checked: false,
            removed: false,
        }
    }
}

/// Partial update body. Absent fields are left out of the JSON payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<bool>,
}

impl TaskPatch {
    pub fn value(value: &str) -> Self {
        TaskPatch {
            value: Some(value.to_string()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.checked.is_none() && self.removed.is_none()
    }

    /// Folds a later patch into this one; fields set in `later` win.
    pub fn merge(&mut self, later: TaskPatch) {
        if later.value.is_some() {
            self.value = later.value;
        }
        if later.checked.is_some() {
            self.checked = later.checked;
        }
        if later.removed.is_some() {
            self.removed = later.removed;
        }
    }
}
