//! View filters and the projection of a task collection under a filter.
//!
//! The projection never mutates its input and keeps the collection order,
//! which is newest-first for locally added tasks.
//!
//! | Filter      | Visible tasks                 |
//! |-------------|-------------------------------|
//! | `all`       | not removed                   |
//! | `checked`   | checked and not removed       |
//! | `unchecked` | not checked and not removed   |
//! | `removed`   | removed (the trash)           |

use super::task::Task;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which subset of tasks is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Checked,
    Unchecked,
    Removed,
}

impl Filter {
    pub const ALL: [Filter; 4] = [Filter::All, Filter::Checked, Filter::Unchecked, Filter::Removed];

    /// Returns `true` when `task` is visible under this filter.
    pub fn admits(self, task: &Task) -> bool {
        match self {
            Filter::All => !task.removed,
            Filter::Checked => task.checked && !task.removed,
            Filter::Unchecked => !task.checked && !task.removed,
            Filter::Removed => task.removed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Checked => "checked",
            Filter::Unchecked => "unchecked",
            Filter::Removed => "removed",
        }
    }

    /// Whether new tasks may be submitted while this filter is active.
    ///
    /// Submitting is hidden in the trash and in the completed view.
    pub fn accepts_new_tasks(self) -> bool {
        matches!(self, Filter::All | Filter::Unchecked)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the tasks visible under `filter`, in collection order.
pub fn project(tasks: &[Task], filter: Filter) -> Vec<Task> {
    tasks.iter().filter(|task| filter.admits(task)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::task::TaskId;

    fn task(id: i64, checked: bool, removed: bool) -> Task {
        Task {
            id: TaskId(id),
            value: format!("task {}", id),
            checked,
            removed,
        }
    }

    #[test]
    fn filter_names_match_serialized_form() {
        for filter in Filter::ALL {
            let json = serde_json::to_string(&filter).unwrap();
            assert_eq!(json, format!("\"{}\"", filter));
        }
    }

    #[test]
    fn removed_and_checked_task_only_in_trash() {
        let t = task(1, true, true);
        assert!(!Filter::All.admits(&t));
        assert!(!Filter::Checked.admits(&t));
        assert!(!Filter::Unchecked.admits(&t));
        assert!(Filter::Removed.admits(&t));
    }

    #[test]
    fn projection_keeps_order() {
        let tasks = vec![task(3, false, false), task(2, true, false), task(1, false, false)];
        let ids: Vec<i64> = project(&tasks, Filter::Unchecked).iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![3, 1]);
    }
}
