use super::filter::Filter;
use super::messages::Message;
use super::reconciler::{Phase, Snapshot};
use super::task::Task;
use crate::{msg_error, msg_info, msg_print};
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// Builds the task table for one filter.
    ///
    /// Provisional ids are shown as `new` until the server confirms them; a
    /// task the server refused to create is marked `not saved`.
    pub fn tasks_table(snapshot: &Snapshot, tasks: &[Task]) -> Table {
        let mut table = Table::new();

        table.add_row(row!["ID", "TASK", "DONE", "SYNC"]);
        for task in tasks {
            let id = if task.id.is_provisional() {
                "new".to_string()
            } else {
                task.id.to_string()
            };
            let done = if task.checked { "[x]" } else { "[ ]" };
            let sync = if snapshot.is_unsynced(task.id) {
                "not saved"
            } else if task.id.is_provisional() {
                "saving"
            } else {
                ""
            };
            table.add_row(row![id, task.value, done, sync]);
        }

        table
    }

    /// Renders the whole surface for `filter`.
    ///
    /// A failed session shows only the error; no task data is displayed.
    pub fn render(snapshot: &Snapshot, filter: Filter) {
        match &snapshot.phase {
            Phase::Failed(_) => {
                msg_error!(Message::InitializationFailed, true);
            }
            Phase::Loading => {}
            Phase::Ready => {
                let tasks = snapshot.project(filter);
                msg_print!(Message::TasksHeader(filter), true);
                if tasks.is_empty() {
                    msg_info!(Message::NoTasksForFilter(filter));
                } else {
                    Self::tasks_table(snapshot, &tasks).printstd();
                }
                if snapshot.pending > 0 {
                    msg_info!(Message::WaitingForSync(snapshot.pending));
                }
            }
        }
    }
}
