//! Text of every [`Message`] variant.
//!
//! Keeping the wording in one match makes missing texts a compile error and
//! keeps the tone consistent across commands.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === SESSION MESSAGES ===
            Message::InitializationFailed => "Something went wrong. Please try again.".to_string(),
            Message::InitializationFailedDetails(err) => format!("Failed to load tasks: {}", err),
            Message::TasksLoaded(count) => format!("Loaded {} task(s) from the server", count),
            Message::SessionNotReady => "Tasks are not loaded; no changes were applied".to_string(),
            Message::WaitingForSync(count) => format!("Waiting for {} pending request(s) to finish...", count),

            // === TASK MESSAGES ===
            Message::TaskAdded(value) => format!("Task '{}' added", value),
            Message::TaskValueEmpty => "Task text is empty; nothing to add".to_string(),
            Message::TaskRenamed(id) => format!("Task {} renamed", id),
            Message::TaskChecked(id) => format!("Task {} marked as done", id),
            Message::TaskUnchecked(id) => format!("Task {} marked as not done", id),
            Message::TaskRemoved(id) => format!("Task {} moved to trash", id),
            Message::TaskRestored(id) => format!("Task {} restored from trash", id),
            Message::TaskNotFound(id) => format!("Task {} not found", id),
            Message::TaskNotEditable(id) => format!("Task {} is done or in the trash and cannot be renamed", id),
            Message::TaskNotCheckable(id) => format!("Task {} is in the trash; restore it first", id),
            Message::TaskUnsynced(id) => format!("Task {} is kept locally but was not saved on the server", id),
            Message::TaskCreateConfirmed(provisional, id) => format!("Task {} confirmed by server as {}", provisional, id),
            Message::TaskSyncFailed(err) => format!("{}; the change is kept locally", err),
            Message::BackgroundCallAborted(reason) => format!("A background request was aborted: {}", reason),
            Message::StaleConfirmationDiscarded(id) => format!("Discarded outdated server response for task {}", id),
            Message::DeferredEditsDropped(id) => format!("Edits to unsaved task {} were not sent to the server", id),
            Message::TasksPurged(count) => format!("Trash emptied: {} task(s) deleted", count),
            Message::TrashAlreadyEmpty => "Trash is already empty".to_string(),
            Message::TasksHeader(filter) => format!("Tasks ({})", filter),
            Message::NoTasksForFilter(filter) => format!("No tasks to show for filter '{}'", filter),
            Message::SubmitHiddenForFilter(filter) => format!("New tasks cannot be added while viewing '{}'", filter),

            // === FILTER MESSAGES ===
            Message::FilterActive(filter) => format!("Active filter: {}", filter),
            Message::FilterSaved(filter) => format!("Filter set to '{}'", filter),
            Message::FilterSaveFailed(err) => format!("Failed to save filter preference: {}", err),
            Message::FilterUnreadable(err) => format!("Stored filter preference is unreadable, using 'all': {}", err),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigModuleServer => "Task server".to_string(),
            Message::ConfigModuleSync => "Synchronization".to_string(),
            Message::PromptSelectModules => "Select settings to configure".to_string(),
            Message::ConfigApiUrlOverride(url) => format!("Using task server from TASKSYNC_API_URL: {}", url),
            Message::PromptApiUrl => "Enter the task server API URL".to_string(),
            Message::PromptPurgeRemote => "Delete tasks on the server when emptying the trash?".to_string(),

            // === SHELL MESSAGES ===
            Message::ShellWelcome => "Interactive mode. Changes apply immediately and sync in the background.".to_string(),
            Message::ShellGoodbye => "Bye!".to_string(),
            Message::PromptAction => "Choose an action".to_string(),
            Message::PromptTaskValue => "Task text".to_string(),
            Message::PromptFilter => "Show tasks".to_string(),
            Message::PromptSelectTask => "Select a task".to_string(),
            Message::ActionAdd => "Add a task".to_string(),
            Message::ActionRename => "Rename a task".to_string(),
            Message::ActionToggle => "Mark done / not done".to_string(),
            Message::ActionRemove => "Move to trash".to_string(),
            Message::ActionRestore => "Restore from trash".to_string(),
            Message::ActionEmptyTrash => "Empty trash".to_string(),
            Message::ActionFilter => "Change filter".to_string(),
            Message::ActionRefresh => "Refresh".to_string(),
            Message::ActionQuit => "Quit".to_string(),
        };
        write!(f, "{}", text)
    }
}
