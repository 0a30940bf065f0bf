use crate::libs::filter::Filter;
use crate::libs::task::TaskId;

/// Every user-facing string of the application.
///
/// Text lives in the `Display` impl in `display.rs`; call sites only pick
/// the variant and its parameters.
#[derive(Debug, Clone)]
pub enum Message {
    // === SESSION MESSAGES ===
    InitializationFailed,
    InitializationFailedDetails(String),
    TasksLoaded(usize),
    SessionNotReady,
    WaitingForSync(usize),

    // === TASK MESSAGES ===
    TaskAdded(String),
    TaskValueEmpty,
    TaskRenamed(TaskId),
    TaskChecked(TaskId),
    TaskUnchecked(TaskId),
    TaskRemoved(TaskId),
    TaskRestored(TaskId),
    TaskNotFound(TaskId),
    TaskNotEditable(TaskId),
    TaskNotCheckable(TaskId),
    TaskUnsynced(TaskId),
    TaskCreateConfirmed(TaskId, TaskId), // provisional, final
    TaskSyncFailed(String),
    BackgroundCallAborted(String),
    StaleConfirmationDiscarded(TaskId),
    DeferredEditsDropped(TaskId),
    TasksPurged(usize),
    TrashAlreadyEmpty,
    TasksHeader(Filter),
    NoTasksForFilter(Filter),
    SubmitHiddenForFilter(Filter),

    // === FILTER MESSAGES ===
    FilterActive(Filter),
    FilterSaved(Filter),
    FilterSaveFailed(String),
    FilterUnreadable(String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleServer,
    ConfigModuleSync,
    PromptSelectModules,
    ConfigApiUrlOverride(String),
    PromptApiUrl,
    PromptPurgeRemote,

    // === SHELL MESSAGES ===
    ShellWelcome,
    ShellGoodbye,
    PromptAction,
    PromptTaskValue,
    PromptFilter,
    PromptSelectTask,
    ActionAdd,
    ActionRename,
    ActionToggle,
    ActionRemove,
    ActionRestore,
    ActionEmptyTrash,
    ActionFilter,
    ActionRefresh,
    ActionQuit,
}
