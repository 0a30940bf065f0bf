//! Optimistic task state and its reconciliation with the task service.
//!
//! [`Reconciler`] owns the task collection of a session. User intents
//! (`add_task`, `rename_task`, `set_checked`, `set_removed`,
//! `purge_removed`) are applied to the local collection synchronously and
//! the matching remote call runs in the background. Callers never wait for
//! the network; they observe the result through published snapshots.
//!
//! ## Snapshots
//!
//! Every change replaces the whole [`Snapshot`] (copy-on-write), so a
//! renderer holding an older `Arc<Snapshot>` never sees a half-applied
//! update. [`Reconciler::subscribe`] hands out a `watch` receiver that is
//! notified on each replacement.
//!
//! ## Out-of-order confirmations
//!
//! Remote calls can complete in any order. Each task carries a version that
//! is bumped by every local mutation; a server response issued at version
//! `v` is merged only if the task is still at `v`, older responses are
//! dropped. Failed updates are logged and the local state stands.
//!
//! ## Provisional identifiers
//!
//! A new task gets a negative provisional id until the service assigns the
//! final one. Edits made in the meantime are merged into a deferred patch and
//! sent against the final id once creation is confirmed. The
//! provisional → final mapping is kept, so callers holding a provisional id
//! can keep using it. When creation fails the task stays in the list and is
//! reported in [`Snapshot::unsynced`].
//!
//! ## Failure model
//!
//! A failed initial load is terminal for the session: the phase becomes
//! [`Phase::Failed`], no tasks are shown and intents are ignored. Failures of
//! later calls never change the phase.

use crate::api::{RemoteError, TaskApi};
use crate::libs::filter::{self, Filter};
use crate::libs::messages::Message;
use crate::libs::task::{Task, TaskDraft, TaskId, TaskPatch};
use crate::{msg_debug, msg_warning};
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// The initial task list could not be loaded.
#[derive(Debug, Error)]
#[error("failed to load tasks: {0}")]
pub struct InitializationError(#[from] pub RemoteError);

/// A background call failed after its change was applied locally.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("failed to create task {provisional} on server: {source}")]
    Create {
        provisional: TaskId,
        #[source]
        source: RemoteError,
    },

    #[error("failed to update task {id} on server: {source}")]
    Update {
        id: TaskId,
        #[source]
        source: RemoteError,
    },

    #[error("failed to delete task {id} on server: {source}")]
    Delete {
        id: TaskId,
        #[source]
        source: RemoteError,
    },
}

impl MutationError {
    pub fn message(&self) -> Message {
        Message::TaskSyncFailed(self.to_string())
    }

    fn report(&self) {
        msg_warning!(self.message());
    }
}

/// Lifecycle of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// The initial list has not arrived yet.
    Loading,
    /// Tasks are loaded and intents are accepted.
    Ready,
    /// The initial load failed; carries the error text.
    Failed(String),
}

/// Immutable view of the session state at one point in time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub phase: Phase,
    /// Newest first.
    pub tasks: Arc<Vec<Task>>,
    /// Provisional ids of tasks whose creation was rejected by the service.
    pub unsynced: BTreeSet<TaskId>,
    /// Remote calls still running.
    pub pending: usize,
}

impl Snapshot {
    /// Tasks visible under `filter`. Empty unless the session is ready.
    pub fn project(&self, filter: Filter) -> Vec<Task> {
        match self.phase {
            Phase::Ready => filter::project(&self.tasks, filter),
            _ => Vec::new(),
        }
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn is_unsynced(&self, id: TaskId) -> bool {
        self.unsynced.contains(&id)
    }

    /// Whether the trash holds anything to purge.
    pub fn has_removed(&self) -> bool {
        self.tasks.iter().any(|task| task.removed)
    }
}

/// Mutable bookkeeping behind the published snapshots.
#[derive(Debug)]
struct Ledger {
    phase: Phase,
    tasks: Arc<Vec<Task>>,
    versions: HashMap<TaskId, u64>,
    /// Provisional id → server id, for creations that were confirmed.
    aliases: HashMap<TaskId, TaskId>,
    /// Creations in flight, keyed by provisional id, with the edits made
    /// since the create request was sent.
    deferred: HashMap<TaskId, TaskPatch>,
    /// Provisional tasks purged locally while their creation was in flight.
    purged: HashSet<TaskId>,
    unsynced: BTreeSet<TaskId>,
    next_provisional: i64,
    pending: usize,
}

impl Ledger {
    fn new() -> Self {
        Ledger {
            phase: Phase::Loading,
            tasks: Arc::new(Vec::new()),
            versions: HashMap::new(),
            aliases: HashMap::new(),
            deferred: HashMap::new(),
            purged: HashSet::new(),
            unsynced: BTreeSet::new(),
            next_provisional: -1,
            pending: 0,
        }
    }

    fn resolve(&self, id: TaskId) -> TaskId {
        self.aliases.get(&id).copied().unwrap_or(id)
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    fn allocate_provisional(&mut self) -> TaskId {
        let id = TaskId(self.next_provisional);
        self.next_provisional -= 1;
        id
    }

    /// Records a local mutation and returns the new version.
    fn bump(&mut self, id: TaskId) -> u64 {
        let version = self.versions.entry(id).or_insert(0);
        *version += 1;
        *version
    }

    fn version(&self, id: TaskId) -> Option<u64> {
        self.versions.get(&id).copied()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase.clone(),
            tasks: Arc::clone(&self.tasks),
            unsynced: self.unsynced.clone(),
            pending: self.pending,
        }
    }
}

struct Shared<A> {
    api: A,
    ledger: Mutex<Ledger>,
    published: watch::Sender<Arc<Snapshot>>,
    inflight: Mutex<Vec<JoinHandle<()>>>,
    runtime: Handle,
    purge_remote: AtomicBool,
}

/// One pending remote call. Dropping it before [`release`](Self::release),
/// which happens when the call panics or its task is cancelled, reports the
/// call and takes it off the pending count.
struct PendingSlot<A: TaskApi> {
    reconciler: Reconciler<A>,
    armed: bool,
}

impl<A: TaskApi> PendingSlot<A> {
    fn new(reconciler: Reconciler<A>) -> Self {
        Self { reconciler, armed: true }
    }

    /// The call completed; its confirmation settles the count.
    fn release(mut self) {
        self.armed = false;
    }
}

impl<A: TaskApi> Drop for PendingSlot<A> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        msg_warning!(Message::BackgroundCallAborted("the call ended without a response".to_string()));
        let mut ledger = self.reconciler.shared.ledger.lock();
        ledger.pending = ledger.pending.saturating_sub(1);
        self.reconciler.publish(&ledger);
    }
}

/// Owner of the task collection of one session.
///
/// Clones share the same state; hand a clone to whatever renders the list.
pub struct Reconciler<A: TaskApi> {
    shared: Arc<Shared<A>>,
}

impl<A: TaskApi> Clone for Reconciler<A> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<A: TaskApi> Reconciler<A> {
    /// Creates a reconciler that runs remote calls on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime, like `tokio::spawn`.
    pub fn new(api: A) -> Self {
        Self::with_handle(api, Handle::current())
    }

    /// Creates a reconciler that runs remote calls on `runtime`.
    pub fn with_handle(api: A, runtime: Handle) -> Self {
        let ledger = Ledger::new();
        let (published, _) = watch::channel(Arc::new(ledger.snapshot()));
        Self {
            shared: Arc::new(Shared {
                api,
                ledger: Mutex::new(ledger),
                published,
                inflight: Mutex::new(Vec::new()),
                runtime,
                purge_remote: AtomicBool::new(false),
            }),
        }
    }

    /// Makes [`purge_removed`](Self::purge_removed) also delete the purged
    /// tasks on the server. The setting is shared by all clones.
    pub fn purge_remote(self, enabled: bool) -> Self {
        self.shared.purge_remote.store(enabled, Ordering::Relaxed);
        self
    }

    fn purges_remote(&self) -> bool {
        self.shared.purge_remote.load(Ordering::Relaxed)
    }

    /// Loads the task list, replacing the local collection.
    ///
    /// # Errors
    ///
    /// A failed load moves the session to [`Phase::Failed`] and is returned
    /// as an [`InitializationError`].
    pub async fn initialize(&self) -> Result<(), InitializationError> {
        let result = self.shared.api.list_tasks().await;

        let mut ledger = self.shared.ledger.lock();
        match result {
            Ok(tasks) => {
                msg_debug!(Message::TasksLoaded(tasks.len()));
                ledger.versions = tasks.iter().map(|task| (task.id, 0)).collect();
                ledger.tasks = Arc::new(tasks);
                ledger.phase = Phase::Ready;
                self.publish(&ledger);
                Ok(())
            }
            Err(e) => {
                let err = InitializationError::from(e);
                msg_debug!(Message::InitializationFailedDetails(err.to_string()));
                ledger.tasks = Arc::new(Vec::new());
                ledger.versions.clear();
                ledger.phase = Phase::Failed(err.to_string());
                self.publish(&ledger);
                Err(err)
            }
        }
    }

    /// Adds a task at the top of the list and creates it on the server.
    ///
    /// Returns the provisional id, or `None` when `value` is empty or the
    /// session is not ready (nothing changes and no request is sent).
    pub fn add_task(&self, value: &str) -> Option<TaskId> {
        if value.is_empty() {
            return None;
        }

        let mut ledger = self.shared.ledger.lock();
        if ledger.phase != Phase::Ready {
            msg_debug!(Message::SessionNotReady);
            return None;
        }

        let provisional = ledger.allocate_provisional();
        let task = Task::new(provisional, value);
        let draft = task.draft();
        Arc::make_mut(&mut ledger.tasks).insert(0, task);
        ledger.versions.insert(provisional, 0);
        ledger.deferred.insert(provisional, TaskPatch::default());
        ledger.pending += 1;
        self.publish(&ledger);
        drop(ledger);

        self.spawn_create(provisional, draft);
        Some(provisional)
    }

    /// Renames a task. The server is updated in the background; a failed
    /// update does not restore the old name.
    pub fn rename_task(&self, id: TaskId, value: &str) -> bool {
        self.mutate(id, |task| {
            task.value = value.to_string();
            TaskPatch::value(value)
        })
    }

    /// Marks a task as done or not done.
    pub fn set_checked(&self, id: TaskId, checked: bool) -> bool {
        self.mutate(id, |task| {
            task.checked = checked;
            TaskPatch {
                value: Some(task.value.clone()),
                checked: Some(checked),
                removed: None,
            }
        })
    }

    /// Moves a task to the trash (`removed = true`) or restores it.
    pub fn set_removed(&self, id: TaskId, removed: bool) -> bool {
        self.mutate(id, |task| {
            task.removed = removed;
            TaskPatch {
                value: Some(task.value.clone()),
                checked: None,
                removed: Some(removed),
            }
        })
    }

    /// Drops every task in the trash from the local list and returns how many
    /// were dropped. Calling it again right away is a no-op.
    ///
    /// The server is only told when remote purging is enabled, in which case
    /// a `DELETE` is sent for every purged task.
    pub fn purge_removed(&self) -> usize {
        let mut ledger = self.shared.ledger.lock();
        if ledger.phase != Phase::Ready {
            msg_debug!(Message::SessionNotReady);
            return 0;
        }

        let (purged, kept): (Vec<Task>, Vec<Task>) = ledger.tasks.iter().cloned().partition(|task| task.removed);
        if purged.is_empty() {
            return 0;
        }

        ledger.tasks = Arc::new(kept);
        let mut deletions = Vec::new();
        for task in &purged {
            ledger.versions.remove(&task.id);
            ledger.unsynced.remove(&task.id);
            if ledger.deferred.contains_key(&task.id) {
                ledger.purged.insert(task.id);
            } else if self.purges_remote() && !task.id.is_provisional() {
                deletions.push(task.id);
            }
        }
        ledger.pending += deletions.len();
        self.publish(&ledger);
        drop(ledger);

        for id in deletions {
            self.spawn_delete(id);
        }
        purged.len()
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.shared.published.borrow().clone()
    }

    /// Receiver notified whenever a new snapshot is published.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.shared.published.subscribe()
    }

    pub fn phase(&self) -> Phase {
        self.snapshot().phase.clone()
    }

    /// Tasks visible under `filter` in the current snapshot.
    pub fn project(&self, filter: Filter) -> Vec<Task> {
        self.snapshot().project(filter)
    }

    pub fn has_removed(&self) -> bool {
        self.snapshot().has_removed()
    }

    /// Maps a provisional id to the server id once creation is confirmed.
    pub fn resolve(&self, id: TaskId) -> TaskId {
        self.shared.ledger.lock().resolve(id)
    }

    /// Waits until every background call, including follow-ups they
    /// trigger, has finished.
    ///
    pub async fn settle(&self) {
        loop {
            let handles = std::mem::take(&mut *self.shared.inflight.lock());
            if handles.is_empty() {
                break;
            }
            for handle in handles {
                if let Err(e) = handle.await {
                    msg_debug!(Message::BackgroundCallAborted(e.to_string()));
                }
            }
        }
    }

    fn publish(&self, ledger: &Ledger) {
        self.shared.published.send_replace(Arc::new(ledger.snapshot()));
    }

    fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = self.shared.runtime.spawn(future);
        let mut inflight = self.shared.inflight.lock();
        inflight.retain(|handle| !handle.is_finished());
        inflight.push(handle);
    }

    /// Applies `change` to the task locally and sends the patch it returns.
    fn mutate<F>(&self, id: TaskId, change: F) -> bool
    where
        F: FnOnce(&mut Task) -> TaskPatch,
    {
        let mut ledger = self.shared.ledger.lock();
        if ledger.phase != Phase::Ready {
            msg_debug!(Message::SessionNotReady);
            return false;
        }

        let id = ledger.resolve(id);
        let Some(position) = ledger.position(id) else {
            msg_warning!(Message::TaskNotFound(id));
            return false;
        };

        let patch = change(&mut Arc::make_mut(&mut ledger.tasks)[position]);
        let version = ledger.bump(id);

        if id.is_provisional() {
            // Creation still in flight: send later against the final id.
            // Without a deferred entry the creation failed and there is
            // nothing on the server to update.
            if let Some(deferred) = ledger.deferred.get_mut(&id) {
                deferred.merge(patch);
            }
            self.publish(&ledger);
            return true;
        }

        ledger.pending += 1;
        self.publish(&ledger);
        drop(ledger);

        self.spawn_update(id, version, patch);
        true
    }

    fn spawn_create(&self, provisional: TaskId, draft: TaskDraft) {
        let this = self.clone();
        self.spawn(async move {
            let slot = PendingSlot::new(this.clone());
            let result = this.shared.api.create_task(draft).await;
            slot.release();
            this.confirm_create(provisional, result);
        });
    }

    fn spawn_update(&self, id: TaskId, version: u64, patch: TaskPatch) {
        let this = self.clone();
        self.spawn(async move {
            let slot = PendingSlot::new(this.clone());
            let result = this.shared.api.update_task(id, patch).await;
            slot.release();
            this.confirm_update(id, version, result);
        });
    }

    fn spawn_delete(&self, id: TaskId) {
        let this = self.clone();
        self.spawn(async move {
            let slot = PendingSlot::new(this.clone());
            let result = this.shared.api.delete_task(id).await;
            slot.release();
            this.confirm_delete(id, result);
        });
    }

    fn confirm_create(&self, provisional: TaskId, result: Result<Task, RemoteError>) {
        let mut ledger = self.shared.ledger.lock();
        ledger.pending = ledger.pending.saturating_sub(1);
        let deferred = ledger.deferred.remove(&provisional).unwrap_or_default();
        let purged = ledger.purged.remove(&provisional);

        let created = match result {
            Ok(created) => created,
            Err(source) => {
                MutationError::Create { provisional, source }.report();
                if ledger.position(provisional).is_some() {
                    ledger.unsynced.insert(provisional);
                }
                if !deferred.is_empty() {
                    msg_warning!(Message::DeferredEditsDropped(provisional));
                }
                self.publish(&ledger);
                return;
            }
        };

        let final_id = created.id;
        msg_debug!(Message::TaskCreateConfirmed(provisional, final_id));
        ledger.aliases.insert(provisional, final_id);
        let version = ledger.versions.remove(&provisional);

        if let Some(position) = ledger.position(provisional) {
            let already_listed = ledger.position(final_id).is_some();
            let tasks = Arc::make_mut(&mut ledger.tasks);
            if already_listed {
                tasks.remove(position);
            } else if version == Some(0) {
                tasks[position] = created;
            } else {
                tasks[position].id = final_id;
            }
            ledger.versions.insert(final_id, version.unwrap_or(0));
        }

        // A task purged before its creation was confirmed is either deleted
        // outright or gets its pending edits, which include the removal.
        let delete = purged && self.purges_remote();
        let flush = !delete && !deferred.is_empty();
        let flush_version = ledger.version(final_id).unwrap_or(0);
        if delete || flush {
            ledger.pending += 1;
        }
        self.publish(&ledger);
        drop(ledger);

        if delete {
            self.spawn_delete(final_id);
        } else if flush {
            self.spawn_update(final_id, flush_version, deferred);
        }
    }

    fn confirm_update(&self, id: TaskId, version: u64, result: Result<Task, RemoteError>) {
        let mut ledger = self.shared.ledger.lock();
        ledger.pending = ledger.pending.saturating_sub(1);

        match result {
            Ok(updated) => {
                if ledger.version(id) == Some(version) {
                    if let Some(position) = ledger.position(id) {
                        let confirmed = Task { id, ..updated };
                        if ledger.tasks[position] != confirmed {
                            Arc::make_mut(&mut ledger.tasks)[position] = confirmed;
                        }
                    }
                } else {
                    msg_debug!(Message::StaleConfirmationDiscarded(id));
                }
            }
            Err(source) => MutationError::Update { id, source }.report(),
        }
        self.publish(&ledger);
    }

    fn confirm_delete(&self, id: TaskId, result: Result<(), RemoteError>) {
        let mut ledger = self.shared.ledger.lock();
        ledger.pending = ledger.pending.saturating_sub(1);
        if let Err(source) = result {
            MutationError::Delete { id, source }.report();
        }
        self.publish(&ledger);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn mutation_failure_message_names_task_and_cause() {
        let err = MutationError::Update {
            id: TaskId(5),
            source: RemoteError::Status {
                url: "http://localhost/tasks/5/".to_string(),
                status: StatusCode::BAD_GATEWAY,
                body: "upstream down".to_string(),
            },
        };

        let text = err.message().to_string();
        assert!(text.contains("task 5"));
        assert!(text.contains("upstream down"));
        assert!(text.contains("kept locally"));
    }
}
