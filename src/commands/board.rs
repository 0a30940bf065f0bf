//! Session context shared by the task commands.
//!
//! A [`Board`] bundles the reconciler with the persisted filter preference,
//! so every command works on the same explicit state object instead of
//! reaching for globals.

use crate::{
    api::TaskClient,
    libs::{
        config::{Config, API_URL_ENV},
        filter::Filter,
        messages::Message,
        preferences::{FilePreferences, FilterPreference},
        reconciler::Reconciler,
        task::{Task, TaskId},
        view::View,
    },
    msg_debug, msg_error, msg_warning,
};
use anyhow::Result;

pub struct Board {
    pub reconciler: Reconciler<TaskClient>,
    pub preferences: FilterPreference<FilePreferences>,
    filter: Filter,
}

impl Board {
    /// Reads the configuration, loads the task list and the stored filter.
    ///
    /// # Errors
    ///
    /// A failed initial load renders the error surface and is returned as
    /// an [`InitializationError`](crate::libs::reconciler::InitializationError), ending the command without printing it
    /// a second time (see [`needs_report`](super::needs_report)).
    pub async fn open() -> Result<Self> {
        let config = Config::read()?;
        let server = config.server();
        if std::env::var(API_URL_ENV).is_ok() {
            msg_debug!(Message::ConfigApiUrlOverride(server.api_url.clone()));
        }

        let reconciler = Reconciler::new(TaskClient::new(&server)).purge_remote(config.sync().purge_remote);
        let preferences = FilterPreference::new(FilePreferences::new()?);
        let filter = preferences.load_filter();

        if let Err(e) = reconciler.initialize().await {
            View::render(&reconciler.snapshot(), filter);
            return Err(e.into());
        }

        Ok(Self {
            reconciler,
            preferences,
            filter,
        })
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Switches the active filter and persists it.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.preferences.save_filter(filter);
    }

    /// Looks a task up by id, reporting unknown ids.
    pub fn task(&self, id: TaskId) -> Option<Task> {
        let id = self.reconciler.resolve(id);
        let task = self.reconciler.snapshot().get(id).cloned();
        if task.is_none() {
            msg_error!(Message::TaskNotFound(id));
        }
        task
    }

    pub fn render(&self) {
        View::render(&self.reconciler.snapshot(), self.filter);
    }

    /// Waits for background synchronization, then renders the list.
    pub async fn finish(&self) -> Result<()> {
        self.reconciler.settle().await;
        self.render();
        for id in &self.reconciler.snapshot().unsynced {
            msg_warning!(Message::TaskUnsynced(*id));
        }
        Ok(())
    }
}
