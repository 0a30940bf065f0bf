//! Core library modules of tasksync.
//!
//! - **Model**: [`task`] (tasks, ids, drafts, patches), [`filter`] (view filters and projection)
//! - **State**: [`reconciler`] (optimistic local state synchronized with the task service)
//! - **Persistence**: [`preferences`] (active filter), [`config`], [`data_storage`]
//! - **Presentation**: [`view`] (terminal tables), [`messages`] (texts and output macros)
//!
//! ```rust,no_run
//! use tasksync::api::TaskClient;
//! use tasksync::libs::config::Config;
//! use tasksync::libs::filter::Filter;
//! use tasksync::libs::reconciler::Reconciler;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::read()?;
//! let reconciler = Reconciler::new(TaskClient::new(&config.server()));
//! reconciler.initialize().await?;
//! reconciler.add_task("buy milk");
//! let visible = reconciler.project(Filter::All);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data_storage;
pub mod filter;
pub mod messages;
pub mod preferences;
pub mod reconciler;
pub mod task;
pub mod view;
