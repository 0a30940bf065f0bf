//! # tasksync
//!
//! A task list client that applies every change locally first and
//! synchronizes it with a remote task service in the background.
//!
//! ## Features
//!
//! - **Optimistic updates**: add, rename, complete, trash and restore tasks without waiting for the server
//! - **Reconciliation**: provisional ids are swapped for server ids, outdated server responses are dropped
//! - **Soft delete**: removed tasks stay in the trash until it is emptied
//! - **Persisted filter**: the active view (all, checked, unchecked, removed) survives restarts
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasksync::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
