//! Command-line surface of tasksync.
//!
//! Each command loads the task list, applies one intent through the
//! reconciler, waits for the background synchronization and renders the
//! result. `shell` keeps the session open and re-renders after every intent.

pub mod board;
pub mod filter;
pub mod init;
pub mod list;
pub mod shell;
pub mod task;
pub mod trash;

use crate::libs::reconciler::InitializationError;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Show tasks")]
    List(list::ListArgs),
    #[command(about = "Add a task", arg_required_else_help = true)]
    Add(task::AddArgs),
    #[command(about = "Rename a task", arg_required_else_help = true)]
    Rename(task::RenameArgs),
    #[command(about = "Mark a task as done", arg_required_else_help = true)]
    Check(task::TaskIdArgs),
    #[command(about = "Mark a task as not done", arg_required_else_help = true)]
    Uncheck(task::TaskIdArgs),
    #[command(about = "Move a task to the trash", arg_required_else_help = true)]
    Remove(task::TaskIdArgs),
    #[command(about = "Restore a task from the trash", arg_required_else_help = true)]
    Restore(task::TaskIdArgs),
    #[command(about = "Permanently delete all tasks in the trash")]
    EmptyTrash,
    #[command(about = "Show or set the active filter")]
    Filter(filter::FilterArgs),
    #[command(about = "Interactive mode")]
    Shell,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::List(args) => list::cmd(args).await,
            Commands::Add(args) => task::add(args).await,
            Commands::Rename(args) => task::rename(args).await,
            Commands::Check(args) => task::check(args, true).await,
            Commands::Uncheck(args) => task::check(args, false).await,
            Commands::Remove(args) => task::remove(args, true).await,
            Commands::Restore(args) => task::remove(args, false).await,
            Commands::EmptyTrash => trash::cmd().await,
            Commands::Filter(args) => filter::cmd(args),
            Commands::Shell => shell::cmd().await,
        }
    }
}

/// Whether a command error still has to be printed. A failed initial load
/// has already been rendered as the error surface.
pub fn needs_report(err: &anyhow::Error) -> bool {
    err.downcast_ref::<InitializationError>().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RemoteError;
    use reqwest::StatusCode;

    #[test]
    fn failed_load_is_not_reported_twice() {
        let err: anyhow::Error = InitializationError(RemoteError::Status {
            url: "http://localhost/tasks/".to_string(),
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: String::new(),
        })
        .into();
        assert!(!needs_report(&err));
    }

    #[test]
    fn other_errors_are_reported() {
        assert!(needs_report(&anyhow::anyhow!("config file is not valid JSON")));
    }
}
