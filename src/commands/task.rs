//! Single-task commands: add, rename, check/uncheck, remove/restore.
//!
//! The change is applied locally and synchronized in the background; the
//! command waits for the synchronization before printing the list so the
//! process does not exit with requests still running.

use super::board::Board;
use crate::{
    libs::{messages::Message, task::TaskId},
    msg_error, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task text; several words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    value: Vec<String>,
}

#[derive(Debug, Args)]
pub struct RenameArgs {
    /// Task ID
    id: TaskId,
    /// New task text
    #[arg(required = true, num_args = 1..)]
    value: Vec<String>,
}

#[derive(Debug, Args)]
pub struct TaskIdArgs {
    /// Task ID
    id: TaskId,
}

pub async fn add(args: AddArgs) -> Result<()> {
    let board = Board::open().await?;
    let value = args.value.join(" ");

    if !board.filter().accepts_new_tasks() {
        msg_warning!(Message::SubmitHiddenForFilter(board.filter()));
    }

    match board.reconciler.add_task(&value) {
        Some(_) => msg_success!(Message::TaskAdded(value)),
        None => msg_error!(Message::TaskValueEmpty),
    }
    board.finish().await
}

pub async fn rename(args: RenameArgs) -> Result<()> {
    let board = Board::open().await?;
    let Some(task) = board.task(args.id) else {
        return Ok(());
    };
    if !task.is_editable() {
        msg_error!(Message::TaskNotEditable(task.id));
        return Ok(());
    }

    if board.reconciler.rename_task(task.id, &args.value.join(" ")) {
        msg_success!(Message::TaskRenamed(task.id));
    }
    board.finish().await
}

pub async fn check(args: TaskIdArgs, checked: bool) -> Result<()> {
    let board = Board::open().await?;
    let Some(task) = board.task(args.id) else {
        return Ok(());
    };
    if !task.is_checkable() {
        msg_error!(Message::TaskNotCheckable(task.id));
        return Ok(());
    }

    if board.reconciler.set_checked(task.id, checked) {
        match checked {
            true => msg_success!(Message::TaskChecked(task.id)),
            false => msg_success!(Message::TaskUnchecked(task.id)),
        }
    }
    board.finish().await
}

pub async fn remove(args: TaskIdArgs, removed: bool) -> Result<()> {
    let board = Board::open().await?;
    let Some(task) = board.task(args.id) else {
        return Ok(());
    };

    if board.reconciler.set_removed(task.id, removed) {
        match removed {
            true => msg_success!(Message::TaskRemoved(task.id)),
            false => msg_success!(Message::TaskRestored(task.id)),
        }
    }
    board.finish().await
}
