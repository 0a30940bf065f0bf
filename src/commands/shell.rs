//! Interactive session.
//!
//! Intents are applied immediately and the list is re-rendered right away,
//! while the server catches up in the background. Rows still waiting for a
//! server id show as `new`; the footer counts requests in flight.

use super::board::Board;
use crate::{
    libs::{filter::Filter, messages::Message, task::Task},
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Select};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Add,
    Rename,
    Toggle,
    Remove,
    Restore,
    EmptyTrash,
    Filter,
    Refresh,
    Quit,
}

impl Action {
    fn label(self) -> Message {
        match self {
            Action::Add => Message::ActionAdd,
            Action::Rename => Message::ActionRename,
            Action::Toggle => Message::ActionToggle,
            Action::Remove => Message::ActionRemove,
            Action::Restore => Message::ActionRestore,
            Action::EmptyTrash => Message::ActionEmptyTrash,
            Action::Filter => Message::ActionFilter,
            Action::Refresh => Message::ActionRefresh,
            Action::Quit => Message::ActionQuit,
        }
    }
}

/// Actions offered for the active filter, mirroring which controls are
/// available in each view.
fn actions_for(filter: Filter, has_removed: bool) -> Vec<Action> {
    let mut actions = Vec::new();
    match filter {
        Filter::Removed => {
            actions.push(Action::Restore);
            if has_removed {
                actions.push(Action::EmptyTrash);
            }
        }
        _ => {
            if filter.accepts_new_tasks() {
                actions.push(Action::Add);
                actions.push(Action::Rename);
            }
            actions.push(Action::Toggle);
            actions.push(Action::Remove);
        }
    }
    actions.extend([Action::Filter, Action::Refresh, Action::Quit]);
    actions
}

pub async fn cmd() -> Result<()> {
    let mut board = Board::open().await?;
    msg_info!(Message::ShellWelcome, true);

    loop {
        board.render();

        let actions = actions_for(board.filter(), board.reconciler.has_removed());
        let labels: Vec<String> = actions.iter().map(|action| action.label().to_string()).collect();
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptAction.to_string())
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[selection] {
            Action::Add => {
                let value: String = Input::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptTaskValue.to_string())
                    .allow_empty(true)
                    .interact_text()?;
                if board.reconciler.add_task(&value).is_none() {
                    msg_error!(Message::TaskValueEmpty);
                }
            }
            Action::Rename => {
                if let Some(task) = pick_task(&board, Task::is_editable)? {
                    let value: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptTaskValue.to_string())
                        .default(task.value.clone())
                        .interact_text()?;
                    board.reconciler.rename_task(task.id, &value);
                }
            }
            Action::Toggle => {
                if let Some(task) = pick_task(&board, Task::is_checkable)? {
                    board.reconciler.set_checked(task.id, !task.checked);
                }
            }
            Action::Remove => {
                if let Some(task) = pick_task(&board, |task| !task.removed)? {
                    board.reconciler.set_removed(task.id, true);
                }
            }
            Action::Restore => {
                if let Some(task) = pick_task(&board, |task| task.removed)? {
                    board.reconciler.set_removed(task.id, false);
                }
            }
            Action::EmptyTrash => {
                let count = board.reconciler.purge_removed();
                msg_success!(Message::TasksPurged(count));
            }
            Action::Filter => {
                let selection = Select::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptFilter.to_string())
                    .items(&Filter::ALL)
                    .default(Filter::ALL.iter().position(|f| *f == board.filter()).unwrap_or(0))
                    .interact()?;
                board.set_filter(Filter::ALL[selection]);
                msg_success!(Message::FilterSaved(board.filter()));
            }
            Action::Refresh => {}
            Action::Quit => break,
        }
    }

    let pending = board.reconciler.snapshot().pending;
    if pending > 0 {
        msg_print!(Message::WaitingForSync(pending));
    }
    board.reconciler.settle().await;
    msg_print!(Message::ShellGoodbye);
    Ok(())
}

/// Lets the user choose among the visible tasks accepted by `eligible`.
fn pick_task(board: &Board, eligible: impl Fn(&Task) -> bool) -> Result<Option<Task>> {
    let tasks: Vec<Task> = board
        .reconciler
        .project(board.filter())
        .into_iter()
        .filter(|task| eligible(task))
        .collect();

    if tasks.is_empty() {
        msg_info!(Message::NoTasksForFilter(board.filter()));
        return Ok(None);
    }

    let labels: Vec<String> = tasks
        .iter()
        .map(|task| format!("{} {}", if task.checked { "[x]" } else { "[ ]" }, task.value))
        .collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptSelectTask.to_string())
        .items(&labels)
        .default(0)
        .interact_opt()?;

    Ok(selection.map(|index| tasks[index].clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trash_offers_empty_only_when_needed() {
        assert!(actions_for(Filter::Removed, true).contains(&Action::EmptyTrash));
        assert!(!actions_for(Filter::Removed, false).contains(&Action::EmptyTrash));
        assert!(!actions_for(Filter::Removed, true).contains(&Action::Add));
    }

    #[test]
    fn completed_view_hides_submission() {
        let actions = actions_for(Filter::Checked, false);
        assert!(!actions.contains(&Action::Add));
        assert!(actions.contains(&Action::Toggle));
    }
}
