use super::board::Board;
use crate::{
    api::{TaskClient, TaskQuery},
    libs::{
        config::Config,
        filter::Filter,
        messages::Message,
        preferences::{FilePreferences, FilterPreference},
        reconciler::{Phase, Snapshot},
        view::View,
    },
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Filter to show instead of the stored one (not persisted)
    #[arg(short, long, value_enum)]
    filter: Option<Filter>,

    /// Let the server do the filtering instead of loading every task
    #[arg(long)]
    server: bool,
}

pub async fn cmd(args: ListArgs) -> Result<()> {
    if args.server {
        return list_on_server(args.filter).await;
    }

    let board = Board::open().await?;
    let filter = args.filter.unwrap_or(board.filter());
    View::render(&board.reconciler.snapshot(), filter);
    Ok(())
}

async fn list_on_server(filter: Option<Filter>) -> Result<()> {
    let filter = match filter {
        Some(filter) => filter,
        None => FilterPreference::new(FilePreferences::new()?).load_filter(),
    };

    let client = TaskClient::new(&Config::read()?.server());
    let tasks = client.list_tasks_where(TaskQuery::for_filter(filter)).await?;

    msg_print!(Message::TasksHeader(filter), true);
    if tasks.is_empty() {
        msg_info!(Message::NoTasksForFilter(filter));
        return Ok(());
    }

    let snapshot = Snapshot {
        phase: Phase::Ready,
        tasks: Arc::new(tasks),
        unsynced: BTreeSet::new(),
        pending: 0,
    };
    View::tasks_table(&snapshot, &snapshot.tasks).printstd();
    Ok(())
}
