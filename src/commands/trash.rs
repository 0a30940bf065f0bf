use super::board::Board;
use crate::{libs::messages::Message, msg_info, msg_success};
use anyhow::Result;

/// Empties the trash.
pub async fn cmd() -> Result<()> {
    let board = Board::open().await?;

    match board.reconciler.purge_removed() {
        0 => msg_info!(Message::TrashAlreadyEmpty),
        count => msg_success!(Message::TasksPurged(count)),
    }
    board.finish().await
}
