use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{CountdownStore, StorageBackend};

pub async fn run<B: StorageBackend>(store: &CountdownStore<B>, id: &str) -> Result<CmdResult> {
    let removed = store.delete_by_id(id.trim()).await?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Countdown deleted: {}",
        removed.title
    )));
    Ok(result.with_affected(vec![removed]))
}
