use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::CountdownFields;
use crate::store::{CountdownStore, StorageBackend};

/// Replace every field of the countdown with `id`. The id stays the same.
pub async fn run<B: StorageBackend>(
    store: &CountdownStore<B>,
    id: &str,
    fields: CountdownFields,
) -> Result<CmdResult> {
    let record = store.update_by_id(id.trim(), fields).await?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Countdown updated: {}",
        record.title
    )));
    Ok(result.with_affected(vec![record]))
}
