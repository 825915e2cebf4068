use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::CountdownFields;
use crate::store::{CountdownStore, StorageBackend};

pub async fn run<B: StorageBackend>(
    store: &CountdownStore<B>,
    fields: CountdownFields,
) -> Result<CmdResult> {
    let record = store.insert(fields).await?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Countdown created: {} ({})",
        record.title, record.id
    )));
    Ok(result.with_affected(vec![record]))
}
