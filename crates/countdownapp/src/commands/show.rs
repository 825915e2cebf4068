use crate::commands::{CmdResult, DisplayCountdown};
use crate::error::Result;
use crate::store::{CountdownStore, StorageBackend};
use chrono::{DateTime, Utc};

pub async fn run<B: StorageBackend>(
    store: &CountdownStore<B>,
    id: &str,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    let record = store.get(id.trim()).await?;
    Ok(CmdResult::default().with_listed(vec![DisplayCountdown::at(record, now)]))
}
