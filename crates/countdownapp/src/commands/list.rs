use crate::commands::{CmdMessage, CmdResult, DisplayCountdown};
use crate::error::{CountdownError, Result};
use crate::store::{CountdownStore, StorageBackend};
use chrono::{DateTime, Utc};
use tracing::error;

/// Every countdown, soonest target first, evaluated at `now`.
///
/// Unreadable data does not fail the listing: it yields no countdowns plus an
/// error message, so a display can keep running while the file is repaired.
pub async fn run<B: StorageBackend>(
    store: &CountdownStore<B>,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let mut records = match store.try_list().await {
        Ok(records) => records,
        Err(err @ CountdownError::StorageRead { .. }) => {
            error!(target: "countdown.commands", error = %err, "listing unreadable countdown data");
            result.add_message(CmdMessage::error(err.to_string()));
            Vec::new()
        }
        Err(err) => return Err(err),
    };

    // Stable, so equal targets keep their stored order.
    records.sort_by_key(|r| r.target);

    if records.is_empty() && !result.has_errors() {
        result.add_message(CmdMessage::info("No countdowns yet."));
    }

    result.listed = records
        .into_iter()
        .map(|record| DisplayCountdown::at(record, now))
        .collect();
    Ok(result)
}
