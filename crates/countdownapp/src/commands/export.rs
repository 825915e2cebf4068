use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::{CountdownStore, StorageBackend};

/// The collection exactly as stored, as a pretty JSON array.
///
/// Goes through the degrading `list`, so unreadable data exports as `[]`
/// (and is logged) rather than failing.
pub async fn run<B: StorageBackend>(store: &CountdownStore<B>) -> Result<CmdResult> {
    let records = store.list().await;
    let document = serde_json::to_string_pretty(&records)?;
    Ok(CmdResult {
        document: Some(document),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CountdownFields, CountdownRecord};
    use crate::store::{InMemoryStore, MemBackend};
    use chrono::{Duration, TimeZone, Utc};

    #[tokio::test]
    async fn test_exports_stored_order_unsorted() {
        let store = InMemoryStore::in_memory().with_seed(false);
        store.initialize().await.unwrap();
        let at = Utc.with_ymd_and_hms(2035, 1, 1, 0, 0, 0).unwrap();
        store.insert(CountdownFields::new("late", at + Duration::days(5))).await.unwrap();
        store.insert(CountdownFields::new("early", at)).await.unwrap();

        let result = run(&store).await.unwrap();
        let parsed: Vec<CountdownRecord> =
            serde_json::from_str(result.document.as_deref().unwrap()).unwrap();
        assert_eq!(parsed, store.list().await);
        assert_eq!(parsed[0].title, "late");
    }

    #[tokio::test]
    async fn test_unreadable_data_exports_empty_array() {
        let store = InMemoryStore::with_backend(MemBackend::with_raw("nope"));
        let result = run(&store).await.unwrap();
        assert_eq!(result.document.as_deref(), Some("[]"));
    }
}
