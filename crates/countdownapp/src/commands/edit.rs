use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::CountdownPatch;
use crate::store::{CountdownStore, StorageBackend};

/// Change only the fields set in `patch`. An empty patch writes nothing.
pub async fn run<B: StorageBackend>(
    store: &CountdownStore<B>,
    id: &str,
    patch: CountdownPatch,
) -> Result<CmdResult> {
    let id = id.trim();
    let mut result = CmdResult::default();

    if patch.is_empty() {
        // Still resolve the id so a typo is reported as such.
        let record = store.get(id).await?;
        result.add_message(CmdMessage::warning(format!(
            "Nothing to change for: {}",
            record.title
        )));
        return Ok(result);
    }

    let record = store.patch_by_id(id, patch).await?;
    result.add_message(CmdMessage::success(format!(
        "Countdown updated: {}",
        record.title
    )));
    Ok(result.with_affected(vec![record]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{add, MessageLevel};
    use crate::model::CountdownFields;
    use crate::store::InMemoryStore;
    use chrono::{Duration, TimeZone, Utc};

    async fn store_with_one() -> (InMemoryStore, String) {
        let store = InMemoryStore::in_memory().with_seed(false);
        store.initialize().await.unwrap();
        let at = Utc.with_ymd_and_hms(2034, 5, 1, 0, 0, 0).unwrap();
        let created = add::run(
            &store,
            CountdownFields::new("Party", at)
                .with_description("Bring snacks")
                .with_color("#123456"),
        )
        .await
        .unwrap()
        .affected
        .remove(0);
        (store, created.id)
    }

    #[tokio::test]
    async fn test_changes_only_given_fields() {
        let (store, id) = store_with_one().await;
        let before = store.get(&id).await.unwrap();
        let patch = CountdownPatch {
            target: Some(before.target + Duration::hours(2)),
            ..Default::default()
        };
        let result = run(&store, &id, patch).await.unwrap();
        let after = &result.affected[0];
        assert_eq!(after.title, "Party");
        assert_eq!(after.description, "Bring snacks");
        assert_eq!(after.color, "#123456");
        assert_eq!(after.target, before.target + Duration::hours(2));
    }

    #[tokio::test]
    async fn test_blank_title_in_patch_is_normalized() {
        let (store, id) = store_with_one().await;
        let patch = CountdownPatch {
            title: Some("   ".into()),
            ..Default::default()
        };
        let result = run(&store, &id, patch).await.unwrap();
        assert_eq!(result.affected[0].title, "Untitled");
    }

    #[tokio::test]
    async fn test_empty_patch_warns_without_writing() {
        let (store, id) = store_with_one().await;
        let saves = store.backend().save_count();
        let result = run(&store, &id, CountdownPatch::default()).await.unwrap();
        assert!(result.affected.is_empty());
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(store.backend().save_count(), saves);
    }

    #[tokio::test]
    async fn test_empty_patch_on_unknown_id_is_not_found() {
        let (store, _) = store_with_one().await;
        let err = run(&store, "nope", CountdownPatch::default()).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
