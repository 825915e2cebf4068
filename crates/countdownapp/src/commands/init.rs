use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{CountdownStore, StorageBackend};

pub async fn run<B: StorageBackend>(store: &CountdownStore<B>) -> Result<CmdResult> {
    let created = store.initialize().await?;
    let path = store.location();

    let mut result = CmdResult::default();
    if created {
        let records = store.try_list().await?;
        result.add_message(CmdMessage::success(format!(
            "Created countdown data at {} ({} countdowns)",
            path.display(),
            records.len()
        )));
        result.affected = records;
    } else {
        result.add_message(CmdMessage::info(format!(
            "Countdown data already exists at {}",
            path.display()
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::{InMemoryStore, MemBackend};

    #[tokio::test]
    async fn test_first_run_creates_seeded_data() {
        let store = InMemoryStore::in_memory();
        let result = run(&store).await.unwrap();
        assert_eq!(result.affected.len(), 2);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
    }

    #[tokio::test]
    async fn test_first_run_without_seed_is_empty() {
        let store = InMemoryStore::in_memory().with_seed(false);
        let result = run(&store).await.unwrap();
        assert!(result.affected.is_empty());
        assert!(result.messages[0].content.contains("0 countdowns"));
    }

    #[tokio::test]
    async fn test_second_run_reports_existing_data() {
        let store = InMemoryStore::in_memory();
        run(&store).await.unwrap();
        let result = run(&store).await.unwrap();
        assert!(result.affected.is_empty());
        assert_eq!(result.messages[0].level, MessageLevel::Info);
        assert!(result.messages[0].content.contains("already exists"));
    }

    #[tokio::test]
    async fn test_failed_creation_surfaces_the_write_error() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let store = InMemoryStore::with_backend(backend);
        assert!(run(&store).await.is_err());
    }
}
