use super::backend::StorageBackend;
use super::fs_backend::FsBackend;
use super::mem_backend::MemBackend;
use crate::error::{CountdownError, Result};
use crate::model::{new_id, seed_fields, CountdownFields, CountdownPatch, CountdownRecord};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, error, info, warn};

const LOG_TARGET: &str = "countdown.store";

/// Durable, concurrency-safe CRUD over the countdown collection.
///
/// Mutations queue on a fair mutex and run their whole
/// load → change → save cycle inside one turn, so completion order matches
/// submission order and no update is ever computed from a stale list.
/// Each turn also holds the backend's write lock, which extends the same
/// guarantee to other stores and processes sharing the file.
/// Reads never queue.
pub struct CountdownStore<B: StorageBackend> {
    backend: Arc<B>,
    write_queue: Arc<Mutex<()>>,
    seed: bool,
}

pub type FileStore = CountdownStore<FsBackend>;
pub type InMemoryStore = CountdownStore<MemBackend>;

impl FileStore {
    pub fn open(data_file: impl Into<PathBuf>) -> Self {
        Self::with_backend(FsBackend::new(data_file))
    }
}

impl InMemoryStore {
    pub fn in_memory() -> Self {
        Self::with_backend(MemBackend::new())
    }
}

impl<B: StorageBackend> CountdownStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
            write_queue: Arc::new(Mutex::new(())),
            seed: true,
        }
    }

    /// Whether `initialize` writes the example countdowns into a new file.
    pub fn with_seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn location(&self) -> PathBuf {
        self.backend.location()
    }

    /// Create the backing resource if it is missing. Safe to call on every start.
    /// Returns `true` when this call created it.
    pub async fn initialize(&self) -> Result<bool> {
        let seed = self.seed;
        self.queued(move |backend| {
            if backend.exists() {
                return Ok(false);
            }
            let now = Utc::now();
            let records: Vec<CountdownRecord> = if seed {
                seed_fields(now)
                    .iter()
                    .map(|fields| CountdownRecord::from_fields(new_id(), fields))
                    .collect()
            } else {
                Vec::new()
            };
            backend.save(&records)?;
            info!(
                target: LOG_TARGET,
                path = %backend.location().display(),
                count = records.len(),
                "created countdown data file"
            );
            Ok(true)
        })
        .await
    }

    /// All records in stored order.
    ///
    /// Unreadable data degrades to an empty list so displays keep working,
    /// but the fault is always logged at error level. Use [`Self::try_list`]
    /// to tell the two cases apart.
    pub async fn list(&self) -> Vec<CountdownRecord> {
        match self.try_list().await {
            Ok(records) => records,
            Err(err) => {
                error!(
                    target: LOG_TARGET,
                    path = %self.location().display(),
                    error = %err,
                    "countdown data unreadable, showing no countdowns"
                );
                Vec::new()
            }
        }
    }

    pub async fn try_list(&self) -> Result<Vec<CountdownRecord>> {
        self.blocking(|backend| backend.load()).await
    }

    pub async fn get(&self, id: &str) -> Result<CountdownRecord> {
        let records = self.try_list().await?;
        records
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| CountdownError::NotFound(id.to_string()))
    }

    pub async fn insert(&self, fields: CountdownFields) -> Result<CountdownRecord> {
        self.mutate(move |records| {
            let mut id = new_id();
            while records.iter().any(|r| r.id == id) {
                id = new_id();
            }
            let record = CountdownRecord::from_fields(id, &fields);
            records.push(record.clone());
            Ok(record)
        })
        .await
    }

    pub async fn update_by_id(&self, id: &str, fields: CountdownFields) -> Result<CountdownRecord> {
        let id = id.to_string();
        self.mutate(move |records| {
            let record = records
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| CountdownError::NotFound(id.clone()))?;
            record.apply(&fields);
            Ok(record.clone())
        })
        .await
    }

    /// Merge a partial edit onto the current record inside one queue turn, so
    /// fields the patch leaves alone keep whatever the latest write put there.
    pub async fn patch_by_id(&self, id: &str, patch: CountdownPatch) -> Result<CountdownRecord> {
        let id = id.to_string();
        self.mutate(move |records| {
            let record = records
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| CountdownError::NotFound(id.clone()))?;
            let fields = patch.merge_into(record.fields());
            record.apply(&fields);
            Ok(record.clone())
        })
        .await
    }

    /// Remove a record. An unknown id is `NotFound`, never a silent no-op.
    pub async fn delete_by_id(&self, id: &str) -> Result<CountdownRecord> {
        let id = id.to_string();
        self.mutate(move |records| {
            let idx = records
                .iter()
                .position(|r| r.id == id)
                .ok_or_else(|| CountdownError::NotFound(id.clone()))?;
            Ok(records.remove(idx))
        })
        .await
    }

    /// Read-modify-write inside one queue turn. Nothing is saved when `change` fails.
    async fn mutate<T, F>(&self, change: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Vec<CountdownRecord>) -> Result<T> + Send + 'static,
    {
        self.queued(move |backend| {
            let mut records = if backend.exists() {
                backend.load().inspect_err(|err| {
                    warn!(
                        target: LOG_TARGET,
                        error = %err,
                        "refusing to modify unreadable countdown data"
                    );
                })?
            } else {
                Vec::new()
            };
            let result = change(&mut records)?;
            backend.save(&records)?;
            debug!(
                target: LOG_TARGET,
                path = %backend.location().display(),
                count = records.len(),
                "committed countdowns"
            );
            Ok(result)
        })
        .await
    }

    /// Run `work` on the blocking pool once it is this caller's turn in the
    /// write queue and the backend lock is held. Both are held until `work`
    /// returns, even if the awaiting future is dropped first.
    async fn queued<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&B) -> Result<T> + Send + 'static,
    {
        let turn: OwnedMutexGuard<()> = Arc::clone(&self.write_queue).lock_owned().await;
        self.blocking(move |backend| {
            let result = backend.lock().and_then(|_lock| work(backend));
            drop(turn);
            result
        })
        .await
    }

    async fn blocking<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&B) -> Result<T> + Send + 'static,
    {
        let backend = Arc::clone(&self.backend);
        tokio::task::spawn_blocking(move || work(&backend))
            .await
            .map_err(|e| CountdownError::Store(format!("storage task failed: {}", e)))?
    }
}
