use crate::error::Result;
use crate::model::CountdownRecord;
use std::fs::File;
use std::path::PathBuf;

/// Exclusive hold on the backing resource for one load → change → save turn.
/// Dropping it releases the lock.
pub struct WriteLock {
    _file: Option<File>,
}

impl WriteLock {
    /// For backends no other process can reach.
    pub fn unshared() -> Self {
        Self { _file: None }
    }

    /// Keeps `file` open, and with it the advisory lock taken on it.
    pub fn held(file: File) -> Self {
        Self { _file: Some(file) }
    }
}

/// Raw whole-collection I/O.
///
/// A backend knows *how* the record list is stored (a JSON file, memory).
/// [`super::CountdownStore`] decides *when* it is read and written and makes
/// sure writes never interleave. Methods are blocking; the store runs them
/// off the async executor.
pub trait StorageBackend: Send + Sync + 'static {
    /// Where the collection lives. A real path for `FsBackend`, a virtual one
    /// for `MemBackend`. Used in errors and log fields.
    fn location(&self) -> PathBuf;

    /// Whether the backing resource has been created yet.
    fn exists(&self) -> bool;

    /// Load the full collection.
    /// A missing, unreadable, or unparsable resource is `StorageRead`.
    fn load(&self) -> Result<Vec<CountdownRecord>>;

    /// Replace the full collection.
    /// MUST be atomic (write to a temp file, then rename) so readers only ever
    /// see the old or the new list.
    fn save(&self, records: &[CountdownRecord]) -> Result<()>;

    /// Block until no other writer, in this process or another, holds the
    /// resource. The default suits backends that live in one process only.
    fn lock(&self) -> Result<WriteLock> {
        Ok(WriteLock::unshared())
    }
}
