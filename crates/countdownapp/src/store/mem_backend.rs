use super::backend::StorageBackend;
use crate::error::{CountdownError, Result};
use crate::model::CountdownRecord;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory storage backend for testing.
///
/// Holds the serialized JSON text rather than parsed records, so tests can
/// plant corrupt content the same way a damaged file would look.
#[derive(Default)]
pub struct MemBackend {
    content: Mutex<Option<String>>,
    simulate_write_error: AtomicBool,
    saves: AtomicUsize,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given raw content, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let backend = Self::default();
        if let Ok(mut content) = backend.content.lock() {
            *content = Some(raw.into());
        }
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn raw(&self) -> Option<String> {
        self.content.lock().ok().and_then(|c| c.clone())
    }

    fn poisoned() -> CountdownError {
        CountdownError::Store("memory backend lock poisoned".to_string())
    }
}

impl StorageBackend for MemBackend {
    fn location(&self) -> PathBuf {
        PathBuf::from("memory://countdowns.json")
    }

    fn exists(&self) -> bool {
        self.content.lock().map(|c| c.is_some()).unwrap_or(false)
    }

    fn load(&self) -> Result<Vec<CountdownRecord>> {
        let content = self.content.lock().map_err(|_| Self::poisoned())?;
        let raw = content.as_ref().ok_or_else(|| CountdownError::StorageRead {
            path: self.location(),
            reason: "not initialized".to_string(),
        })?;
        serde_json::from_str(raw).map_err(|e| CountdownError::StorageRead {
            path: self.location(),
            reason: e.to_string(),
        })
    }

    fn save(&self, records: &[CountdownRecord]) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(CountdownError::StorageWrite {
                path: self.location(),
                source: std::io::Error::other("Simulated write error"),
            });
        }
        let raw = serde_json::to_string_pretty(records)?;
        let mut content = self.content.lock().map_err(|_| Self::poisoned())?;
        *content = Some(raw);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
