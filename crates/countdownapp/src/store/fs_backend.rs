use super::backend::{StorageBackend, WriteLock};
use crate::error::{CountdownError, Result};
use crate::model::CountdownRecord;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Stores the collection as a pretty-printed JSON array in a single file.
pub struct FsBackend {
    data_file: PathBuf,
}

impl FsBackend {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    fn dir(&self) -> PathBuf {
        match self.data_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(|source| self.write_error(source))?;
        }
        Ok(())
    }

    fn file_name(&self) -> &str {
        self.data_file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("countdowns.json")
    }

    /// Temp files live next to the data file so the rename never crosses filesystems.
    fn temp_path(&self) -> PathBuf {
        self.dir()
            .join(format!(".{}-{}.tmp", self.file_name(), Uuid::new_v4().simple()))
    }

    /// Sidecar that writers lock. The data file itself is replaced on every
    /// save, so a lock on it would not outlive the rename.
    pub fn lock_path(&self) -> PathBuf {
        self.dir().join(format!(".{}.lock", self.file_name()))
    }

    fn read_error(&self, reason: impl ToString) -> CountdownError {
        CountdownError::StorageRead {
            path: self.data_file.clone(),
            reason: reason.to_string(),
        }
    }

    fn write_error(&self, source: std::io::Error) -> CountdownError {
        CountdownError::StorageWrite {
            path: self.data_file.clone(),
            source,
        }
    }

    fn write_temp(&self, tmp_path: &Path, content: &str) -> std::io::Result<()> {
        let mut file = File::create(tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()
    }
}

impl StorageBackend for FsBackend {
    fn location(&self) -> PathBuf {
        self.data_file.clone()
    }

    fn exists(&self) -> bool {
        self.data_file.is_file()
    }

    fn load(&self) -> Result<Vec<CountdownRecord>> {
        let raw = fs::read_to_string(&self.data_file).map_err(|e| self.read_error(e))?;
        let records: Vec<CountdownRecord> =
            serde_json::from_str(&raw).map_err(|e| self.read_error(e))?;
        Ok(records)
    }

    fn save(&self, records: &[CountdownRecord]) -> Result<()> {
        self.ensure_dir(&self.dir())?;
        let content = serde_json::to_string_pretty(records)?;

        // Atomic write
        let tmp_path = self.temp_path();
        if let Err(source) = self.write_temp(&tmp_path, &content) {
            let _ = fs::remove_file(&tmp_path);
            return Err(self.write_error(source));
        }
        if let Err(source) = fs::rename(&tmp_path, &self.data_file) {
            let _ = fs::remove_file(&tmp_path);
            return Err(self.write_error(source));
        }

        Ok(())
    }

    fn lock(&self) -> Result<WriteLock> {
        self.ensure_dir(&self.dir())?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())
            .map_err(|source| self.write_error(source))?;
        file.lock_exclusive().map_err(|source| self.write_error(source))?;
        Ok(WriteLock::held(file))
    }
}
