use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CountdownError {
    #[error("Countdown not found: {0}")]
    NotFound(String),

    /// The backing file is missing, unreadable, or does not hold a valid record list.
    #[error("Cannot read countdowns from {}: {reason}", path.display())]
    StorageRead { path: PathBuf, reason: String },

    /// Writing the temp file or renaming it over the data file failed.
    #[error("Cannot write countdowns to {}: {source}", path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

impl CountdownError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CountdownError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, CountdownError>;
