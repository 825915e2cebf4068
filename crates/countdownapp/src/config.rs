//! # Configuration
//!
//! Settings are loaded with [`confique`] from, in priority order:
//!
//! 1. **Environment variables**: `COUNTDOWN_DATA_FILE`, `COUNTDOWN_SEED`.
//! 2. **Config file**: `countdown.toml` in the OS config directory (via the
//!    `directories` crate), or whatever path `COUNTDOWN_CONFIG` names.
//! 3. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! Command-line flags sit above all of these; the CLI applies them after
//! loading.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_file` | `<data dir>/countdowns.json` | Where the countdowns live |
//! | `seed` | `true` | Write the example countdowns into a new data file |

use crate::error::{CountdownError, Result};
use confique::Config;
use directories::ProjectDirs;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "countdown.toml";
pub const DATA_FILE_NAME: &str = "countdowns.json";
pub const CONFIG_PATH_ENV: &str = "COUNTDOWN_CONFIG";

#[derive(Config, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CountdownConfig {
    /// Path of the JSON data file. Defaults to `countdowns.json` in the
    /// platform data directory.
    #[config(env = "COUNTDOWN_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Seed a newly created data file with two example countdowns.
    #[config(env = "COUNTDOWN_SEED", default = true)]
    pub seed: bool,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            seed: true,
        }
    }
}

impl CountdownConfig {
    /// Load from the environment and the default config file location.
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::builder()
                .env()
                .load()
                .map_err(|e| CountdownError::Config(e.to_string())),
        }
    }

    /// Load from the environment and `path`. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::builder()
            .env()
            .file(path)
            .load()
            .map_err(|e| CountdownError::Config(format!("{}: {}", path.display(), e)))
    }

    /// The configured data file, or the platform default.
    pub fn data_file(&self) -> Result<PathBuf> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => default_data_file(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "countdown", "countdown")
}

/// `COUNTDOWN_CONFIG` if set, else `countdown.toml` in the OS config directory.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

pub fn default_data_file() -> Result<PathBuf> {
    project_dirs()
        .map(|dirs| dirs.data_dir().join(DATA_FILE_NAME))
        .ok_or_else(|| {
            CountdownError::Config(
                "no home directory found; set COUNTDOWN_DATA_FILE or pass --data-file".to_string(),
            )
        })
}

/// A commented `countdown.toml` listing every setting and its default.
pub fn template() -> String {
    confique::toml::template::<CountdownConfig>(confique::toml::FormatOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = CountdownConfig::default();
        assert!(config.seed);
        assert!(config.data_file.is_none());
    }

    #[test]
    fn test_explicit_data_file_wins() {
        let config = CountdownConfig {
            data_file: Some(PathBuf::from("/srv/countdowns.json")),
            ..Default::default()
        };
        assert_eq!(
            config.data_file().unwrap(),
            PathBuf::from("/srv/countdowns.json")
        );
    }

    #[test]
    fn test_default_data_file_name() {
        if let Ok(path) = default_data_file() {
            assert_eq!(path.file_name().unwrap(), DATA_FILE_NAME);
        }
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "data_file = \"/data/mine.json\"\nseed = false\n").unwrap();

        let config = CountdownConfig::load_from(&path).unwrap();
        // The environment may override these in a developer shell.
        if std::env::var_os("COUNTDOWN_DATA_FILE").is_none() {
            assert_eq!(config.data_file, Some(PathBuf::from("/data/mine.json")));
        }
        if std::env::var_os("COUNTDOWN_SEED").is_none() {
            assert!(!config.seed);
        }
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = CountdownConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        if std::env::var_os("COUNTDOWN_SEED").is_none() {
            assert!(config.seed);
        }
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "seed = \"sometimes\"\n").unwrap();
        assert!(matches!(
            CountdownConfig::load_from(&path),
            Err(CountdownError::Config(_))
        ));
    }

    #[test]
    fn test_template_mentions_every_key() {
        let toml = template();
        assert!(toml.contains("data_file"));
        assert!(toml.contains("seed"));
    }
}
