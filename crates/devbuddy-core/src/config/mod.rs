//! Storage location configuration.
//!
//! Resolves where notebooks, task categories and bookmarks live on disk.
//! Notes and bookmarks sit under the home directory; tasks prefer `APPDATA`
//! and fall back to the home directory. `DEVBUDDY_HOME` replaces the base
//! directory for all three, which keeps test and portable setups in one tree.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable overriding the base directory of all storage roots.
pub const HOME_ENV_VAR: &str = "DEVBUDDY_HOME";

const DATA_DIR_NAME: &str = ".devbuddy";
const BOOKMARKS_FILE_NAME: &str = "bookmarks.yaml";

/// Resolved on-disk locations for every service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root of notebooks: `index.yml` plus one directory per notebook.
    pub notes_dir: PathBuf,
    /// Root of task storage: `index.yml` plus `categories/`.
    pub tasks_dir: PathBuf,
    /// Single YAML document holding bookmark categories.
    pub bookmarks_path: PathBuf,
}

impl StorageConfig {
    /// Build a configuration with every root under `base/.devbuddy`.
    pub fn under(base: impl AsRef<Path>) -> Self {
        let data_dir = base.as_ref().join(DATA_DIR_NAME);
        Self {
            notes_dir: data_dir.join("notes"),
            tasks_dir: data_dir.join("tasks"),
            bookmarks_path: data_dir.join(BOOKMARKS_FILE_NAME),
        }
    }

    /// Resolve the configuration from the process environment.
    ///
    /// `DEVBUDDY_HOME` wins when set and non-empty. Otherwise notes and
    /// bookmarks use the user's home directory and tasks use `APPDATA`
    /// (Windows) or `HOME`.
    pub fn from_env() -> Result<Self> {
        if let Some(base) = env_path(HOME_ENV_VAR) {
            return Ok(Self::under(base));
        }

        let home = dirs::home_dir().ok_or_else(|| {
            Error::InvalidInput("Failed to resolve the home directory".to_string())
        })?;
        let tasks_base = env_path("APPDATA")
            .or_else(|| env_path("HOME"))
            .unwrap_or_else(|| home.clone());

        let mut config = Self::under(&home);
        config.tasks_dir = tasks_base.join(DATA_DIR_NAME).join("tasks");
        Ok(config)
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
