//! Storage configuration
//!
//! `T2048_DATA_DIR` picks the directory holding saved games and the best score
//! (default `.tui-2048` in the working directory).

use std::path::PathBuf;

use anyhow::Result;

use crate::store::JsonFileStore;

pub const DEFAULT_DATA_DIR: &str = ".tui-2048";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl StorageConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let data_dir = std::env::var("T2048_DATA_DIR")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        Self { data_dir }
    }

    pub fn open_store(&self) -> Result<JsonFileStore> {
        JsonFileStore::open(&self.data_dir)
    }
}
