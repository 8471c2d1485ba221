//! Config-entry store settings

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where configured entries are persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreAppConfig {
    /// Path of the JSON document holding all entries
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("hafas_entries.json")
}

impl Default for StoreAppConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}
