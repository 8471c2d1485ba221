//! JSON file backed config-entry store
//!
//! All entries live in one document that is rewritten on every change. Writes
//! go to a sibling temp file first and are renamed into place.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::ConfigEntryStore;
use async_trait::async_trait;
use domain::ConfigEntry;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

const DOCUMENT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct EntryDocument {
    version: u32,
    #[serde(default)]
    entries: Vec<ConfigEntry>,
}

impl Default for EntryDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            entries: Vec::new(),
        }
    }
}

/// [`ConfigEntryStore`] persisting every entry into a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileEntryStore {
    path: Arc<PathBuf>,
    // serializes read-modify-write cycles
    lock: Arc<Mutex<()>>,
}

impl JsonFileEntryStore {
    /// Open a store at `path`; the file is created on the first save
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            lock: Arc::new(Mutex::new(())),
        }
    }

    #[cfg(test)]
    fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<EntryDocument, ApplicationError> {
        let path = Arc::clone(&self.path);
        tokio::task::spawn_blocking(move || read_document(&path))
            .await
            .map_err(|e| ApplicationError::Internal(format!("Task join error: {e}")))?
    }

    async fn write(&self, document: EntryDocument) -> Result<(), ApplicationError> {
        let path = Arc::clone(&self.path);
        tokio::task::spawn_blocking(move || write_document(&path, &document))
            .await
            .map_err(|e| ApplicationError::Internal(format!("Task join error: {e}")))?
    }
}

fn read_document(path: &Path) -> Result<EntryDocument, ApplicationError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(EntryDocument::default()),
        Err(e) => {
            return Err(ApplicationError::Storage(format!(
                "Failed to read {}: {e}",
                path.display()
            )));
        },
    };

    let document: EntryDocument = serde_json::from_slice(&bytes).map_err(|e| {
        ApplicationError::Storage(format!("Corrupt entry document {}: {e}", path.display()))
    })?;

    if document.version != DOCUMENT_VERSION {
        return Err(ApplicationError::Storage(format!(
            "Unsupported entry document version {}",
            document.version
        )));
    }
    Ok(document)
}

fn write_document(path: &Path, document: &EntryDocument) -> Result<(), ApplicationError> {
    let storage_error = |e: std::io::Error| {
        ApplicationError::Storage(format!("Failed to write {}: {e}", path.display()))
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(storage_error)?;
    }

    let bytes = serde_json::to_vec_pretty(document)
        .map_err(|e| ApplicationError::Storage(format!("Failed to encode entries: {e}")))?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, bytes).map_err(storage_error)?;
    fs::rename(&tmp, path).map_err(storage_error)
}

#[async_trait]
impl ConfigEntryStore for JsonFileEntryStore {
    #[instrument(skip(self, entry), fields(entry_id = %entry.entry_id))]
    async fn save(&self, entry: &ConfigEntry) -> Result<(), ApplicationError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read().await?;

        match document
            .entries
            .iter_mut()
            .find(|e| e.entry_id == entry.entry_id)
        {
            Some(existing) => *existing = entry.clone(),
            None => document.entries.push(entry.clone()),
        }

        self.write(document).await?;
        debug!("Entry saved");
        Ok(())
    }

    async fn load(&self, entry_id: &str) -> Result<Option<ConfigEntry>, ApplicationError> {
        let _guard = self.lock.lock().await;
        let document = self.read().await?;
        Ok(document
            .entries
            .into_iter()
            .find(|e| e.entry_id == entry_id))
    }

    async fn load_all(&self) -> Result<Vec<ConfigEntry>, ApplicationError> {
        let _guard = self.lock.lock().await;
        Ok(self.read().await?.entries)
    }

    #[instrument(skip(self))]
    async fn remove(&self, entry_id: &str) -> Result<bool, ApplicationError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read().await?;

        let before = document.entries.len();
        document.entries.retain(|e| e.entry_id != entry_id);
        if document.entries.len() == before {
            return Ok(false);
        }

        self.write(document).await?;
        debug!("Entry removed");
        Ok(true)
    }
}
