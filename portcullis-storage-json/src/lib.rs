//! JSON file key-value storage backend.
//!
//! The durable analog of a browser's per-origin local storage: one JSON
//! document on disk holding the whole key space as a string-to-string
//! map, loaded once on open and rewritten after every mutation. A file
//! that no longer parses is logged and treated as empty rather than
//! surfaced as an error; the bytes on disk stay untouched until the next
//! write replaces them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use portcullis_core::{Error, KeyValueStorage, error::StorageError};
use tokio::sync::Mutex;

/// File-backed [`KeyValueStorage`] implementation.
pub struct JsonFileStorage {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl JsonFileStorage {
    /// Open the store at `path`, creating state lazily.
    ///
    /// A missing file starts as an empty store; the file itself appears on
    /// the first write. A present but malformed file also starts empty.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Storage document is malformed, starting empty"
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StorageError::Io(e.to_string()).into()),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, entries: &HashMap<String, String>) -> Result<(), Error> {
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        tokio::fs::write(&self.path, raw).await.map_err(|e| {
            tracing::error!(
                path = %self.path.display(),
                error = %e,
                "Failed to write storage document"
            );
            Error::from(StorageError::Io(e.to_string()))
        })
    }
}

#[async_trait]
impl KeyValueStorage for JsonFileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        let mut entries = self.entries.lock().await;
        if entries.remove(key).is_some() {
            self.persist(&entries).await?;
        }
        Ok(())
    }
}
