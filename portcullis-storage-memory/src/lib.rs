//! In-memory key-value storage backend.
//!
//! Backed by a concurrent map. This is the natural session-scoped store
//! (state that should vanish with the process) and the test double for
//! the durable one. `clear` exists for test setup hooks that need a
//! pristine store between cases.

use async_trait::async_trait;
use dashmap::DashMap;
use portcullis_core::{Error, KeyValueStorage};

/// Concurrent in-memory [`KeyValueStorage`] implementation.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: DashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Drop every stored entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        self.entries.remove(key);
        Ok(())
    }
}
