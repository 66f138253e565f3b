use async_trait::async_trait;
use dashmap::DashMap;
use shortcut_core::error::Result;
use shortcut_core::{Backend, MappingStore, ShortCode};

/// Process-local mapping store.
///
/// Mappings live as long as the process does. `DashMap` guards every read and
/// write with a sharded lock, so concurrent handlers can put and get without
/// further coordination.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    storage: DashMap<String, String>,
}

impl InMemoryStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory store with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl MappingStore for InMemoryStore {
    async fn put(&self, code: &ShortCode, url: &str) -> Result<()> {
        self.storage.insert(code.as_str().to_owned(), url.to_owned());
        Ok(())
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        Ok(self
            .storage
            .get(code.as_str())
            .map(|entry| entry.value().clone()))
    }

    fn backend(&self) -> Backend {
        Backend::InMemory
    }
}
