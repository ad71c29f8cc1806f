use super::{ResourceHandle, ResourceStore};
use crate::core::errors::{StoreError, StoreResult};
use dashmap::DashMap;
use std::sync::Arc;

/// An in-memory book mapping paths to resource lengths.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    book: String,
    files: Arc<DashMap<String, u64>>,
}

impl MemoryStore {
    pub fn new(book: impl Into<String>) -> Self {
        Self {
            book: book.into(),
            files: Arc::new(DashMap::new()),
        }
    }

    pub fn insert(&self, path: impl Into<String>, length: u64) {
        self.files.insert(path.into(), length);
    }

    pub fn remove(&self, path: &str) -> Option<u64> {
        self.files.remove(path).map(|(_, length)| length)
    }

    fn lookup(&self, path: &str) -> Option<u64> {
        self.files.get(path).map(|length| *length)
    }
}

impl ResourceStore for MemoryStore {
    fn book(&self) -> &str {
        &self.book
    }

    fn resolve(&self, path: &str) -> StoreResult<Box<dyn ResourceHandle>> {
        Ok(Box::new(MemoryResource {
            store: self.clone(),
            path: path.to_string(),
        }))
    }
}

#[derive(Debug)]
struct MemoryResource {
    store: MemoryStore,
    path: String,
}

impl ResourceHandle for MemoryResource {
    fn exists(&self) -> StoreResult<bool> {
        Ok(self.store.lookup(&self.path).is_some())
    }

    fn length(&self) -> StoreResult<u64> {
        self.store
            .lookup(&self.path)
            .ok_or_else(|| StoreError::NotFound(self.path.clone()))
    }
}
