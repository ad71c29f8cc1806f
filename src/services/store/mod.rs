//! Resource stores answer existence and length queries for paths within a
//! named book.

use crate::core::errors::StoreResult;
use std::fmt;

mod local;
mod memory;

pub use local::{LocalStore, LocalStoreConfig};
pub use memory::MemoryStore;

pub trait ResourceStore: Send + Sync + fmt::Debug {
    /// Name of the book this store serves.
    fn book(&self) -> &str;

    fn resolve(&self, path: &str) -> StoreResult<Box<dyn ResourceHandle>>;
}

/// A resolved resource. Queries hit the backend each time they are called,
/// so `length` may fail with `NotFound` even after `exists` returned true.
pub trait ResourceHandle: Send {
    fn exists(&self) -> StoreResult<bool>;

    fn length(&self) -> StoreResult<u64>;
}
