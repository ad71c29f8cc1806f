//! File references for page trees: a path within a book, a hidden flag, and a
//! label annotated with the resource's approximate size.

pub mod core;
pub mod models;
pub mod services;

pub use crate::core::errors::{Error, Result, StoreError, StoreResult};
pub use crate::models::element::Element;
pub use crate::models::file_ref::{FileRef, FrozenFileRef, Locator};
pub use crate::services::store::{LocalStore, MemoryStore, ResourceHandle, ResourceStore};
