use super::{ResourceHandle, ResourceStore};
use crate::core::errors::{Result, StoreError, StoreResult};
use crate::models::path::SEPARATOR;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalStoreConfig {
    pub book: String,
    pub base_path: PathBuf,
}

impl LocalStoreConfig {
    /// Reads a config such as `{"book": "manual", "base_path": "docs"}`.
    /// A relative `base_path` is taken relative to the config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let mut config: LocalStoreConfig = serde_json::from_str(&text)?;
        if config.base_path.is_relative() {
            if let Some(dir) = path.parent() {
                config.base_path = dir.join(&config.base_path);
            }
        }
        Ok(config)
    }
}

/// A book backed by a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalStore {
    book: String,
    base_path: PathBuf,
}

impl LocalStore {
    pub fn new(book: impl Into<String>, base_path: impl Into<PathBuf>) -> Self {
        Self {
            book: book.into(),
            base_path: base_path.into(),
        }
    }

    pub fn create(config: LocalStoreConfig) -> Self {
        Self::new(config.book, config.base_path)
    }

    fn resolve_path(&self, path: &str) -> StoreResult<PathBuf> {
        let relative = path.trim_start_matches(SEPARATOR);
        if relative.split(SEPARATOR).any(|segment| segment == "..") {
            return Err(StoreError::InvalidPath(format!(
                "'{path}' must not contain '..' segments"
            )));
        }
        Ok(self.base_path.join(relative))
    }
}

impl ResourceStore for LocalStore {
    fn book(&self) -> &str {
        &self.book
    }

    fn resolve(&self, path: &str) -> StoreResult<Box<dyn ResourceHandle>> {
        let full_path = self.resolve_path(path)?;
        Ok(Box::new(LocalResource { full_path }))
    }
}

#[derive(Debug)]
struct LocalResource {
    full_path: PathBuf,
}

impl LocalResource {
    fn metadata(&self) -> StoreResult<fs::Metadata> {
        fs::metadata(&self.full_path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => {
                StoreError::NotFound(self.full_path.to_string_lossy().into_owned())
            }
            _ => StoreError::Io(e),
        })
    }
}

impl ResourceHandle for LocalResource {
    fn exists(&self) -> StoreResult<bool> {
        match self.metadata() {
            Ok(md) => Ok(md.is_file()),
            Err(StoreError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn length(&self) -> StoreResult<u64> {
        let md = self.metadata()?;
        if !md.is_file() {
            return Err(StoreError::NotFound(
                self.full_path.to_string_lossy().into_owned(),
            ));
        }
        Ok(md.len())
    }
}
