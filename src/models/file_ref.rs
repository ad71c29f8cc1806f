use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::core::errors::{Error, Result, StoreError, StoreResult};
use crate::core::format::human_bytes;
use crate::models::element::Element;
use crate::models::path;
use crate::services::store::ResourceStore;

/// The store and path a file reference points at.
#[derive(Debug, Clone)]
pub struct Locator {
    store: Arc<dyn ResourceStore>,
    path: String,
}

impl Locator {
    pub fn new(store: Arc<dyn ResourceStore>, path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        if path.is_empty() {
            return Err(Error::InvalidArgument("path must not be empty".to_string()));
        }
        Ok(Self { store, path })
    }

    pub fn store(&self) -> &Arc<dyn ResourceStore> {
        &self.store
    }

    pub fn book(&self) -> &str {
        self.store.book()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_directory(&self) -> bool {
        path::is_directory(&self.path)
    }
}

/// A file or directory attached to a page, in its mutable stage.
///
/// Setters fail with [`Error::Frozen`] once [`FileRef::freeze`] has been
/// called. [`FileRef::into_frozen`] converts to the read-only
/// [`FrozenFileRef`].
#[derive(Debug, Default)]
pub struct FileRef {
    locator: Mutex<Option<Locator>>,
    hidden: AtomicBool,
    frozen: AtomicBool,
}

impl FileRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locator(locator: Locator) -> Self {
        Self {
            locator: Mutex::new(Some(locator)),
            ..Self::default()
        }
    }

    // The lock only ever guards a whole-value replacement, so a poisoned
    // guard still holds a consistent pair.
    fn lock(&self) -> MutexGuard<'_, Option<Locator>> {
        self.locator.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_not_frozen(&self) -> Result<()> {
        if self.frozen.load(Ordering::Acquire) {
            return Err(Error::Frozen("file reference"));
        }
        Ok(())
    }

    /// Replaces store and path together. Both must be present or both absent.
    pub fn set_locator(
        &self,
        store: Option<Arc<dyn ResourceStore>>,
        path: Option<&str>,
    ) -> Result<()> {
        let locator = match (store, path) {
            (Some(store), Some(path)) => Some(Locator::new(store, path)?),
            (None, None) => None,
            (Some(_), None) => {
                return Err(Error::InvalidArgument(
                    "path must be set when store is set".to_string(),
                ))
            }
            (None, Some(path)) => {
                return Err(Error::InvalidArgument(format!(
                    "store must be set for path {path:?}"
                )))
            }
        };
        let mut guard = self.lock();
        self.check_not_frozen()?;
        *guard = locator;
        Ok(())
    }

    /// Snapshot of the current locator.
    pub fn locator(&self) -> Option<Locator> {
        self.lock().clone()
    }

    pub fn path(&self) -> Option<String> {
        self.lock().as_ref().map(|l| l.path.clone())
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden.load(Ordering::Acquire)
    }

    pub fn set_hidden(&self, hidden: bool) -> Result<()> {
        let _guard = self.lock();
        self.check_not_frozen()?;
        self.hidden.store(hidden, Ordering::Release);
        Ok(())
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    /// Idempotent.
    pub fn freeze(&self) -> &Self {
        let _guard = self.lock();
        self.frozen.store(true, Ordering::Release);
        self
    }

    pub fn into_frozen(self) -> FrozenFileRef {
        self.freeze();
        FrozenFileRef {
            locator: self
                .locator
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner),
            hidden: self.hidden.into_inner(),
        }
    }

    /// Filename without extension. Excludes the size so ids stay stable when
    /// the file changes.
    pub fn identifier_stem(&self) -> Result<String> {
        stem_for(self.locator().as_ref())
    }

    /// The filename, followed by the approximate size for files that exist.
    ///
    /// The store is queried after the locator lock is released.
    pub fn label(&self) -> Result<String> {
        let snapshot = self.locator();
        label_for(snapshot.as_ref())
    }
}

impl Element for FileRef {
    fn default_id_prefix(&self) -> &'static str {
        "file"
    }

    fn element_id_template(&self) -> Result<String> {
        self.identifier_stem()
    }

    fn label(&self) -> Result<String> {
        FileRef::label(self)
    }
}

/// A file reference after page construction has finished.
#[derive(Debug, Clone)]
pub struct FrozenFileRef {
    locator: Option<Locator>,
    hidden: bool,
}

impl FrozenFileRef {
    pub fn locator(&self) -> Option<&Locator> {
        self.locator.as_ref()
    }

    pub fn path(&self) -> Option<&str> {
        self.locator.as_ref().map(Locator::path)
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn identifier_stem(&self) -> Result<String> {
        stem_for(self.locator.as_ref())
    }

    pub fn label(&self) -> Result<String> {
        label_for(self.locator.as_ref())
    }
}

impl Element for FrozenFileRef {
    fn default_id_prefix(&self) -> &'static str {
        "file"
    }

    fn element_id_template(&self) -> Result<String> {
        self.identifier_stem()
    }

    fn label(&self) -> Result<String> {
        FrozenFileRef::label(self)
    }
}

fn require_locator(locator: Option<&Locator>) -> Result<&Locator> {
    locator.ok_or(Error::IllegalState("Path not set"))
}

fn stem_for(locator: Option<&Locator>) -> Result<String> {
    let locator = require_locator(locator)?;
    path::identifier_stem(locator.path()).map(str::to_string)
}

fn label_for(locator: Option<&Locator>) -> Result<String> {
    let locator = require_locator(locator)?;
    let name = path::filename(locator.path())?;
    if locator.is_directory() {
        return Ok(name.to_string());
    }
    match resource_length(locator) {
        Ok(length) => Ok(format!("{} ({})", name, human_bytes(length))),
        Err(e) if e.is_not_found() => {
            tracing::debug!(
                book = locator.book(),
                path = locator.path(),
                "resource not found, labelling without size"
            );
            Ok(name.to_string())
        }
        Err(source) => {
            tracing::warn!(
                book = locator.book(),
                path = locator.path(),
                error = %source,
                "resource lookup failed"
            );
            Err(Error::Backend {
                path: locator.path().to_string(),
                source,
            })
        }
    }
}

fn resource_length(locator: &Locator) -> StoreResult<u64> {
    tracing::trace!(book = locator.book(), path = locator.path(), "resolving resource");
    let handle = locator.store().resolve(locator.path())?;
    if !handle.exists()? {
        return Err(StoreError::NotFound(locator.path().to_string()));
    }
    handle.length()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::{MemoryStore, ResourceHandle};
    use std::io;
    use std::sync::atomic::AtomicUsize;

    fn memory_store() -> Arc<dyn ResourceStore> {
        let store = MemoryStore::new("book");
        store.insert("/docs/report.pdf", 1234);
        Arc::new(store)
    }

    /// Counts lookups and answers according to its mode.
    #[derive(Debug)]
    struct ScriptedStore {
        mode: Mode,
        resolves: AtomicUsize,
    }

    #[derive(Debug, Clone, Copy)]
    enum Mode {
        VanishesBeforeLength,
        Broken,
    }

    struct ScriptedHandle(Mode);

    impl ScriptedStore {
        fn new(mode: Mode) -> Arc<Self> {
            Arc::new(Self {
                mode,
                resolves: AtomicUsize::new(0),
            })
        }
    }

    impl ResourceStore for ScriptedStore {
        fn book(&self) -> &str {
            "scripted"
        }

        fn resolve(&self, _path: &str) -> StoreResult<Box<dyn ResourceHandle>> {
            self.resolves.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(ScriptedHandle(self.mode)))
        }
    }

    impl ResourceHandle for ScriptedHandle {
        fn exists(&self) -> StoreResult<bool> {
            Ok(true)
        }

        fn length(&self) -> StoreResult<u64> {
            match self.0 {
                Mode::VanishesBeforeLength => Err(StoreError::NotFound("gone".to_string())),
                Mode::Broken => Err(StoreError::Io(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "denied",
                ))),
            }
        }
    }

    #[test]
    fn label_includes_size_of_existing_file() {
        let file = FileRef::new();
        file.set_locator(Some(memory_store()), Some("/docs/report.pdf"))
            .unwrap();
        assert_eq!(file.label().unwrap(), "report.pdf (1.2 KB)");
        assert_eq!(file.identifier_stem().unwrap(), "report");
    }

    #[test]
    fn label_of_missing_file_is_bare_filename() {
        let file = FileRef::new();
        file.set_locator(Some(memory_store()), Some("/docs/missing.txt"))
            .unwrap();
        assert_eq!(file.label().unwrap(), "missing.txt");
    }

    #[test]
    fn label_when_resource_vanishes_mid_query() {
        let store = ScriptedStore::new(Mode::VanishesBeforeLength);
        let file = FileRef::with_locator(Locator::new(store, "a/notes.txt").unwrap());
        assert_eq!(file.label().unwrap(), "notes.txt");
    }

    #[test]
    fn backend_failure_is_propagated() {
        let store = ScriptedStore::new(Mode::Broken);
        let file = FileRef::with_locator(Locator::new(store, "a/notes.txt").unwrap());
        assert!(matches!(
            file.label(),
            Err(Error::Backend {
                source: StoreError::Io(_),
                ..
            })
        ));
    }

    #[test]
    fn directory_label_never_queries_store() {
        let store = ScriptedStore::new(Mode::Broken);
        let file = FileRef::with_locator(Locator::new(store.clone(), "a/images/").unwrap());
        assert_eq!(file.label().unwrap(), "images");
        assert_eq!(store.resolves.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unset_path_is_illegal_state() {
        let file = FileRef::new();
        assert!(matches!(file.label(), Err(Error::IllegalState(_))));
        assert!(matches!(
            file.identifier_stem(),
            Err(Error::IllegalState(_))
        ));
    }

    #[test]
    fn empty_filename_is_invalid_argument() {
        let file = FileRef::new();
        file.set_locator(Some(memory_store()), Some("/")).unwrap();
        assert!(matches!(file.label(), Err(Error::InvalidArgument(_))));
        assert!(matches!(
            file.identifier_stem(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn inconsistent_locator_is_rejected_without_change() {
        let store = memory_store();
        let file = FileRef::new();
        file.set_locator(Some(store.clone()), Some("/docs/report.pdf"))
            .unwrap();

        assert!(matches!(
            file.set_locator(Some(store.clone()), None),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            file.set_locator(None, Some("/x")),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            file.set_locator(Some(store), Some("")),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(file.path().as_deref(), Some("/docs/report.pdf"));
    }

    #[test]
    fn clearing_locator() {
        let file = FileRef::new();
        file.set_locator(Some(memory_store()), Some("/docs/report.pdf"))
            .unwrap();
        file.set_locator(None, None).unwrap();
        assert!(file.locator().is_none());
    }

    #[test]
    fn freeze_blocks_mutation() {
        let store = memory_store();
        let file = FileRef::new();
        file.set_locator(Some(store.clone()), Some("/docs/report.pdf"))
            .unwrap();
        file.set_hidden(true).unwrap();

        assert!(file.freeze().is_frozen());
        file.freeze();

        assert!(matches!(
            file.set_locator(Some(store), Some("/other.txt")),
            Err(Error::Frozen(_))
        ));
        assert!(matches!(file.set_hidden(false), Err(Error::Frozen(_))));
        assert_eq!(file.path().as_deref(), Some("/docs/report.pdf"));
        assert!(file.is_hidden());
    }

    #[test]
    fn into_frozen_keeps_values() {
        let file =
            FileRef::with_locator(Locator::new(memory_store(), "/docs/report.pdf").unwrap());
        file.set_hidden(true).unwrap();
        let frozen = file.into_frozen();
        assert!(frozen.is_hidden());
        assert_eq!(frozen.path(), Some("/docs/report.pdf"));
        assert_eq!(frozen.locator().map(Locator::book), Some("book"));
        assert_eq!(frozen.label().unwrap(), "report.pdf (1.2 KB)");
        assert_eq!(frozen.default_id().unwrap(), "file-report");
    }
}
