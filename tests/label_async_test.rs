use anyhow::Result;
use fileref::services::label::{label_async, labels_async};
use fileref::{Error, FileRef, LocalStore, ResourceStore};
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

#[tokio::test]
async fn test_labels_resolve_off_executor() -> Result<()> {
    let temp_root = tempdir()?;
    let root = temp_root.path();
    fs::write(root.join("notes.txt"), "Hello world content")?;
    fs::create_dir_all(root.join("assets"))?;

    let store: Arc<dyn ResourceStore> = Arc::new(LocalStore::new("site", root));
    let files: Vec<Arc<FileRef>> = ["notes.txt", "assets/", "missing.md"]
        .into_iter()
        .map(|path| -> fileref::Result<Arc<FileRef>> {
            let file = FileRef::new();
            file.set_locator(Some(store.clone()), Some(path))?;
            Ok(Arc::new(file))
        })
        .collect::<fileref::Result<_>>()?;

    assert_eq!(label_async(files[0].clone()).await?, "notes.txt (19 B)");

    let labels = labels_async(&files).await?;
    assert_eq!(labels, vec!["notes.txt (19 B)", "assets", "missing.md"]);
    Ok(())
}

#[tokio::test]
async fn test_unset_reference_fails() {
    let result = label_async(Arc::new(FileRef::new())).await;
    assert!(matches!(result, Err(Error::IllegalState(_))));
}
