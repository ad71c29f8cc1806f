use crate::core::errors::{Error, Result};
use crate::models::file_ref::FileRef;
use std::sync::Arc;
use tokio::task;

/// Computes [`FileRef::label`] on the blocking pool so a slow store does not
/// stall the async executor.
pub async fn label_async(file: Arc<FileRef>) -> Result<String> {
    task::spawn_blocking(move || file.label())
        .await
        .map_err(|e| Error::Other(format!("label task failed: {e}")))?
}

/// Labels for several references, in input order.
pub async fn labels_async(files: &[Arc<FileRef>]) -> Result<Vec<String>> {
    let handles: Vec<_> = files
        .iter()
        .cloned()
        .map(|file| task::spawn_blocking(move || file.label()))
        .collect();

    let mut labels = Vec::with_capacity(handles.len());
    for handle in handles {
        let label = handle
            .await
            .map_err(|e| Error::Other(format!("label task failed: {e}")))??;
        labels.push(label);
    }
    Ok(labels)
}
