use crate::core::errors::{Error, Result};
use crate::models::path::SEPARATOR;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Book-relative paths for every entry under `root`, sorted by name, joined
/// with `/` and with a trailing `/` on directories. `root` itself is omitted.
pub fn walk_book(root: &Path) -> Result<Vec<String>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry.path().strip_prefix(root).map_err(|_| {
            Error::Other(format!(
                "walked entry {} outside {}",
                entry.path().display(),
                root.display()
            ))
        })?;
        let mut path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(&SEPARATOR.to_string());
        if entry.file_type().is_dir() {
            path.push(SEPARATOR);
        }
        paths.push(path);
    }
    tracing::debug!(root = %root.display(), count = paths.len(), "walked book");
    Ok(paths)
}
