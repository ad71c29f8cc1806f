//! Name derivation for slash separated resource paths.

use crate::core::errors::{Error, Result};

/// The path separator used for all file references.
pub const SEPARATOR: char = '/';

/// A trailing separator marks a directory reference.
pub fn is_directory(path: &str) -> bool {
    path.ends_with(SEPARATOR)
}

/// Last non-empty segment of `path`, without the trailing separator of a
/// directory path.
pub fn filename(path: &str) -> Result<&str> {
    let (search, end) = if is_directory(path) {
        let end = path.len() - SEPARATOR.len_utf8();
        (&path[..end], end)
    } else {
        (path, path.len())
    };
    let start = search.rfind(SEPARATOR).map_or(0, |ix| ix + SEPARATOR.len_utf8());
    let name = &path[start..end];
    if name.is_empty() {
        return Err(Error::InvalidArgument(format!(
            "Invalid filename for file: {path:?}"
        )));
    }
    Ok(name)
}

/// Filename with its last `.extension` removed, unless that would leave it
/// empty. Directory names are returned whole.
pub fn identifier_stem(path: &str) -> Result<&str> {
    let name = filename(path)?;
    if is_directory(path) {
        return Ok(name);
    }
    match name.rfind('.') {
        Some(dot) if dot > 0 => Ok(&name[..dot]),
        _ => Ok(name),
    }
}
