use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("illegal state: {0}")]
    IllegalState(&'static str),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("cannot modify frozen {0}")]
    Frozen(&'static str),
    #[error("backend error for '{path}': {source}")]
    Backend {
        path: String,
        #[source]
        source: StoreError,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("other error: {0}")]
    Other(String),
}

/// Failures reported by a resource store.
///
/// `NotFound` is an ordinary outcome (the resource is absent or vanished
/// mid-query); everything else indicates trouble with the backend itself.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
