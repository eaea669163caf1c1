use thiserror::Error;

/// Errors reported by an [`AssetStore`](super::AssetStore).
#[derive(Error, Debug)]
pub enum StoreError {
    /// The requested asset was not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// An IO error occurred while accessing the store.
    #[error("IO error: {0}")]
    Io(#[source] std::io::Error),
    /// The path is invalid (empty, contains `..`, or other normalization failure).
    #[error("invalid path: {0}")]
    InvalidPath(String),
    /// The store does not accept writes.
    #[error("store is read-only")]
    ReadOnly,
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            StoreError::NotFound(err.to_string())
        } else {
            StoreError::Io(err)
        }
    }
}
