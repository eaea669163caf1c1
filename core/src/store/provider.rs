use super::StoreError;

/// Destination for persisted bake artifacts.
///
/// Backends implement byte-level I/O. Paths are normalized by the backend
/// with [`normalize`](super::normalize) before use, so `..` never reaches
/// the underlying storage.
///
/// # Read vs Write
///
/// All stores implement the read operations. Write operations have default
/// implementations that return [`StoreError::ReadOnly`]; writable stores
/// override them and return `false` from
/// [`is_read_only()`](AssetStore::is_read_only).
pub trait AssetStore: Send + Sync {
    // --- Read operations (required) ---

    /// Read the entire contents of the asset at `path`.
    fn read_asset(&self, path: &str) -> Result<Vec<u8>, StoreError>;

    /// Check whether an asset exists at `path`.
    fn exists(&self, path: &str) -> Result<bool, StoreError>;

    /// List the immediate children of a directory, sorted.
    ///
    /// Returns an empty vec for non-existent directories.
    fn list_dir(&self, path: &str) -> Result<Vec<String>, StoreError>;

    // --- Write operations (optional, default returns ReadOnly) ---

    fn is_read_only(&self) -> bool {
        true
    }

    /// Create or overwrite the asset at `path`.
    fn create_asset(&self, _path: &str, _data: Vec<u8>) -> Result<(), StoreError> {
        Err(StoreError::ReadOnly)
    }

    /// Create a directory and its parents.
    fn create_dir(&self, _path: &str) -> Result<(), StoreError> {
        Err(StoreError::ReadOnly)
    }
}
