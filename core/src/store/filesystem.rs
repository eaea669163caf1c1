use std::path::{Path, PathBuf};

use super::error::StoreError;
use super::path::normalize;
use super::provider::AssetStore;

/// Asset store writing into a directory on disk.
///
/// Asset paths are normalized and joined onto the root, so `..` can never
/// escape it. All I/O is blocking (`std::fs`).
///
/// # Example
///
/// ```ignore
/// let store = FileSystemStore::new("./out");
/// // Writes ./out/baked/body_walk_pos.vat
/// store.create_asset("baked/body_walk_pos.vat", bytes)?;
/// ```
pub struct FileSystemStore {
    root: PathBuf,
}

impl FileSystemStore {
    /// Create a store rooted at `root`.
    ///
    /// The directory does not need to exist yet; it is created on the first
    /// write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StoreError> {
        if path.trim_matches('/').is_empty() {
            return Ok(self.root.clone());
        }
        Ok(self.root.join(normalize(path)?))
    }
}

impl AssetStore for FileSystemStore {
    fn read_asset(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        let full_path = self.resolve(path)?;
        Ok(std::fs::read(full_path)?)
    }

    fn exists(&self, path: &str) -> Result<bool, StoreError> {
        Ok(self.resolve(path)?.exists())
    }

    fn list_dir(&self, path: &str) -> Result<Vec<String>, StoreError> {
        let full_path = self.resolve(path)?;
        if !full_path.is_dir() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(full_path)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                entries.push(name.to_owned());
            }
        }
        entries.sort();
        Ok(entries)
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn create_asset(&self, path: &str, data: Vec<u8>) -> Result<(), StoreError> {
        let full_path = self.resolve(path)?;
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(full_path, data)?;
        Ok(())
    }

    fn create_dir(&self, path: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(self.resolve(path)?)?;
        Ok(())
    }
}
