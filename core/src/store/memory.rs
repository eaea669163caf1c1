use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, PoisonError, RwLock};

use super::error::StoreError;
use super::path::normalize;
use super::provider::AssetStore;

/// In-memory asset store for tests and dry runs.
///
/// Cloning shares the same contents. Directories are implicit: they exist
/// whenever an asset path contains that directory prefix.
///
/// # Example
///
/// ```ignore
/// let store = MemoryStore::new();
/// persist_bake(&store, "baked", &result, Some(&shader))?;
/// assert!(store.exists("baked/body_walk_pos.vat")?);
/// ```
#[derive(Clone, Default)]
pub struct MemoryStore {
    files: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
    read_only: bool,
}

impl MemoryStore {
    /// Create an empty, writable store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects every write.
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    /// Insert an asset directly, bypassing the read-only flag.
    pub fn insert(&self, path: &str, data: Vec<u8>) -> Result<(), StoreError> {
        let path = normalize(path)?;
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, data);
        Ok(())
    }

    /// Paths of every stored asset, sorted.
    pub fn paths(&self) -> Vec<String> {
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.files.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AssetStore for MemoryStore {
    fn read_asset(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        let path = normalize(path)?;
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        files.get(&path).cloned().ok_or(StoreError::NotFound(path))
    }

    fn exists(&self, path: &str) -> Result<bool, StoreError> {
        let path = normalize(path)?;
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        Ok(files.contains_key(&path))
    }

    fn list_dir(&self, path: &str) -> Result<Vec<String>, StoreError> {
        let prefix = if path.trim_matches('/').is_empty() {
            String::new()
        } else {
            format!("{}/", normalize(path)?)
        };
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        let mut children = BTreeSet::new();
        for key in files.keys() {
            if let Some(rest) = key.strip_prefix(&prefix) {
                let child = rest.split('/').next().unwrap_or(rest);
                if !child.is_empty() {
                    children.insert(child.to_owned());
                }
            }
        }
        Ok(children.into_iter().collect())
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn create_asset(&self, path: &str, data: Vec<u8>) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        self.insert(path, data)
    }

    fn create_dir(&self, path: &str) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        // Directories are implicit.
        normalize(path).map(|_| ())
    }
}
