//! Asset stores that baked textures and materials are persisted into.
//!
//! - [`AssetStore`] - Read/write interface of a store
//! - [`MemoryStore`] - In-memory store for tests and dry runs
//! - [`FileSystemStore`] - Directory on disk
//! - [`normalize`] / [`join`] - Asset path handling

mod error;
mod filesystem;
mod memory;
mod path;
mod provider;

pub use error::StoreError;
pub use filesystem::FileSystemStore;
pub use memory::MemoryStore;
pub use path::{join, normalize};
pub use provider::AssetStore;
