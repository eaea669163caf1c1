//! Mesh part types and skinned mesh generators.
//!
//! - [`MeshPart`] / [`PartId`] - Bake units exposed by an animated target
//! - [`FrameSnapshot`] - Deformed vertex attributes at one sampled time
//! - [`SkinnedVertex`] - Bind-pose vertex with bone influences
//! - Generators for skinned shapes (column, sphere)

mod data;
pub mod generators;

pub use data::{FrameSnapshot, MeshPart, PartId, SkinnedVertex};
