//! Material types and runtime material generation.
//!
//! - [`CpuMaterial`] - Source material of a mesh part (property list)
//! - [`MaterialProperty`] / [`MaterialSemantic`] / [`MaterialValue`] - Tagged properties
//! - [`TextureRef`] - Reference to a texture asset
//! - [`generate_material`] - Builds the [`MaterialDescriptor`] of a baked part

mod generator;
mod types;

pub use generator::{
    BakedTextureRefs, MaterialDescriptor, MaterialError, ShaderRef, generate_material,
};
pub use types::{
    AlphaMode, CpuMaterial, MaterialProperty, MaterialSemantic, MaterialValue, TextureRef,
};
