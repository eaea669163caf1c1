//! Per-bake configuration.

use serde::{Deserialize, Serialize};

use crate::math;
use crate::texture::TextureFormat;

/// Space the baked vertex attributes are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateSpace {
    /// Relative to the target root. Positions get the inverse world
    /// transform, normals the inverse rotation only.
    Local,
    /// As returned by the oracle.
    #[default]
    World,
}

/// How mesh parts are grouped into textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackStrategy {
    /// One texture pair per mesh part.
    #[default]
    Separate,
    /// Parts sharing a material name are concatenated into one texture pair.
    /// Parts whose material has no name are never merged.
    MergeByMaterial,
}

/// How texture dimensions are derived from vertex and frame counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionPolicy {
    /// Width is the vertex count, height the frame count.
    #[default]
    Exact,
    /// Both dimensions rounded up to the next power of two. Padding texels
    /// stay zero.
    NextPowerOfTwo,
}

impl DimensionPolicy {
    /// Texture extent for `count` vertices or frames.
    pub fn apply(self, count: u32) -> u32 {
        match self {
            Self::Exact => count,
            Self::NextPowerOfTwo => math::next_power_of_two(count),
        }
    }
}

/// Options chosen once per bake and applied to every part and frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BakeSettings {
    pub space: CoordinateSpace,
    pub pack_strategy: PackStrategy,
    pub dimension_policy: DimensionPolicy,
    pub format: TextureFormat,
}

impl BakeSettings {
    /// Default settings: world space, separate parts, exact size, half floats.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_space(mut self, space: CoordinateSpace) -> Self {
        self.space = space;
        self
    }

    #[must_use]
    pub fn with_pack_strategy(mut self, pack_strategy: PackStrategy) -> Self {
        self.pack_strategy = pack_strategy;
        self
    }

    #[must_use]
    pub fn with_dimension_policy(mut self, dimension_policy: DimensionPolicy) -> Self {
        self.dimension_policy = dimension_policy;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: TextureFormat) -> Self {
        self.format = format;
        self
    }
}
