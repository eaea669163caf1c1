//! Serializable rig descriptions.

use serde::{Deserialize, Serialize};

use crate::animation::{AnimationChannel, AnimationClip};
use crate::material::CpuMaterial;
use crate::mesh::SkinnedVertex;
use crate::scene::NodeTransform;

use super::error::RigError;
use super::skeleton::Bone;

/// A skinned mesh of the rig, baked as one mesh part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinnedMesh {
    pub name: String,
    #[serde(default)]
    pub material: CpuMaterial,
    pub vertices: Vec<SkinnedVertex>,
}

/// Timing metadata and keyframe channels of one clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigClip {
    #[serde(flatten)]
    pub clip: AnimationClip,
    #[serde(default)]
    pub channels: Vec<AnimationChannel>,
}

/// Everything needed to build a [`SkinnedTarget`](super::SkinnedTarget).
///
/// ```json
/// {
///   "name": "worm",
///   "world": { "translation": [0, 0, 5] },
///   "bones": [{ "name": "root" }, { "name": "tip", "parent": 0 }],
///   "meshes": [{ "name": "body", "vertices": [...] }],
///   "clips": [{ "name": "wiggle", "length": 1.0, "frame_rate": 30, "channels": [...] }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigDescription {
    pub name: String,
    #[serde(default)]
    pub world: NodeTransform,
    pub bones: Vec<Bone>,
    #[serde(default)]
    pub meshes: Vec<SkinnedMesh>,
    #[serde(default)]
    pub clips: Vec<RigClip>,
}

impl RigDescription {
    pub fn from_json(json: &str) -> Result<Self, RigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, RigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
