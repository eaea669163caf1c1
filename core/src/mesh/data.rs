//! Mesh part and per-frame vertex data structures.
//!
//! This module provides:
//! - [`PartId`] / [`MeshPart`] - A bakeable piece of an animated target
//! - [`FrameSnapshot`] - Deformed positions and normals at one sampled time
//! - [`SkinnedVertex`] - Bind-pose vertex with bone influences

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::material::CpuMaterial;

/// Stable identifier of a mesh part within its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(pub u32);

impl std::fmt::Display for PartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One renderer/material grouping under an animated target.
///
/// The vertex count and vertex order must stay the same for every frame
/// sampled from the same clip.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshPart {
    /// Identifier used to read the part back from the target.
    pub id: PartId,
    /// Part (renderer) name.
    pub name: String,
    /// Material the part is rendered with.
    pub material: Arc<CpuMaterial>,
    /// Number of vertices in every snapshot of this part.
    pub vertex_count: u32,
}

impl MeshPart {
    /// Create a part with an empty default material.
    pub fn new(id: PartId, name: impl Into<String>, vertex_count: u32) -> Self {
        Self {
            id,
            name: name.into(),
            material: Arc::new(CpuMaterial::new()),
            vertex_count,
        }
    }

    /// Set the material.
    #[must_use]
    pub fn with_material(mut self, material: Arc<CpuMaterial>) -> Self {
        self.material = material;
        self
    }

    /// Name of the material, used to group parts that share it.
    pub fn material_name(&self) -> Option<&str> {
        self.material.name.as_deref()
    }
}

/// Deformed vertex attributes of one part (or merged group) at one time.
///
/// Snapshots are scratch buffers: the sampler clears and refills the same
/// snapshot every frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameSnapshot {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals, parallel to `positions`.
    pub normals: Vec<[f32; 3]>,
}

impl FrameSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty snapshot with room for `vertices` entries.
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
        }
    }

    /// Remove all vertices, keeping the allocation.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
    }

    /// Append one vertex.
    pub fn push(&mut self, position: [f32; 3], normal: [f32; 3]) {
        self.positions.push(position);
        self.normals.push(normal);
    }

    /// Number of complete vertices (position and normal both present).
    pub fn len(&self) -> usize {
        self.positions.len().min(self.normals.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if positions and normals have the same length.
    pub fn is_consistent(&self) -> bool {
        self.positions.len() == self.normals.len()
    }
}

/// Bind-pose vertex with up to four bone influences.
#[repr(C)]
#[derive(
    Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
pub struct SkinnedVertex {
    /// Bind-pose position in target space.
    pub position: [f32; 3],
    /// Bind-pose normal in target space.
    pub normal: [f32; 3],
    /// Bone indices.
    pub joints: [u32; 4],
    /// Bone weights, parallel to `joints`.
    pub weights: [f32; 4],
}

impl SkinnedVertex {
    /// Vertex bound rigidly to a single bone.
    pub fn rigid(position: [f32; 3], normal: [f32; 3], bone: u32) -> Self {
        Self {
            position,
            normal,
            joints: [bone, 0, 0, 0],
            weights: [1.0, 0.0, 0.0, 0.0],
        }
    }

    /// Weights scaled so they sum to one. All-zero weights bind to the
    /// first joint.
    pub fn normalized_weights(&self) -> [f32; 4] {
        let sum: f32 = self.weights.iter().sum();
        if sum > f32::EPSILON {
            self.weights.map(|w| w / sum)
        } else {
            [1.0, 0.0, 0.0, 0.0]
        }
    }
}
