//! Output of a bake: one texture pair per bake unit.

use std::sync::Arc;

use crate::animation::AnimationClip;
use crate::material::CpuMaterial;
use crate::mesh::PartId;
use crate::texture::CpuTexture;

use super::channel::VertexAttribute;
use super::extract::PartSegment;

/// Position and normal textures of one bake unit.
#[derive(Debug, Clone, PartialEq)]
pub struct BakedPart {
    /// Unique, file-safe name within the bake.
    pub name: String,
    /// Source mesh parts and their texel columns.
    pub segments: Vec<PartSegment>,
    /// Material of the source part(s).
    pub material: Arc<CpuMaterial>,
    pub vertex_count: u32,
    pub frame_count: u32,
    pub position: CpuTexture,
    pub normal: CpuTexture,
}

impl BakedPart {
    pub fn texture(&self, attribute: VertexAttribute) -> &CpuTexture {
        match attribute {
            VertexAttribute::Position => &self.position,
            VertexAttribute::Normal => &self.normal,
        }
    }

    /// Decoded vector of `vertex` at `frame`.
    pub fn vector(&self, attribute: VertexAttribute, vertex: u32, frame: u32) -> Option<[f32; 3]> {
        if vertex >= self.vertex_count || frame >= self.frame_count {
            return None;
        }
        let [x, y, z, _] = self.texture(attribute).texel(vertex, frame)?;
        Some([x, y, z])
    }

    /// Returns `true` if `part` was baked into this unit.
    pub fn covers(&self, part: PartId) -> bool {
        self.segments.iter().any(|s| s.part == part)
    }
}

/// Every baked unit of one clip, in mesh-part order.
///
/// Ownership of the textures passes to the caller, who may persist or
/// discard them.
#[derive(Debug, Clone, PartialEq)]
pub struct BakeResult {
    clip: AnimationClip,
    parts: Vec<BakedPart>,
}

impl BakeResult {
    pub fn new(clip: AnimationClip, parts: Vec<BakedPart>) -> Self {
        Self { clip, parts }
    }

    /// Result of baking a target with no mesh parts.
    pub fn empty(clip: AnimationClip) -> Self {
        Self::new(clip, Vec::new())
    }

    /// The clip that was baked.
    pub fn clip(&self) -> &AnimationClip {
        &self.clip
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Look up a unit by name.
    pub fn get(&self, name: &str) -> Option<&BakedPart> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// The unit a mesh part was baked into.
    pub fn get_by_part(&self, part: PartId) -> Option<&BakedPart> {
        self.parts.iter().find(|p| p.covers(part))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BakedPart> {
        self.parts.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|p| p.name.as_str())
    }
}

impl<'a> IntoIterator for &'a BakeResult {
    type Item = &'a BakedPart;
    type IntoIter = std::slice::Iter<'a, BakedPart>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}
