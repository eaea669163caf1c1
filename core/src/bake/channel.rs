//! Fully materialised per-frame vertex data of one bake unit.

use crate::mesh::FrameSnapshot;

use super::error::BakeError;

/// Which vertex attribute a texture holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttribute {
    Position,
    Normal,
}

impl VertexAttribute {
    /// Both attributes, in the order textures are produced.
    pub const ALL: [Self; 2] = [Self::Position, Self::Normal];

    /// Short suffix used in asset names.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Position => "pos",
            Self::Normal => "nml",
        }
    }

    /// The attribute's vectors within a snapshot.
    pub fn select(self, snapshot: &FrameSnapshot) -> &[[f32; 3]] {
        match self {
            Self::Position => &snapshot.positions,
            Self::Normal => &snapshot.normals,
        }
    }
}

/// Every sampled frame of one bake unit.
///
/// Each pushed snapshot must hold exactly `vertex_count` vertices. The
/// streaming baker never builds one of these; it exists for callers that
/// want the raw sequence, and for [`pack_channel`](super::pack_channel).
#[derive(Debug, Clone, PartialEq)]
pub struct BakedChannel {
    name: String,
    vertex_count: u32,
    frames: Vec<FrameSnapshot>,
}

impl BakedChannel {
    pub fn new(name: impl Into<String>, vertex_count: u32) -> Self {
        Self {
            name: name.into(),
            vertex_count,
            frames: Vec::new(),
        }
    }

    /// Create a channel with room for `frame_count` frames.
    pub fn with_capacity(name: impl Into<String>, vertex_count: u32, frame_count: u32) -> Self {
        Self {
            name: name.into(),
            vertex_count,
            frames: Vec::with_capacity(frame_count as usize),
        }
    }

    /// Append the next frame.
    pub fn push(&mut self, snapshot: FrameSnapshot) -> Result<(), BakeError> {
        let expected = self.vertex_count as usize;
        let actual = snapshot.positions.len().max(snapshot.normals.len());
        if !snapshot.is_consistent() || actual != expected {
            return Err(BakeError::VertexCountMismatch {
                part: self.name.clone(),
                frame: self.frames.len() as u32,
                expected,
                actual,
            });
        }
        self.frames.push(snapshot);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn frame_count(&self) -> u32 {
        self.frames.len() as u32
    }

    pub fn frames(&self) -> &[FrameSnapshot] {
        &self.frames
    }

    pub fn frame(&self, index: u32) -> Option<&FrameSnapshot> {
        self.frames.get(index as usize)
    }
}
