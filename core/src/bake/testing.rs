//! Scripted oracle for unit tests.

use std::sync::Arc;

use crate::animation::AnimationClip;
use crate::material::CpuMaterial;
use crate::mesh::{FrameSnapshot, MeshPart, PartId};
use crate::scene::NodeTransform;
use crate::target::{AnimatedTarget, OracleError};

/// Target whose vertex `i` of part `p` sits at `(i, t, p)` in root space.
pub(crate) struct ScriptedTarget {
    pub parts: Vec<MeshPart>,
    pub world: NodeTransform,
    pub posed_times: Vec<f32>,
    /// Drop one vertex from every part when this frame is read.
    pub shrink_at_frame: Option<u32>,
    time: f32,
}

impl ScriptedTarget {
    pub fn new(parts: Vec<MeshPart>) -> Self {
        Self {
            parts,
            world: NodeTransform::IDENTITY,
            posed_times: Vec::new(),
            shrink_at_frame: None,
            time: 0.0,
        }
    }

    pub fn single(name: &str, vertices: u32) -> Self {
        Self::new(vec![MeshPart::new(PartId(0), name, vertices)])
    }

    pub fn part(id: u32, name: &str, material: &str, vertices: u32) -> MeshPart {
        MeshPart::new(PartId(id), name, vertices)
            .with_material(Arc::new(CpuMaterial::new().with_name(material)))
    }
}

impl AnimatedTarget for ScriptedTarget {
    fn name(&self) -> &str {
        "scripted"
    }

    fn mesh_parts(&self) -> Vec<MeshPart> {
        self.parts.clone()
    }

    fn world_transform(&self) -> NodeTransform {
        self.world
    }

    fn pose(&mut self, _clip: &AnimationClip, time: f32) -> Result<(), OracleError> {
        self.posed_times.push(time);
        self.time = time;
        Ok(())
    }

    fn read_part(&self, part: PartId, out: &mut FrameSnapshot) -> Result<(), OracleError> {
        let mesh = self
            .parts
            .iter()
            .find(|p| p.id == part)
            .ok_or(OracleError::UnknownPart(part))?;
        let frame = self.posed_times.len().saturating_sub(1) as u32;
        let mut count = mesh.vertex_count;
        if self.shrink_at_frame == Some(frame) {
            count = count.saturating_sub(1);
        }
        for i in 0..count {
            let local = [i as f32, self.time, part.0 as f32];
            out.push(
                self.world.transform_point(local),
                self.world.rotate_vector([0.0, 1.0, 0.0]),
            );
        }
        Ok(())
    }
}
