//! Linear-blend-skinning reference target.

use std::sync::Arc;

use crate::animation::AnimationClip;
use crate::material::CpuMaterial;
use crate::math::{self, Mat4, Vec3};
use crate::mesh::{FrameSnapshot, MeshPart, PartId, SkinnedVertex};
use crate::scene::NodeTransform;
use crate::target::{AnimatedTarget, OracleError};

use super::description::{RigClip, RigDescription};
use super::error::RigError;
use super::skeleton::Skeleton;

struct RigMesh {
    name: String,
    material: Arc<CpuMaterial>,
    vertices: Vec<SkinnedVertex>,
}

/// An [`AnimatedTarget`] that skins its meshes on the CPU.
///
/// Posing evaluates every channel of the clip at the requested time and
/// rebuilds the skinning matrices; reading a part blends each vertex by its
/// bone weights and places the result in world space.
pub struct SkinnedTarget {
    name: String,
    world: NodeTransform,
    skeleton: Skeleton,
    meshes: Vec<RigMesh>,
    clips: Vec<RigClip>,
    /// Bone index driven by each channel, per clip.
    channel_bones: Vec<Vec<usize>>,
    local_pose: Vec<NodeTransform>,
    skin: Vec<Mat4>,
}

impl SkinnedTarget {
    /// Build and validate a target from a description.
    pub fn from_description(mut description: RigDescription) -> Result<Self, RigError> {
        let skeleton = Skeleton::new(description.bones)?;

        for mesh in &description.meshes {
            for (vertex, v) in mesh.vertices.iter().enumerate() {
                let weights = v.normalized_weights();
                if let Some((joint, _)) = v
                    .joints
                    .iter()
                    .zip(weights)
                    .find(|(joint, w)| *w > 0.0 && **joint as usize >= skeleton.len())
                {
                    return Err(RigError::UnknownJoint {
                        mesh: mesh.name.clone(),
                        vertex,
                        joint: *joint,
                    });
                }
            }
        }

        for rig_clip in &mut description.clips {
            for channel in &mut rig_clip.channels {
                channel.sort_keyframes();
            }
        }

        let mut channel_bones = Vec::with_capacity(description.clips.len());
        for (index, rig_clip) in description.clips.iter().enumerate() {
            let name = &rig_clip.clip.name;
            if description.clips[..index].iter().any(|c| &c.clip.name == name) {
                return Err(RigError::DuplicateClip(name.clone()));
            }
            let bones = rig_clip
                .channels
                .iter()
                .map(|channel| {
                    skeleton
                        .index_of(&channel.bone)
                        .ok_or_else(|| RigError::UnknownBone {
                            clip: name.clone(),
                            bone: channel.bone.clone(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            channel_bones.push(bones);
        }

        let local_pose = skeleton.rest_pose();
        let mut skin = Vec::with_capacity(skeleton.len());
        skeleton.skin_matrices(&local_pose, &mut skin);
        let meshes = description
            .meshes
            .into_iter()
            .map(|m| RigMesh {
                name: m.name,
                material: Arc::new(m.material),
                vertices: m.vertices,
            })
            .collect();

        Ok(Self {
            name: description.name,
            world: description.world,
            skeleton,
            meshes,
            clips: description.clips,
            channel_bones,
            local_pose,
            skin,
        })
    }

    /// Parse a JSON description and build the target.
    pub fn from_json(json: &str) -> Result<Self, RigError> {
        Self::from_description(RigDescription::from_json(json)?)
    }

    /// Every clip the rig can play, in description order.
    pub fn clips(&self) -> impl Iterator<Item = &AnimationClip> {
        self.clips.iter().map(|c| &c.clip)
    }

    /// Look up a clip by name.
    pub fn clip(&self, name: &str) -> Option<&AnimationClip> {
        self.clips().find(|c| c.name == name)
    }

    /// Move the target root.
    pub fn set_world_transform(&mut self, world: NodeTransform) {
        self.world = world;
    }
}

impl AnimatedTarget for SkinnedTarget {
    fn name(&self) -> &str {
        &self.name
    }

    fn mesh_parts(&self) -> Vec<MeshPart> {
        self.meshes
            .iter()
            .enumerate()
            .map(|(index, mesh)| {
                MeshPart::new(PartId(index as u32), &mesh.name, mesh.vertices.len() as u32)
                    .with_material(mesh.material.clone())
            })
            .collect()
    }

    fn world_transform(&self) -> NodeTransform {
        self.world
    }

    fn pose(&mut self, clip: &AnimationClip, time: f32) -> Result<(), OracleError> {
        let index = self
            .clips
            .iter()
            .position(|c| c.clip.name == clip.name)
            .ok_or_else(|| OracleError::UnknownClip(clip.name.clone()))?;

        self.local_pose = self.skeleton.rest_pose();
        for (channel, &bone) in self.clips[index]
            .channels
            .iter()
            .zip(&self.channel_bones[index])
        {
            if let Some(local) = channel.sample(time) {
                self.local_pose[bone] = local;
            }
        }
        self.skeleton.skin_matrices(&self.local_pose, &mut self.skin);
        Ok(())
    }

    fn read_part(&self, part: PartId, out: &mut FrameSnapshot) -> Result<(), OracleError> {
        let mesh = self
            .meshes
            .get(part.0 as usize)
            .ok_or(OracleError::UnknownPart(part))?;
        let world = self.world.to_matrix();

        for vertex in &mesh.vertices {
            let weights = vertex.normalized_weights();
            let mut position = Vec3::zeros();
            let mut normal = Vec3::zeros();
            for (&joint, w) in vertex.joints.iter().zip(weights) {
                if w <= 0.0 {
                    continue;
                }
                let m = self.skin.get(joint as usize).ok_or_else(|| {
                    OracleError::Sampling(format!("missing skinning matrix {joint}"))
                })?;
                position += Vec3::from(math::transform_point(m, vertex.position)) * w;
                normal += Vec3::from(math::transform_vector(m, vertex.normal)) * w;
            }
            let normal = math::normalize_or_zero([normal.x, normal.y, normal.z]);
            out.push(
                math::transform_point(&world, [position.x, position.y, position.z]),
                self.world.rotate_vector(normal),
            );
        }
        Ok(())
    }
}
