//! Bone hierarchy and skinning matrices.

use serde::{Deserialize, Serialize};

use crate::math::Mat4;
use crate::scene::NodeTransform;

use super::error::RigError;

/// One bone of a skeleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub name: String,
    /// Index of the parent bone; must be lower than this bone's index.
    #[serde(default)]
    pub parent: Option<usize>,
    /// Local bind-pose transform relative to the parent.
    #[serde(default)]
    pub rest: NodeTransform,
}

impl Bone {
    pub fn new(name: impl Into<String>, parent: Option<usize>, rest: NodeTransform) -> Self {
        Self {
            name: name.into(),
            parent,
            rest,
        }
    }
}

/// Bones in parent-first order plus their inverse bind matrices.
#[derive(Debug, Clone)]
pub struct Skeleton {
    bones: Vec<Bone>,
    inverse_bind: Vec<Mat4>,
}

impl Skeleton {
    /// Validate the hierarchy and precompute inverse bind matrices.
    pub fn new(bones: Vec<Bone>) -> Result<Self, RigError> {
        for (index, bone) in bones.iter().enumerate() {
            if let Some(parent) = bone.parent
                && parent >= index
            {
                return Err(RigError::InvalidParent {
                    bone: bone.name.clone(),
                    parent,
                });
            }
            if bones[..index].iter().any(|b| b.name == bone.name) {
                return Err(RigError::DuplicateBone(bone.name.clone()));
            }
        }

        let rest: Vec<NodeTransform> = bones.iter().map(|b| b.rest).collect();
        let mut globals = Vec::with_capacity(bones.len());
        global_matrices(&bones, &rest, &mut globals);
        let inverse_bind = globals
            .iter()
            .zip(&bones)
            .map(|(global, bone)| {
                global
                    .try_inverse()
                    .ok_or_else(|| RigError::DegenerateBone(bone.name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            bones,
            inverse_bind,
        })
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.bones.iter().position(|b| b.name == name)
    }

    /// Local bind-pose transforms, one per bone.
    pub fn rest_pose(&self) -> Vec<NodeTransform> {
        self.bones.iter().map(|b| b.rest).collect()
    }

    /// Skinning matrices (`global * inverse_bind`) for a local pose.
    ///
    /// `out` is cleared and refilled; at rest every matrix is the identity.
    pub fn skin_matrices(&self, locals: &[NodeTransform], out: &mut Vec<Mat4>) {
        global_matrices(&self.bones, locals, out);
        for (matrix, inverse_bind) in out.iter_mut().zip(&self.inverse_bind) {
            *matrix *= inverse_bind;
        }
    }
}

fn global_matrices(bones: &[Bone], locals: &[NodeTransform], out: &mut Vec<Mat4>) {
    out.clear();
    for (index, bone) in bones.iter().enumerate() {
        let local = locals.get(index).unwrap_or(&bone.rest).to_matrix();
        let global = match bone.parent {
            Some(parent) => out[parent] * local,
            None => local,
        };
        out.push(global);
    }
}
