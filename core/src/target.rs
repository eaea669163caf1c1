//! The animation oracle capability the baker drives.
//!
//! An [`AnimatedTarget`] is whatever owns a posable, skinned object: a host
//! engine adapter, or the reference [`SkinnedTarget`](crate::rig::SkinnedTarget).
//! The baker only ever poses a target through `&mut self`, so a single target
//! can never be sampled by two bakes at once, while independent targets can be
//! baked on separate threads.

use thiserror::Error;

use crate::animation::AnimationClip;
use crate::mesh::{FrameSnapshot, MeshPart, PartId};
use crate::scene::NodeTransform;

/// Errors reported by an animation oracle.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    /// The target does not know the requested clip.
    #[error("unknown clip '{0}'")]
    UnknownClip(String),
    /// The target has no part with the given id.
    #[error("unknown mesh part {0}")]
    UnknownPart(PartId),
    /// Posing or deforming failed inside the oracle.
    #[error("sampling failed: {0}")]
    Sampling(String),
}

/// A posable object whose mesh parts can be read back after deformation.
pub trait AnimatedTarget {
    /// Target name, used in logs and error messages.
    fn name(&self) -> &str;

    /// All mesh parts under the target, in a stable order.
    fn mesh_parts(&self) -> Vec<MeshPart>;

    /// World transform of the target root.
    fn world_transform(&self) -> NodeTransform;

    /// Pose the target at `time` seconds into `clip`.
    fn pose(&mut self, clip: &AnimationClip, time: f32) -> Result<(), OracleError>;

    /// Append the deformed world-space vertices of `part` at the current
    /// pose to `out`.
    ///
    /// Implementations append rather than overwrite so merged parts can be
    /// read into one snapshot back to back.
    fn read_part(&self, part: PartId, out: &mut FrameSnapshot) -> Result<(), OracleError>;
}
