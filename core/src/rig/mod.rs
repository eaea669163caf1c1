//! Reference animation oracle.
//!
//! [`SkinnedTarget`] implements [`AnimatedTarget`](crate::target::AnimatedTarget)
//! with a bone hierarchy, keyframed clips, and linear blend skinning, so
//! the baker can run without a host engine. Rigs are loaded from JSON
//! ([`RigDescription`]) or built in ([`demo_target`]).

mod demo;
mod description;
mod error;
mod skeleton;
mod target;

pub use demo::demo_description;
pub use description::{RigClip, RigDescription, SkinnedMesh};
pub use error::RigError;
pub use skeleton::{Bone, Skeleton};
pub use target::SkinnedTarget;

/// The built-in demo rig as a ready target.
pub fn demo_target() -> Result<SkinnedTarget, RigError> {
    SkinnedTarget::from_description(demo_description())
}
