//! Animation clip metadata and keyframe channels.
//!
//! - [`AnimationClip`] - timing metadata the baker samples against
//! - [`AnimationChannel`] / [`Keyframe`] - bone keyframes for the reference rig

mod channel;
mod clip;

pub use channel::{AnimationChannel, Interpolation, Keyframe};
pub use clip::AnimationClip;
