//! Keyframed bone channels evaluated by the reference rig.

use serde::{Deserialize, Serialize};

use crate::math;
use crate::scene::NodeTransform;

/// How values between two keyframes are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interpolation {
    /// Hold the previous keyframe.
    Step,
    /// Lerp translation and scale, slerp rotation.
    #[default]
    Linear,
}

/// A single keyframe: a local bone transform at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Time in seconds.
    pub time: f32,
    /// Local transform of the bone at `time`.
    pub transform: NodeTransform,
}

/// Keyframes driving one bone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationChannel {
    /// Name of the driven bone.
    pub bone: String,
    /// Interpolation between keyframes.
    #[serde(default)]
    pub interpolation: Interpolation,
    /// Keyframes sorted by time.
    pub keyframes: Vec<Keyframe>,
}

impl AnimationChannel {
    /// Create a linear channel, sorting the keyframes by time.
    pub fn new(bone: impl Into<String>, keyframes: Vec<Keyframe>) -> Self {
        let mut channel = Self {
            bone: bone.into(),
            interpolation: Interpolation::Linear,
            keyframes,
        };
        channel.sort_keyframes();
        channel
    }

    /// Restore time order after the keyframes were filled in directly.
    /// Keys with equal times keep their relative order.
    pub fn sort_keyframes(&mut self) {
        self.keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    /// Set the interpolation mode.
    #[must_use]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Evaluate the channel at `time`, holding the first and last keys
    /// outside their range. Returns `None` for an empty channel.
    pub fn sample(&self, time: f32) -> Option<NodeTransform> {
        let first = self.keyframes.first()?;
        let last = self.keyframes.last()?;
        if time <= first.time {
            return Some(first.transform);
        }
        if time >= last.time {
            return Some(last.transform);
        }

        let next = self.keyframes.partition_point(|k| k.time <= time);
        let a = &self.keyframes[next - 1];
        let b = &self.keyframes[next];
        if self.interpolation == Interpolation::Step {
            return Some(a.transform);
        }

        let span = b.time - a.time;
        let t = if span > 0.0 { (time - a.time) / span } else { 0.0 };
        Some(NodeTransform {
            translation: math::lerp3(a.transform.translation, b.transform.translation, t),
            rotation: math::slerp_array(a.transform.rotation, b.transform.rotation, t),
            scale: math::lerp3(a.transform.scale, b.transform.scale, t),
        })
    }
}
