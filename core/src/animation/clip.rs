//! Animation clip metadata consumed by the baker.

use serde::{Deserialize, Serialize};

/// An animation clip as seen by the baker.
///
/// Only the timing metadata lives here; the keyframes themselves belong to
/// whatever drives the [`AnimatedTarget`](crate::target::AnimatedTarget).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    /// Clip name.
    pub name: String,
    /// Duration in seconds.
    pub length: f32,
    /// Sample rate in frames per second.
    pub frame_rate: f32,
    /// Whether playback wraps around at the end.
    #[serde(default)]
    pub is_looping: bool,
}

impl AnimationClip {
    /// Creates a non-looping clip.
    pub fn new(name: impl Into<String>, length: f32, frame_rate: f32) -> Self {
        Self {
            name: name.into(),
            length,
            frame_rate,
            is_looping: false,
        }
    }

    /// Set the loop flag.
    #[must_use]
    pub fn with_looping(mut self, is_looping: bool) -> Self {
        self.is_looping = is_looping;
        self
    }

    /// Check that the clip can be sampled at fixed steps.
    ///
    /// Returns a human-readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(format!(
                "frame rate must be positive, got {}",
                self.frame_rate
            ));
        }
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(format!("length must be positive, got {}", self.length));
        }
        let frames = self.frame_span();
        if frames >= u32::MAX as f64 {
            return Err(format!("{frames} frames exceed the addressable range"));
        }
        Ok(())
    }

    /// Number of sampled frames: `floor(length * frame_rate) + 1`.
    ///
    /// Both ends of the clip are included. Only meaningful for a clip that
    /// passes [`validate`](Self::validate).
    pub fn frame_count(&self) -> u32 {
        (self.frame_span() as u32).saturating_add(1)
    }

    /// `floor(length * frame_rate)`, shared by [`validate`](Self::validate)
    /// and [`frame_count`](Self::frame_count) so both see the same value.
    ///
    /// The product is taken in f32 (0.7 s at 10 fps is 7 steps, not 6) and
    /// widened before flooring.
    fn frame_span(&self) -> f64 {
        f64::from(self.length * self.frame_rate).floor()
    }

    /// Seconds between two sampled frames.
    pub fn frame_step(&self) -> f32 {
        1.0 / self.frame_rate
    }

    /// Sample time of frame `index`.
    pub fn frame_time(&self, index: u32) -> f32 {
        index as f32 * self.frame_step()
    }

    /// Frame index (fractional) the runtime shader derives from playback time.
    pub fn frame_index(&self, time: f32) -> f32 {
        time * self.frame_rate
    }

    /// Normalized V coordinate at which the runtime samples playback `time`
    /// in a texture of `height` rows.
    ///
    /// Looping clips wrap around `frame_count`; others clamp to the last
    /// frame. The result addresses texel centres so that whole frames land
    /// exactly on their row.
    pub fn frame_coordinate(&self, time: f32, height: u32) -> f32 {
        let frames = self.frame_count() as f32;
        let index = self.frame_index(time);
        let index = if self.is_looping {
            index.rem_euclid(frames)
        } else {
            index.clamp(0.0, frames - 1.0)
        };
        (index + 0.5) / height.max(1) as f32
    }
}
