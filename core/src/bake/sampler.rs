//! Fixed-step frame sampling against an animation oracle.

use crate::animation::AnimationClip;
use crate::compute::CancellationToken;
use crate::mesh::FrameSnapshot;
use crate::target::AnimatedTarget;

use super::error::BakeError;
use super::extract::BakeUnit;

/// Reject clips that cannot be sampled at fixed steps.
pub fn validate_clip(clip: &AnimationClip) -> Result<(), BakeError> {
    clip.validate()
        .map_err(|reason| BakeError::InvalidClipConfiguration {
            clip: clip.name.clone(),
            reason,
        })
}

/// Lazy, single-pass sequence of the frames of one bake unit.
///
/// Frame `i` poses the target at `i / frame_rate` and reads every part of the
/// unit into one reused snapshot. Nothing is posed until
/// [`next_frame`](Self::next_frame) is called. The sampler holds the target
/// mutably for its whole life, and the sequence cannot be restarted: after
/// the last frame, or after any error, it yields `None`.
pub struct FrameSampler<'a, T: AnimatedTarget + ?Sized> {
    target: &'a mut T,
    clip: &'a AnimationClip,
    unit: &'a BakeUnit,
    cancel: Option<&'a CancellationToken>,
    frame_count: u32,
    next: u32,
    scratch: FrameSnapshot,
}

impl<'a, T: AnimatedTarget + ?Sized> FrameSampler<'a, T> {
    /// Validates the clip; fails before any pose is requested.
    pub fn new(
        target: &'a mut T,
        clip: &'a AnimationClip,
        unit: &'a BakeUnit,
    ) -> Result<Self, BakeError> {
        validate_clip(clip)?;
        Ok(Self {
            target,
            clip,
            unit,
            cancel: None,
            frame_count: clip.frame_count(),
            next: 0,
            scratch: FrameSnapshot::with_capacity(unit.vertex_count as usize),
        })
    }

    /// Check `token` before every frame.
    #[must_use]
    pub fn with_cancellation(mut self, token: &'a CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Reuse an existing scratch buffer.
    #[must_use]
    pub fn with_scratch(mut self, mut scratch: FrameSnapshot) -> Self {
        scratch.clear();
        self.scratch = scratch;
        self
    }

    /// Total frames in the sequence.
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Frames not yet produced.
    pub fn remaining(&self) -> u32 {
        self.frame_count - self.next
    }

    /// Sample the next frame.
    ///
    /// The snapshot is only valid until the next call; callers may convert
    /// it in place.
    pub fn next_frame(&mut self) -> Option<Result<(u32, &mut FrameSnapshot), BakeError>> {
        if self.next >= self.frame_count {
            return None;
        }
        let frame = self.next;
        self.next += 1;
        match self.sample(frame) {
            Ok(()) => Some(Ok((frame, &mut self.scratch))),
            Err(err) => {
                self.next = self.frame_count;
                Some(Err(err))
            }
        }
    }

    /// Give back the scratch buffer for the next unit.
    pub fn into_scratch(self) -> FrameSnapshot {
        self.scratch
    }

    fn sample(&mut self, frame: u32) -> Result<(), BakeError> {
        let unit = self.unit;
        if let Some(token) = self.cancel {
            token.checkpoint().map_err(|_| BakeError::Cancelled {
                part: unit.name.clone(),
                frame,
            })?;
        }

        let time = self.clip.frame_time(frame);
        self.target
            .pose(self.clip, time)
            .map_err(|source| BakeError::Oracle {
                part: unit.name.clone(),
                frame,
                source,
            })?;

        self.scratch.clear();
        for segment in &unit.segments {
            let before = self.scratch.positions.len();
            self.target
                .read_part(segment.part, &mut self.scratch)
                .map_err(|source| BakeError::Oracle {
                    part: segment.name.clone(),
                    frame,
                    source,
                })?;
            let actual = self.scratch.positions.len().max(self.scratch.normals.len()) - before;
            if !self.scratch.is_consistent() || actual != segment.vertex_count as usize {
                return Err(BakeError::VertexCountMismatch {
                    part: segment.name.clone(),
                    frame,
                    expected: segment.vertex_count as usize,
                    actual,
                });
            }
        }
        Ok(())
    }
}
