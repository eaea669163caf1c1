//! Error types for the bake pipeline.

use thiserror::Error;

use super::pack::PackError;
use crate::target::OracleError;

/// Errors that abort a bake.
///
/// Every variant names the bake unit (part or merged group) and, where it
/// applies, the frame at which the pipeline stopped, so callers can re-run a
/// targeted bake after fixing the input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BakeError {
    /// The clip cannot be sampled at fixed steps. Raised before any pose.
    #[error("clip '{clip}' cannot be baked: {reason}")]
    InvalidClipConfiguration { clip: String, reason: String },

    /// The target's world transform cannot be inverted for local space.
    #[error("target '{target}' has a degenerate world transform")]
    InvalidTargetTransform { target: String },

    /// The animation oracle failed to pose or read the target.
    #[error("oracle failed for '{part}' at frame {frame}: {source}")]
    Oracle {
        part: String,
        frame: u32,
        source: OracleError,
    },

    /// A part returned a different number of vertices than it declared.
    #[error("'{part}' frame {frame}: expected {expected} vertices, got {actual}")]
    VertexCountMismatch {
        part: String,
        frame: u32,
        expected: usize,
        actual: usize,
    },

    /// Writing a texture row failed.
    #[error("packing '{part}' failed: {source}")]
    Pack { part: String, source: PackError },

    /// The bake was cancelled before `frame` of `part` was sampled.
    #[error("bake cancelled at '{part}' frame {frame}")]
    Cancelled { part: String, frame: u32 },
}

impl BakeError {
    /// Name of the part or group the error refers to, if any.
    pub fn part(&self) -> Option<&str> {
        match self {
            Self::InvalidClipConfiguration { .. } | Self::InvalidTargetTransform { .. } => None,
            Self::Oracle { part, .. }
            | Self::VertexCountMismatch { part, .. }
            | Self::Pack { part, .. }
            | Self::Cancelled { part, .. } => Some(part),
        }
    }

    /// Returns `true` for [`BakeError::Cancelled`].
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}
