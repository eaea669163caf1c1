//! Error types for texture access.

use thiserror::Error;

/// Errors that can occur when reading or writing texels.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextureError {
    /// A texel coordinate lies outside the declared dimensions.
    #[error("texel ({x}, {y}) is outside the {width}x{height} texture")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    /// A raw buffer does not match the declared dimensions and format.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}
