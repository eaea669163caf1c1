//! CPU-side texture types.
//!
//! Provides [`CpuTexture`] for holding raw pixel data along with the
//! [`TextureFormat`] used to encode baked vectors.

mod error;
mod types;

pub use error::TextureError;
pub use types::{CpuTexture, TextureFormat};
