//! Sampler types for baked textures.
//!
//! Provides [`TextureSampler`] for describing how the runtime samples a
//! vertex animation texture, along with the [`FilterMode`] and
//! [`AddressMode`] enums.

mod types;

pub use types::{AddressMode, FilterMode, TextureSampler};
