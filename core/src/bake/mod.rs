//! The baking pipeline.
//!
//! - [`FrameSampler`] - poses the target at fixed steps, one frame at a time
//! - [`plan_units`] / [`SpaceTransform`] - groups parts and converts spaces
//! - [`TexturePacker`] - streams rows into a vertex animation texture
//! - [`bake`] - runs the pipeline over every part of a target

mod baker;
mod channel;
mod error;
mod extract;
mod pack;
mod result;
mod sampler;
mod settings;

#[cfg(test)]
pub(crate) mod testing;

pub use baker::{bake, bake_with_cancellation};
pub use channel::{BakedChannel, VertexAttribute};
pub use error::BakeError;
pub use extract::{BakeUnit, PartSegment, SpaceTransform, extract_channel, plan_units};
pub use pack::{PackError, TexturePacker, pack_channel};
pub use result::{BakeResult, BakedPart};
pub use sampler::{FrameSampler, validate_clip};
pub use settings::{BakeSettings, CoordinateSpace, DimensionPolicy, PackStrategy};
