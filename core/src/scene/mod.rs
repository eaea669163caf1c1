//! Transform types for animated targets and their bones.
//!
//! - [`NodeTransform`] - TRS transform using plain arrays

mod types;

pub use types::NodeTransform;
