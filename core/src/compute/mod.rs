//! Cooperative cancellation for long-running bakes.
//!
//! - [`CancellationToken`] - Shared flag checked between frames
//! - [`Cancelled`] - Error returned by a checkpoint after cancellation

mod cancellation;

pub use cancellation::{CancellationToken, Cancelled};
