use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

/// Error returned when a bake is cancelled at a checkpoint.
///
/// Long-running loops call [`CancellationToken::checkpoint`] between units
/// of work and propagate this error with `?` to stop early.
///
/// # Example
///
/// ```ignore
/// for frame in 0..frame_count {
///     token.checkpoint()?;
///     sample(frame);
/// }
/// ```
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("bake cancelled")]
pub struct Cancelled;

/// Token that signals cancellation to cooperative loops.
///
/// Clones share one flag: cancelling through any handle is observed by all
/// of them, so a bake running on a worker thread can be stopped from the
/// thread that started it.
#[derive(Clone)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// A token that has not been cancelled yet.
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Signals cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// `true` once any handle called [`cancel`](Self::cancel).
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Returns `Err(Cancelled)` once cancellation has been signalled.
    pub fn checkpoint(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
