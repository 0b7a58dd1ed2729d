//! Single-threaded backend.

use core::num::NonZeroUsize;

use crate::{backend::Backend, error::Result};

/// Runs every unit one after another on the calling thread.
///
/// The backend still reports a worker count, so the blocked scan can be
/// driven through all of its phases without threads. This is what makes
/// block decompositions reproducible in tests and on targets without
/// thread support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SerialBackend {
    workers: NonZeroUsize,
}

impl SerialBackend {
    /// Creates a backend that plans for a single block.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            workers: NonZeroUsize::MIN,
        }
    }

    /// Creates a backend that plans for up to `workers` blocks while still
    /// running them serially. A count of zero is treated as one.
    #[inline]
    #[must_use]
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: NonZeroUsize::new(workers).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl Default for SerialBackend {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for SerialBackend {
    #[inline]
    fn workers(&self) -> usize {
        self.workers.get()
    }

    fn run_blocks<I, R, F>(&self, units: Vec<I>, work: F) -> Result<Vec<R>>
    where
        I: Send,
        R: Send,
        F: Fn(I) -> Result<R> + Sync + Send,
    {
        units.into_iter().map(work).collect()
    }
}
