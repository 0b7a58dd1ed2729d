//! Execution backends for the blocked scan.
//!
//! This module provides the [`Backend`] trait, the single capability the
//! blocked scan needs from whatever executes it: run a batch of
//! independent units of work and wait for all of them.
//!
//! The default backend is [`pool::RayonBackend`] and can be swapped for
//! [`serial::SerialBackend`] by disabling the `rayon` crate feature.

pub mod serial;

#[cfg(feature = "rayon")]
pub mod pool;

use crate::error::Result;

/// A trait that defines the parallel-for-with-barrier contract every
/// backend must fulfill.
///
/// A backend runs each unit of a batch exactly once, in any order and on
/// any worker, and returns only when every unit has finished. Results come
/// back in the order the units were given, so the caller can index them by
/// block number. Units never share mutable state with each other; anything
/// a unit writes is carried inside the unit itself (typically a disjoint
/// `&mut` sub-slice).
///
/// The first failure aborts the batch as soon as the backend notices it.
/// Units that already ran keep their side effects.
pub trait Backend: Sync {
    /// Returns how many units the backend can run at the same time.
    ///
    /// The blocked scan never creates more blocks than this.
    fn workers(&self) -> usize;

    /// Runs `work` once for every unit and waits for all of them.
    ///
    /// # Errors
    ///
    /// Returns the error of a failing unit. When several units fail
    /// concurrently, which of their errors is returned is unspecified.
    fn run_blocks<I, R, F>(&self, units: Vec<I>, work: F) -> Result<Vec<R>>
    where
        I: Send,
        R: Send,
        F: Fn(I) -> Result<R> + Sync + Send;

    /// Runs a single unit of work on the calling thread.
    ///
    /// # Errors
    ///
    /// Returns whatever `work` returns.
    #[inline]
    fn run_single<R, F>(&self, work: F) -> Result<R>
    where
        F: FnOnce() -> Result<R>,
    {
        work()
    }
}

impl<B> Backend for &B
where
    B: Backend,
{
    #[inline]
    fn workers(&self) -> usize {
        (**self).workers()
    }

    #[inline]
    fn run_blocks<I, R, F>(&self, units: Vec<I>, work: F) -> Result<Vec<R>>
    where
        I: Send,
        R: Send,
        F: Fn(I) -> Result<R> + Sync + Send,
    {
        (**self).run_blocks(units, work)
    }

    #[inline]
    fn run_single<R, F>(&self, work: F) -> Result<R>
    where
        F: FnOnce() -> Result<R>,
    {
        (**self).run_single(work)
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        /// Dynamically configured type alias for the selected backend, based
        /// on crate feature flags.
        pub type SelectedBackend = pool::RayonBackend;
    } else {
        /// Dynamically configured type alias for the selected backend, based
        /// on crate feature flags.
        pub type SelectedBackend = serial::SerialBackend;
    }
}
