//! [`rayon`] crate backend.

use std::sync::Arc;

use rayon::{
    ThreadPool, ThreadPoolBuilder,
    iter::{IntoParallelIterator, ParallelIterator},
};

use crate::{backend::Backend, error::Result};

/// Runs units on a rayon thread pool.
///
/// By default the global pool is used, which sizes itself from
/// `RAYON_NUM_THREADS` or the number of logical CPUs. A dedicated pool can
/// be requested with [`RayonBackend::with_threads()`]; clones share it.
#[derive(Debug, Clone, Default)]
pub struct RayonBackend {
    pool: Option<Arc<ThreadPool>>,
}

impl RayonBackend {
    /// Creates a backend on the global rayon pool.
    #[inline]
    #[must_use]
    pub const fn global() -> Self {
        Self { pool: None }
    }

    /// Creates a backend on a dedicated pool of `threads` workers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ThreadPool`](crate::Error::ThreadPool) if the
    /// operating system refuses to spawn the worker threads.
    pub fn with_threads(threads: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("blockscan-{index}"))
            .build()?;
        log::debug!(
            "built dedicated scan pool with {} threads",
            pool.current_num_threads()
        );

        Ok(Self {
            pool: Some(Arc::new(pool)),
        })
    }
}

impl Backend for RayonBackend {
    #[inline]
    fn workers(&self) -> usize {
        self.pool.as_ref().map_or_else(
            rayon::current_num_threads,
            |pool| pool.current_num_threads(),
        )
    }

    fn run_blocks<I, R, F>(&self, units: Vec<I>, work: F) -> Result<Vec<R>>
    where
        I: Send,
        R: Send,
        F: Fn(I) -> Result<R> + Sync + Send,
    {
        let run =
            move || units.into_par_iter().map(work).collect::<Result<Vec<R>>>();
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use crate::{
        backend::{Backend, pool::RayonBackend},
        error::Error,
    };

    #[test]
    fn dedicated_pool_reports_its_size() {
        let backend = RayonBackend::with_threads(3).unwrap();

        assert_eq!(backend.workers(), 3);
    }

    #[test]
    fn global_pool_has_workers() {
        assert!(RayonBackend::global().workers() >= 1);
    }

    #[test]
    fn results_keep_unit_order() {
        let backend = RayonBackend::with_threads(4).unwrap();
        let units: Vec<usize> = (0..64).collect();

        let results = backend.run_blocks(units, |unit| Ok(unit * 2)).unwrap();

        assert_eq!(results, (0..64).map(|unit| unit * 2).collect::<Vec<_>>());
    }

    #[test]
    fn every_unit_runs_exactly_once() {
        let backend = RayonBackend::with_threads(4).unwrap();
        let seen = Mutex::new(Vec::new());

        let _ = backend
            .run_blocks((0..16).collect(), |unit: usize| {
                seen.lock().unwrap().push(unit);
                Ok(())
            })
            .unwrap();

        let mut seen = seen.into_inner().unwrap();
        seen.sort_unstable();
        assert_eq!(seen, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn failure_is_propagated() {
        let backend = RayonBackend::global();

        let result = backend.run_blocks(vec![1, 2, 3], |unit: i32| {
            if unit == 2 {
                Err(Error::Overflow { operator: "test" })
            } else {
                Ok(unit)
            }
        });

        assert!(matches!(result, Err(Error::Overflow { operator: "test" })));
    }

    #[test]
    fn units_write_disjoint_slices_concurrently() {
        let backend = RayonBackend::with_threads(2).unwrap();
        let mut data = vec![0_u64; 1000];
        let units: Vec<_> = data.chunks_mut(100).enumerate().collect();

        let _ = backend
            .run_blocks(units, |(index, chunk)| {
                chunk.fill(index as u64);
                Ok(())
            })
            .unwrap();

        assert!(
            data.chunks(100)
                .enumerate()
                .all(|(index, chunk)| chunk.iter().all(|&v| v == index as u64))
        );
    }
}
