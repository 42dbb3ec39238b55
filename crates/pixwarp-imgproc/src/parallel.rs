use rayon::prelude::*;
use thiserror::Error;

use pixwarp_image::{Pixel, PixelAccessorMut};

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls how the destination rows of a transform are scheduled.
///
/// Every strategy produces the same pixels; only throughput differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    AutoRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with at most `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

/// Apply `f(y, row)` to every destination row.
///
/// Rows are handed out as disjoint mutable slices of the destination buffer,
/// so workers never observe each other's pixels and need no synchronization
/// beyond the final join.
///
/// # Errors
///
/// Fails with [`ParallelError::InvalidThreadCount`] for `Fixed(0)` and with
/// [`ParallelError::BuildError`] when the local pool cannot be created. No row
/// has been written when an error is returned.
pub fn par_iter_rows_indexed<P, F>(
    dst: &mut PixelAccessorMut<'_, P>,
    strategy: ExecutionStrategy,
    f: F,
) -> Result<(), ParallelError>
where
    P: Pixel,
    F: Fn(usize, &mut [P]) + Send + Sync,
{
    if let ExecutionStrategy::Fixed(0) = strategy {
        return Err(ParallelError::InvalidThreadCount(0));
    }

    let cols = dst.width();
    if cols == 0 || dst.height() == 0 {
        return Ok(());
    }
    let rows = dst.as_mut_slice();

    match strategy {
        ExecutionStrategy::Serial => {
            rows.chunks_exact_mut(cols)
                .enumerate()
                .for_each(|(y, row)| f(y, row));
        }
        ExecutionStrategy::AutoRows => {
            rows.par_chunks_exact_mut(cols)
                .enumerate()
                .for_each(|(y, row)| f(y, row));
        }
        ExecutionStrategy::Fixed(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                rows.par_chunks_exact_mut(cols)
                    .enumerate()
                    .for_each(|(y, row)| f(y, row));
            });
        }
    }
    Ok(())
}
