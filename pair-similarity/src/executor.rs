//! Parallel execution of pipeline stages on a worker pool.
//!
//! Every stage runs one task per input and acts as a barrier: [`Executor::both`]
//! returns only after both tasks have finished.
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::errors::{Result, SimilarityError};

/// Pipeline stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Shingle extraction.
    Shingle,
    /// Signature computation.
    Signature,
    /// Band computation.
    Band,
    /// Exact Jaccard computation of LSH candidate pairs.
    Exact,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Shingle => "shingle",
            Self::Signature => "signature",
            Self::Band => "band",
            Self::Exact => "exact",
        })
    }
}

/// Handle to the worker pool of one comparison.
#[derive(Clone, Copy)]
pub struct Executor<'p> {
    pool: &'p ThreadPool,
}

impl<'p> Executor<'p> {
    /// Wraps a worker pool.
    pub const fn new(pool: &'p ThreadPool) -> Self {
        Self { pool }
    }

    /// Runs `f` on the pool and waits for it.
    pub fn run<A, F>(&self, stage: Stage, f: F) -> Result<A>
    where
        A: Send,
        F: FnOnce() -> A + Send,
    {
        tracing::trace!(%stage, "stage_start");
        self.pool
            .install(|| panic::catch_unwind(AssertUnwindSafe(f)))
            .map_err(|cause| task_error(stage, cause.as_ref()))
    }

    /// Runs `fa` and `fb` in parallel and waits for both.
    ///
    /// A panicking task fails the whole stage with [`SimilarityError::Task`],
    /// after the other task has finished.
    pub fn both<A, B, FA, FB>(&self, stage: Stage, fa: FA, fb: FB) -> Result<(A, B)>
    where
        A: Send,
        B: Send,
        FA: FnOnce() -> A + Send,
        FB: FnOnce() -> B + Send,
    {
        tracing::trace!(%stage, threads = self.pool.current_num_threads(), "stage_start");
        let (ra, rb) = self.pool.install(|| {
            rayon::join(
                || panic::catch_unwind(AssertUnwindSafe(fa)),
                || panic::catch_unwind(AssertUnwindSafe(fb)),
            )
        });
        match (ra, rb) {
            (Ok(a), Ok(b)) => {
                tracing::trace!(%stage, "stage_done");
                Ok((a, b))
            }
            (Err(cause), _) | (_, Err(cause)) => Err(task_error(stage, cause.as_ref())),
        }
    }
}

/// Runs `f` with an executor on `pool`, or on a pool created for this call.
///
/// A created pool has `worker_threads` threads, all of which are joined before
/// this function returns, whether `f` succeeds, fails or panics.
pub fn with_executor<R, F>(pool: Option<&ThreadPool>, worker_threads: usize, f: F) -> Result<R>
where
    F: FnOnce(Executor<'_>) -> Result<R>,
{
    if let Some(pool) = pool {
        return f(Executor::new(pool));
    }
    tracing::debug!(worker_threads, "pool_create");
    let result = ThreadPoolBuilder::new()
        .num_threads(worker_threads)
        .thread_name(|i| format!("pair-similarity-{i}"))
        .build_scoped(|thread| thread.run(), |pool| f(Executor::new(pool)));
    tracing::debug!(ok = result.is_ok(), "pool_teardown");
    result?
}

fn task_error(stage: Stage, payload: &(dyn Any + Send)) -> SimilarityError {
    let cause = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    };
    tracing::debug!(%stage, %cause, "stage_failure");
    SimilarityError::Task { stage, cause }
}
