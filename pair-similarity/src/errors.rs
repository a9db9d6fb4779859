//! Error definitions.
use std::result;

use lsh::LshError;
use rayon::ThreadPoolBuildError;
use thiserror::Error;

use crate::executor::Stage;

/// A specialized Result type for this library.
pub type Result<T, E = SimilarityError> = result::Result<T, E>;

/// Errors in this library.
#[derive(Debug, Error)]
pub enum SimilarityError {
    /// The input argument or configuration is invalid.
    #[error("InputError: {0}")]
    Input(String),

    /// A signature or band generator rejected its parameters.
    #[error(transparent)]
    Lsh(#[from] LshError),

    /// A task of a pipeline stage failed; the comparison produced no score.
    #[error("TaskError: {stage} stage failed: {cause}")]
    Task {
        /// Stage whose task failed.
        stage: Stage,
        /// Panic message of the failed task.
        cause: String,
    },

    /// The call-local worker pool could not be started.
    #[error("PoolError: {0}")]
    Pool(#[from] ThreadPoolBuildError),
}

impl SimilarityError {
    pub(crate) fn input<S: Into<String>>(msg: S) -> Self {
        Self::Input(msg.into())
    }
}
