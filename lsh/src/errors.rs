//! Error definitions.
use std::result;

use thiserror::Error;

/// A specialized Result type for this library.
pub type Result<T, E = LshError> = result::Result<T, E>;

/// Errors in this library.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LshError {
    /// The input argument is invalid.
    #[error("InputError: {0}")]
    Input(String),
}

impl LshError {
    pub(crate) fn input<S: Into<String>>(msg: S) -> Self {
        Self::Input(msg.into())
    }
}
