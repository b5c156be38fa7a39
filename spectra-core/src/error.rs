//! Error types shared by every component of the crate

use thiserror::Error;

/// Errors surfaced by transform construction and execution
///
/// All of these are programming or configuration errors: they are reported
/// synchronously at the offending call, nothing is retried, and no partial
/// result is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpectrumError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("working length {0} is not a power of two; use the direct transform or pad the input")]
    UnsupportedLength(usize),

    #[error("unknown window function '{0}'")]
    UnsupportedWindow(String),

    #[error("non-finite value at index {0}")]
    NumericDomain(usize),

    #[error("need at least {needed} samples for one frame, got {actual}")]
    InsufficientSamples { needed: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, SpectrumError>;
