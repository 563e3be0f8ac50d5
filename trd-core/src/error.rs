//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug)]
pub enum TrdError {
    /// The bootstrap window must contain at least one step.
    #[error("n_step must be at least 1, got {0}")]
    InvalidNStep(usize),

    /// The discount factor must lie in `[0, 1]`.
    #[error("gamma must be in [0, 1], got {0}")]
    InvalidGamma(f32),

    /// Sampling was requested before any transition was stored.
    #[error("cannot sample from an empty store")]
    EmptyStore,
}
