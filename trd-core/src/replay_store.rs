//! Fixed-capacity experience store with uniform random sampling.
//!
//! [`UniformReplayStore`] keeps the most recent `capacity` transitions in
//! columnar storage, overwriting the oldest entries once full, and samples
//! uniformly at random with a seeded generator. Transitions enter and leave
//! the store as [`TransitionBatch`] records; observation and action columns
//! are generic over [`BatchData`](crate::BatchData), with [`VecBatch`]
//! provided for callers without a tensor backend.
mod base;
mod batch;
mod config;
mod vec_batch;

pub use base::UniformReplayStore;
pub use batch::TransitionBatch;
pub use config::ReplayStoreConfig;
pub use vec_batch::VecBatch;
