#![warn(missing_docs)]
//! Data-collection components for n-step off-policy reinforcement learning.
//!
//! This crate provides the plumbing between an environment-stepping loop and
//! a training loop:
//!
//! * [`NStepAggregator`](n_step::NStepAggregator) converts a stream of
//!   single-step transitions into n-step bootstrapped transitions, handling
//!   episode termination and truncation boundaries.
//! * [`UniformReplayStore`](replay_store::UniformReplayStore) is a
//!   fixed-capacity experience store with uniform random sampling, fed by
//!   the aggregator and sampled by the training loop.
//!
//! The two are decoupled through the [`ExperienceStoreBase`] and
//! [`ReplayStoreBase`] traits, so the aggregator can drive any store that
//! accepts [`TransitionBatch`](replay_store::TransitionBatch) records.
pub mod error;
pub mod n_step;
pub mod replay_store;

mod base;
pub use base::{BatchData, ExperienceStoreBase, ReplayStoreBase};
