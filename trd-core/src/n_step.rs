//! N-step transition aggregation.
//!
//! [`NStepAggregator`] sits between the environment-stepping loop and an
//! experience store. It consumes single-step transitions and emits n-step
//! bootstrapped transitions, where the reward of an emitted transition is
//! the discounted sum of the `n_step` rewards following it:
//!
//! ```text
//! R_t = r_t + gamma * r_{t+1} + ... + gamma^{n_step-1} * r_{t+n_step-1}
//! ```
//!
//! Episode boundaries shorten or cut this sum: termination flushes every
//! pending transition with the rewards observed so far, truncation ends the
//! accumulation without a bootstrap target. See
//! [`NStepAggregator::add`] for the exact boundary handling.
mod aggregator;
mod config;

pub use aggregator::NStepAggregator;
pub use config::NStepConfig;
