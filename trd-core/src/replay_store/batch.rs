//! Transition records stored in and sampled from the store.
use crate::BatchData;

/// A set of transitions in columnar form.
///
/// The aggregator emits single-row batches; [`sample`] returns batches of
/// `batch_size` rows. Both boundary flags are kept per transition: a
/// terminal flush sets `is_terminated`, a truncation boundary sets
/// `is_truncated` on the one transition emitted at that boundary.
///
/// [`sample`]: crate::ReplayStoreBase::sample
#[derive(Debug)]
pub struct TransitionBatch<O, A>
where
    O: BatchData,
    A: BatchData,
{
    /// Observations the agent acted on.
    pub obs: O,

    /// Actions taken.
    pub act: A,

    /// Observations used as bootstrap targets.
    pub next_obs: O,

    /// N-step discounted returns.
    pub reward: Vec<f32>,

    /// Episode termination flags.
    pub is_terminated: Vec<i8>,

    /// Episode truncation flags.
    pub is_truncated: Vec<i8>,
}

impl<O, A> TransitionBatch<O, A>
where
    O: BatchData,
    A: BatchData,
{
    /// Creates a batch holding a single transition.
    pub fn single(
        obs: O,
        act: A,
        next_obs: O,
        reward: f32,
        is_terminated: bool,
        is_truncated: bool,
    ) -> Self {
        Self {
            obs,
            act,
            next_obs,
            reward: vec![reward],
            is_terminated: vec![is_terminated as i8],
            is_truncated: vec![is_truncated as i8],
        }
    }

    /// Returns the number of transitions in the batch.
    pub fn len(&self) -> usize {
        self.reward.len()
    }

    /// Returns `true` if the batch holds no transitions.
    pub fn is_empty(&self) -> bool {
        self.reward.is_empty()
    }

    /// Decomposes the batch into
    /// `(obs, act, next_obs, reward, is_terminated, is_truncated)`.
    pub fn unpack(self) -> (O, A, O, Vec<f32>, Vec<i8>, Vec<i8>) {
        (
            self.obs,
            self.act,
            self.next_obs,
            self.reward,
            self.is_terminated,
            self.is_truncated,
        )
    }
}
