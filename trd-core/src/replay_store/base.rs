//! A fixed-capacity store with uniform random sampling.
use super::{ReplayStoreConfig, TransitionBatch};
use crate::{error::TrdError, BatchData, ExperienceStoreBase, ReplayStoreBase};
use anyhow::Result;
use rand::{rngs::StdRng, RngCore, SeedableRng};

/// A fixed-capacity experience store with uniform random sampling.
///
/// Transitions are written at a rotating index, overwriting the oldest
/// entries once the store is full. Sampling draws indices uniformly at
/// random from the currently-stored entries with a seeded generator, so a
/// given seed reproduces the same sample sequence.
///
/// # Type parameters
///
/// * `O` - The observation column type, must implement [`BatchData`]
/// * `A` - The action column type, must implement [`BatchData`]
pub struct UniformReplayStore<O, A>
where
    O: BatchData,
    A: BatchData,
{
    capacity: usize,
    i: usize,
    size: usize,
    obs: O,
    act: A,
    next_obs: O,
    reward: Vec<f32>,
    is_terminated: Vec<i8>,
    is_truncated: Vec<i8>,
    rng: StdRng,
}

impl<O, A> UniformReplayStore<O, A>
where
    O: BatchData,
    A: BatchData,
{
    #[inline]
    fn push_reward(&mut self, i: usize, b: &Vec<f32>) {
        let mut j = i;
        for r in b.iter() {
            self.reward[j] = *r;
            j += 1;
            if j == self.capacity {
                j = 0;
            }
        }
    }

    #[inline]
    fn push_is_terminated(&mut self, i: usize, b: &Vec<i8>) {
        let mut j = i;
        for d in b.iter() {
            self.is_terminated[j] = *d;
            j += 1;
            if j == self.capacity {
                j = 0;
            }
        }
    }

    fn push_is_truncated(&mut self, i: usize, b: &Vec<i8>) {
        let mut j = i;
        for d in b.iter() {
            self.is_truncated[j] = *d;
            j += 1;
            if j == self.capacity {
                j = 0;
            }
        }
    }

    fn sample_reward(&self, ixs: &Vec<usize>) -> Vec<f32> {
        ixs.iter().map(|ix| self.reward[*ix]).collect()
    }

    fn sample_is_terminated(&self, ixs: &Vec<usize>) -> Vec<i8> {
        ixs.iter().map(|ix| self.is_terminated[*ix]).collect()
    }

    fn sample_is_truncated(&self, ixs: &Vec<usize>) -> Vec<i8> {
        ixs.iter().map(|ix| self.is_truncated[*ix]).collect()
    }

    /// Returns the maximum number of transitions the store can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of stored transitions flagged as terminated.
    pub fn num_terminated_flags(&self) -> usize {
        self.is_terminated
            .iter()
            .map(|is_terminated| *is_terminated as usize)
            .sum()
    }

    /// Returns the number of stored transitions flagged as truncated.
    pub fn num_truncated_flags(&self) -> usize {
        self.is_truncated
            .iter()
            .map(|is_truncated| *is_truncated as usize)
            .sum()
    }

    /// Returns the sum of all stored rewards.
    pub fn sum_rewards(&self) -> f32 {
        self.reward.iter().sum()
    }
}

impl<O, A> ExperienceStoreBase for UniformReplayStore<O, A>
where
    O: BatchData,
    A: BatchData,
{
    type Item = TransitionBatch<O, A>;

    /// Inserts the rows of `tr` starting at the current write index,
    /// wrapping modulo the capacity and overwriting the oldest entries.
    fn push(&mut self, tr: Self::Item) -> Result<()> {
        let len = tr.len();
        let (obs, act, next_obs, reward, is_terminated, is_truncated) = tr.unpack();
        self.obs.push(self.i, obs);
        self.act.push(self.i, act);
        self.next_obs.push(self.i, next_obs);
        self.push_reward(self.i, &reward);
        self.push_is_terminated(self.i, &is_terminated);
        self.push_is_truncated(self.i, &is_truncated);

        self.i = (self.i + len) % self.capacity;
        self.size += len;
        if self.size >= self.capacity {
            self.size = self.capacity;
        }

        Ok(())
    }

    fn len(&self) -> usize {
        self.size
    }
}

impl<O, A> ReplayStoreBase for UniformReplayStore<O, A>
where
    O: BatchData,
    A: BatchData,
{
    type Config = ReplayStoreConfig;
    type Batch = TransitionBatch<O, A>;

    fn build(config: &Self::Config) -> Self {
        let capacity = config.capacity;

        Self {
            capacity,
            i: 0,
            size: 0,
            obs: O::new(capacity),
            act: A::new(capacity),
            next_obs: O::new(capacity),
            reward: vec![0.; capacity],
            is_terminated: vec![0; capacity],
            is_truncated: vec![0; capacity],
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    /// Draws `batch_size` indices uniformly at random, independently of each
    /// other and of previous calls.
    fn sample(&mut self, batch_size: usize) -> Result<Self::Batch> {
        if self.size == 0 {
            return Err(TrdError::EmptyStore.into());
        }

        let ixs = (0..batch_size)
            .map(|_| (self.rng.next_u32() as usize) % self.size)
            .collect::<Vec<_>>();

        Ok(Self::Batch {
            obs: self.obs.sample(&ixs),
            act: self.act.sample(&ixs),
            next_obs: self.next_obs.sample(&ixs),
            reward: self.sample_reward(&ixs),
            is_terminated: self.sample_is_terminated(&ixs),
            is_truncated: self.sample_is_truncated(&ixs),
        })
    }
}
