//! The aggregator converting single-step transitions into n-step transitions.
use super::NStepConfig;
use crate::{
    error::TrdError, replay_store::TransitionBatch, BatchData, ExperienceStoreBase,
    ReplayStoreBase,
};
use anyhow::Result;
use log::trace;
use std::collections::VecDeque;

/// Converts a stream of single-step transitions into n-step transitions and
/// pushes them into an experience store.
///
/// The aggregator keeps a pending window of up to `n_step` `(obs, act)`
/// pairs together with a reward accumulator of `n_step` slots, slot `k`
/// holding the reward observed `k` steps after the oldest pending entry.
/// While the window is filling nothing is emitted. Once it is full, every
/// call emits the oldest pending entry with the discounted sum
/// `sum_k rewards[k] * gamma^k` and slides the window by one.
///
/// Episode boundaries are handled as follows:
///
/// * **Termination** flushes every pending entry, oldest first, each with
///   the discounted sum of the rewards observed after it (fewer than
///   `n_step` terms, as no further reward exists past the boundary), the
///   final next-observation and a set termination flag. The window and
///   accumulator are then cleared.
/// * **Truncation with a full window** emits only the oldest entry, with a
///   set truncation flag, then clears the window; the other pending entries
///   are dropped without emission. A truncation that arrives while the
///   window is still filling leaves the window untouched.
///
/// One aggregator instance serves one data-collection loop; a fresh
/// collection phase gets a fresh instance wrapping its own store. The
/// aggregator is not safe for concurrent use and expects `add` to be called
/// in step order.
#[derive(Debug)]
pub struct NStepAggregator<O, A, S>
where
    O: BatchData + Clone,
    A: BatchData + Clone,
    S: ExperienceStoreBase<Item = TransitionBatch<O, A>>,
{
    store: S,
    n_step: usize,
    /// Discount weights `gamma^0 .. gamma^(n_step - 1)`.
    discount: Vec<f32>,
    obs: VecDeque<O>,
    act: VecDeque<A>,
    rewards: Vec<f32>,
}

impl<O, A, S> NStepAggregator<O, A, S>
where
    O: BatchData + Clone,
    A: BatchData + Clone,
    S: ExperienceStoreBase<Item = TransitionBatch<O, A>>,
{
    /// Creates an aggregator feeding the given store.
    ///
    /// # Errors
    ///
    /// Fails with [`TrdError::InvalidNStep`] if `config.n_step` is zero and
    /// with [`TrdError::InvalidGamma`] if `config.gamma` lies outside
    /// `[0, 1]`.
    pub fn new(store: S, config: &NStepConfig) -> Result<Self> {
        if config.n_step < 1 {
            return Err(TrdError::InvalidNStep(config.n_step).into());
        }
        if !(0.0..=1.0).contains(&config.gamma) {
            return Err(TrdError::InvalidGamma(config.gamma).into());
        }

        let n_step = config.n_step;
        let discount = (0..n_step).map(|k| config.gamma.powi(k as i32)).collect();

        Ok(Self {
            store,
            n_step,
            discount,
            obs: VecDeque::with_capacity(n_step),
            act: VecDeque::with_capacity(n_step),
            rewards: vec![0.; n_step],
        })
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Discounted sum over the accumulator. Trailing slots of a partially
    /// filled accumulator are zero and do not contribute.
    fn n_step_return(&self) -> f32 {
        self.rewards
            .iter()
            .zip(self.discount.iter())
            .map(|(r, w)| r * w)
            .sum()
    }

    fn reset(&mut self) {
        self.obs.clear();
        self.act.clear();
        for r in self.rewards.iter_mut() {
            *r = 0.;
        }
    }

    /// Adds a single-step transition, pushing zero or more finished n-step
    /// transitions into the store.
    ///
    /// Returns the number of transitions pushed: 0 while the window is
    /// filling, 1 on a full-window slide (truncated or not), and the number
    /// of pending entries on termination.
    pub fn add(
        &mut self,
        obs: O,
        next_obs: O,
        act: A,
        reward: f32,
        is_terminated: bool,
        is_truncated: bool,
    ) -> Result<usize> {
        let fill = self.obs.len();
        if fill == self.n_step {
            // Window already full: retire the oldest reward slot and the
            // oldest pending pair before taking the new step in.
            self.rewards.rotate_left(1);
            self.rewards[self.n_step - 1] = reward;
            self.obs.pop_front();
            self.act.pop_front();
        } else {
            self.rewards[fill] = reward;
        }
        self.obs.push_back(obs);
        self.act.push_back(act);

        if is_terminated {
            let pending = self.obs.len();
            trace!("terminal flush of {} pending transitions", pending);
            for i in 0..pending {
                let n_step_reward = self.n_step_return();
                self.rewards[0] = 0.;
                self.rewards.rotate_left(1);
                self.store.push(TransitionBatch::single(
                    self.obs[i].clone(),
                    self.act[i].clone(),
                    next_obs.clone(),
                    n_step_reward,
                    true,
                    false,
                ))?;
            }
            self.reset();
            Ok(pending)
        } else if self.obs.len() == self.n_step {
            self.store.push(TransitionBatch::single(
                self.obs[0].clone(),
                self.act[0].clone(),
                next_obs,
                self.n_step_return(),
                false,
                is_truncated,
            ))?;
            if is_truncated {
                // Pending entries behind the emitted one are dropped, not
                // flushed. Known asymmetry with the termination path.
                trace!(
                    "truncation reset drops {} pending transitions",
                    self.obs.len() - 1
                );
                self.reset();
            }
            Ok(1)
        } else {
            Ok(0)
        }
    }
}

impl<O, A, S> NStepAggregator<O, A, S>
where
    O: BatchData + Clone,
    A: BatchData + Clone,
    S: ExperienceStoreBase<Item = TransitionBatch<O, A>> + ReplayStoreBase,
{
    /// Samples a batch from the underlying store.
    pub fn sample(&mut self, batch_size: usize) -> Result<S::Batch> {
        self.store.sample(batch_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay_store::VecBatch;

    type Obs = VecBatch<f32>;
    type Act = VecBatch<i64>;

    /// Keeps pushed transitions in order, so emissions can be asserted
    /// one by one.
    #[derive(Debug)]
    struct RecordingStore {
        items: Vec<TransitionBatch<Obs, Act>>,
    }

    impl ExperienceStoreBase for RecordingStore {
        type Item = TransitionBatch<Obs, Act>;

        fn push(&mut self, tr: Self::Item) -> Result<()> {
            self.items.push(tr);
            Ok(())
        }

        fn len(&self) -> usize {
            self.items.len()
        }
    }

    fn aggregator(n_step: usize, gamma: f32) -> NStepAggregator<Obs, Act, RecordingStore> {
        let config = NStepConfig::default().n_step(n_step).gamma(gamma);
        NStepAggregator::new(RecordingStore { items: vec![] }, &config).unwrap()
    }

    /// Step `i` observes `i`, acts `i`, sees `i + 1` next and earns `i + 1`.
    fn step(
        agg: &mut NStepAggregator<Obs, Act, RecordingStore>,
        i: usize,
        is_terminated: bool,
        is_truncated: bool,
    ) -> usize {
        agg.add(
            VecBatch::from_value(i as f32),
            VecBatch::from_value((i + 1) as f32),
            VecBatch::from_value(i as i64),
            (i + 1) as f32,
            is_terminated,
            is_truncated,
        )
        .unwrap()
    }

    fn assert_item(
        item: &TransitionBatch<Obs, Act>,
        obs: f32,
        next_obs: f32,
        reward: f32,
        is_terminated: i8,
        is_truncated: i8,
    ) {
        assert_eq!(item.len(), 1);
        assert_eq!(item.obs.data(), &[obs]);
        assert_eq!(item.next_obs.data(), &[next_obs]);
        assert!((item.reward[0] - reward).abs() < 1e-5);
        assert_eq!(item.is_terminated[0], is_terminated);
        assert_eq!(item.is_truncated[0], is_truncated);
    }

    #[test]
    fn single_step_window_passes_transitions_through() {
        let mut agg = aggregator(1, 0.9);
        for i in 0..5 {
            assert_eq!(step(&mut agg, i, false, false), 1);
        }

        let items = &agg.store().items;
        assert_eq!(items.len(), 5);
        for (i, item) in items.iter().enumerate() {
            assert_item(item, i as f32, (i + 1) as f32, (i + 1) as f32, 0, 0);
        }
    }

    #[test]
    fn emitted_returns_are_discounted_sums() {
        // Rewards 1, 2, 3, ... over a 3-step window with gamma 0.9.
        let mut agg = aggregator(3, 0.9);
        assert_eq!(step(&mut agg, 0, false, false), 0);
        assert_eq!(step(&mut agg, 1, false, false), 0);
        assert_eq!(step(&mut agg, 2, false, false), 1);
        assert_eq!(step(&mut agg, 3, false, false), 1);

        let items = &agg.store().items;
        assert_eq!(items.len(), 2);
        // 1 + 2 * 0.9 + 3 * 0.81
        assert_item(&items[0], 0., 3., 5.23, 0, 0);
        // 2 + 3 * 0.9 + 4 * 0.81
        assert_item(&items[1], 1., 4., 7.94, 0, 0);
    }

    #[test]
    fn termination_flushes_all_pending_entries() {
        let mut agg = aggregator(2, 1.0);
        let emitted: Vec<usize> = (0..6)
            .map(|i| step(&mut agg, i, i == 3, false))
            .collect();
        assert_eq!(emitted, vec![0, 1, 1, 2, 0, 1]);

        let items = &agg.store().items;
        assert_eq!(items.len(), 5);
        assert_item(&items[0], 0., 2., 1. + 2., 0, 0);
        assert_item(&items[1], 1., 3., 2. + 3., 0, 0);
        // Flush at step 3: both entries carry the final next-observation
        // and shrinking reward sums.
        assert_item(&items[2], 2., 4., 3. + 4., 1, 0);
        assert_item(&items[3], 3., 4., 4., 1, 0);
        // Step 4 starts from an empty window, as if freshly constructed.
        assert_item(&items[4], 4., 6., 5. + 6., 0, 0);
    }

    #[test]
    fn termination_before_window_fills_flushes_short_sums() {
        let mut agg = aggregator(5, 1.0);
        assert_eq!(step(&mut agg, 0, false, false), 0);
        assert_eq!(step(&mut agg, 1, true, false), 2);

        let items = &agg.store().items;
        assert_eq!(items.len(), 2);
        assert_item(&items[0], 0., 2., 1. + 2., 1, 0);
        assert_item(&items[1], 1., 2., 2., 1, 0);
    }

    #[test]
    fn truncation_with_full_window_drops_other_pending_entries() {
        let mut agg = aggregator(3, 1.0);
        let emitted: Vec<usize> = (0..5)
            .map(|i| step(&mut agg, i, false, i == 3))
            .collect();
        // The two entries pending behind the one emitted at step 3 are
        // dropped without emission, and step 4 refills from empty.
        assert_eq!(emitted, vec![0, 0, 1, 1, 0]);

        let items = &agg.store().items;
        assert_eq!(items.len(), 2);
        assert_item(&items[0], 0., 3., 1. + 2. + 3., 0, 0);
        assert_item(&items[1], 1., 4., 2. + 3. + 4., 0, 1);
    }

    #[test]
    fn truncation_while_filling_leaves_window_untouched() {
        // Only the full-window branch inspects the truncated flag, so a
        // truncation during fill-up does not reset and the first emission
        // sums rewards from both sides of the boundary.
        let mut agg = aggregator(3, 1.0);
        assert_eq!(step(&mut agg, 0, false, true), 0);
        assert_eq!(step(&mut agg, 1, false, false), 0);
        assert_eq!(step(&mut agg, 2, false, false), 1);

        let items = &agg.store().items;
        assert_eq!(items.len(), 1);
        assert_item(&items[0], 0., 3., 1. + 2. + 3., 0, 0);
    }

    #[test]
    fn unbroken_run_emits_all_but_the_last_pending() {
        let mut agg = aggregator(4, 0.99);
        let total: usize = (0..20).map(|i| step(&mut agg, i, false, false)).sum();
        assert_eq!(total, 20 - 4 + 1);
        assert_eq!(agg.store().len(), 17);
    }

    #[test]
    fn construction_rejects_invalid_configs() {
        let store = || RecordingStore { items: vec![] };

        let err = NStepAggregator::<Obs, Act, _>::new(
            store(),
            &NStepConfig::default().n_step(0),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TrdError>(),
            Some(TrdError::InvalidNStep(0))
        ));

        for gamma in [-0.1, 1.5].iter() {
            let err = NStepAggregator::<Obs, Act, _>::new(
                store(),
                &NStepConfig::default().gamma(*gamma),
            )
            .unwrap_err();
            assert!(matches!(
                err.downcast_ref::<TrdError>(),
                Some(TrdError::InvalidGamma(_))
            ));
        }
    }
}
