//! Interfaces of experience stores.
use anyhow::Result;

/// Interface for stores that accept finished transitions.
///
/// This is the insertion side of an experience store, used by the
/// data-collection loop (through the aggregator). It says nothing about how
/// batches are produced for training; that is the concern of
/// [`ReplayStoreBase`].
pub trait ExperienceStoreBase {
    /// The type of items stored.
    type Item;

    /// Pushes an item into the store.
    fn push(&mut self, tr: Self::Item) -> Result<()>;

    /// Returns the current number of stored transitions.
    fn len(&self) -> usize;
}

/// Interface for stores that produce batches for training.
pub trait ReplayStoreBase {
    /// Configuration of the store.
    type Config: Clone;

    /// The type of batches produced for training.
    type Batch;

    /// Builds a store from the given configuration.
    fn build(config: &Self::Config) -> Self;

    /// Samples a batch of `batch_size` transitions from the store.
    fn sample(&mut self, batch_size: usize) -> Result<Self::Batch>;
}
