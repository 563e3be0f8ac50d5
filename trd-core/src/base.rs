//! Trait seams between the aggregator and experience stores.
mod batch;
mod store;

pub use batch::BatchData;
pub use store::{ExperienceStoreBase, ReplayStoreBase};
