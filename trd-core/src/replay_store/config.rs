//! Configuration of the experience store.
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`UniformReplayStore`](super::UniformReplayStore).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ReplayStoreConfig {
    /// Maximum number of transitions that can be stored. When the store is
    /// full, new transitions replace the oldest ones.
    pub capacity: usize,

    /// Seed of the random number generator used for sampling.
    pub seed: u64,
}

impl Default for ReplayStoreConfig {
    fn default() -> Self {
        Self {
            capacity: 10000,
            seed: 42,
        }
    }
}

impl ReplayStoreConfig {
    /// Sets the capacity of the store.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the random seed for sampling.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Loads the configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves the configuration to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
