//! Configuration of the n-step aggregator.
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`NStepAggregator`](super::NStepAggregator).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct NStepConfig {
    /// Width of the bootstrap window. Must be at least 1; a width of 1
    /// emits every single-step transition unmodified, with no delay.
    pub n_step: usize,

    /// Per-step discount factor applied to future rewards. Must lie in
    /// `[0, 1]`.
    pub gamma: f32,
}

impl Default for NStepConfig {
    fn default() -> Self {
        Self {
            n_step: 1,
            gamma: 0.99,
        }
    }
}

impl NStepConfig {
    /// Sets the width of the bootstrap window.
    pub fn n_step(mut self, n_step: usize) -> Self {
        self.n_step = n_step;
        self
    }

    /// Sets the discount factor.
    pub fn gamma(mut self, gamma: f32) -> Self {
        self.gamma = gamma;
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
