//! Configuration of Q-learning agent.
use anyhow::Result;
use crest_core::error::CrestError;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Constructs [`QLearning`](super::QLearning).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct QLearningConfig {
    /// The number of bins of each observation dimension.
    pub n_bins: Vec<usize>,

    /// Discount factor of future rewards.
    pub discount_factor: f64,

    /// Seed of the random number generator used for exploration.
    pub seed: u64,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            n_bins: vec![50, 50],
            discount_factor: 0.99,
            seed: 42,
        }
    }
}

impl QLearningConfig {
    /// Sets the number of bins of each observation dimension.
    pub fn n_bins(mut self, v: Vec<usize>) -> Self {
        self.n_bins = v;
        self
    }

    /// Discount factor.
    pub fn discount_factor(mut self, v: f64) -> Self {
        self.discount_factor = v;
        self
    }

    /// Random seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Checks the discount factor. Bin counts are checked by the discretizer.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(CrestError::InvalidConfig(format!(
                "discount_factor must be in [0, 1], got {}",
                self.discount_factor
            ))
            .into());
        }
        Ok(())
    }

    /// Loads [`QLearningConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ = path.as_ref().to_owned();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        info!("Load config of Q-learning agent from {:?}", path_);
        Ok(b)
    }

    /// Saves [`QLearningConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path_ = path.as_ref().to_owned();
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        info!("Save config of Q-learning agent into {:?}", path_);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_serde_qlearning_config() -> Result<()> {
        let config = QLearningConfig::default().n_bins(vec![20, 30]).seed(7);
        let dir = TempDir::new("qlearning_config")?;
        let path = dir.path().join("agent.yaml");
        config.save(&path)?;

        let yaml = std::fs::read_to_string(&path)?;
        assert!(yaml.contains("discount_factor"));
        assert!(!yaml.contains("explorer"));
        assert_eq!(QLearningConfig::load(&path)?, config);
        Ok(())
    }
}
