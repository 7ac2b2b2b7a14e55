//! Configuration of [`MountainCarEnv`](crate::MountainCarEnv).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`MountainCarEnv`](crate::MountainCarEnv).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct MountainCarConfig {
    /// Episodes are truncated after this number of steps.
    pub max_episode_steps: usize,

    /// The car has to reach the goal with at least this velocity.
    pub goal_velocity: f64,
}

impl Default for MountainCarConfig {
    fn default() -> Self {
        Self {
            max_episode_steps: 200,
            goal_velocity: 0.0,
        }
    }
}

impl MountainCarConfig {
    /// Sets the number of steps after which episodes are truncated.
    pub fn max_episode_steps(mut self, v: usize) -> Self {
        self.max_episode_steps = v;
        self
    }

    /// Sets the goal velocity.
    pub fn goal_velocity(mut self, v: f64) -> Self {
        self.goal_velocity = v;
        self
    }

    /// Loads [`MountainCarConfig`] from YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`MountainCarConfig`] as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
