//! Configuration of [`Trainer`](super::Trainer).
use crate::error::CrestError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Schedules of the exploration rate and the learning rate.
///
/// Both rates start at their initial value and decay geometrically once per
/// episode down to their floor: `x <- max(x_min, x * x_decay)`.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ExplorationConfig {
    /// Initial exploration rate.
    pub epsilon_start: f64,

    /// Floor of the exploration rate.
    pub epsilon_min: f64,

    /// Per-episode decay factor of the exploration rate.
    pub epsilon_decay: f64,

    /// Initial learning rate.
    pub lr_start: f64,

    /// Floor of the learning rate.
    pub lr_min: f64,

    /// Per-episode decay factor of the learning rate.
    pub lr_decay: f64,
}

impl Default for ExplorationConfig {
    fn default() -> Self {
        Self {
            epsilon_start: 1.0,
            epsilon_min: 0.01,
            epsilon_decay: 0.995,
            lr_start: 0.1,
            lr_min: 0.01,
            lr_decay: 0.995,
        }
    }
}

fn check(cond: bool, msg: impl Into<String>) -> Result<()> {
    match cond {
        true => Ok(()),
        false => Err(CrestError::InvalidConfig(msg.into()).into()),
    }
}

impl ExplorationConfig {
    /// Sets the initial exploration rate.
    pub fn epsilon_start(mut self, v: f64) -> Self {
        self.epsilon_start = v;
        self
    }

    /// Sets the floor of the exploration rate.
    pub fn epsilon_min(mut self, v: f64) -> Self {
        self.epsilon_min = v;
        self
    }

    /// Sets the decay factor of the exploration rate.
    pub fn epsilon_decay(mut self, v: f64) -> Self {
        self.epsilon_decay = v;
        self
    }

    /// Sets the initial learning rate.
    pub fn lr_start(mut self, v: f64) -> Self {
        self.lr_start = v;
        self
    }

    /// Sets the floor of the learning rate.
    pub fn lr_min(mut self, v: f64) -> Self {
        self.lr_min = v;
        self
    }

    /// Sets the decay factor of the learning rate.
    pub fn lr_decay(mut self, v: f64) -> Self {
        self.lr_decay = v;
        self
    }

    /// Checks the ranges of the parameters.
    ///
    /// Out-of-range values are rejected, never clamped.
    pub fn validate(&self) -> Result<()> {
        let unit = 0.0..=1.0;
        check(
            unit.contains(&self.epsilon_start) && unit.contains(&self.epsilon_min),
            format!(
                "epsilon must be in [0, 1], got start {} and min {}",
                self.epsilon_start, self.epsilon_min
            ),
        )?;
        check(
            self.epsilon_min <= self.epsilon_start,
            "epsilon_min must not exceed epsilon_start",
        )?;
        check(
            self.epsilon_decay > 0.0 && self.epsilon_decay <= 1.0,
            format!("epsilon_decay must be in (0, 1], got {}", self.epsilon_decay),
        )?;
        check(
            self.lr_start > 0.0 && self.lr_start <= 1.0,
            format!("lr_start must be in (0, 1], got {}", self.lr_start),
        )?;
        check(
            self.lr_min >= 0.0 && self.lr_min <= self.lr_start,
            format!("lr_min must be in [0, lr_start], got {}", self.lr_min),
        )?;
        check(
            self.lr_decay > 0.0 && self.lr_decay <= 1.0,
            format!("lr_decay must be in (0, 1], got {}", self.lr_decay),
        )
    }
}

/// Configuration of [`Trainer`](super::Trainer).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TrainerConfig {
    /// The number of training episodes.
    pub n_episodes: usize,

    /// The maximum number of steps in an episode, regardless of termination.
    pub max_steps_per_episode: usize,

    /// Schedules of the exploration rate and the learning rate.
    pub exploration: ExplorationConfig,

    /// Interval of logging progress and flushing records in episodes.
    pub record_interval: usize,

    /// Interval of recording information of the agent in optimization steps.
    pub record_agent_info_interval: usize,

    /// Where to save the trained model and training metrics.
    pub model_dir: Option<String>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            n_episodes: 200_000,
            max_steps_per_episode: 200,
            exploration: ExplorationConfig::default(),
            record_interval: 10_000,
            record_agent_info_interval: 1_000,
            model_dir: None,
        }
    }
}

impl TrainerConfig {
    /// Sets the number of training episodes.
    pub fn n_episodes(mut self, v: usize) -> Self {
        self.n_episodes = v;
        self
    }

    /// Sets the maximum number of steps in an episode.
    pub fn max_steps_per_episode(mut self, v: usize) -> Self {
        self.max_steps_per_episode = v;
        self
    }

    /// Sets the exploration schedules.
    pub fn exploration(mut self, v: ExplorationConfig) -> Self {
        self.exploration = v;
        self
    }

    /// Sets the interval of recording in episodes.
    pub fn record_interval(mut self, v: usize) -> Self {
        self.record_interval = v;
        self
    }

    /// Sets the interval of recording agent information in optimization steps.
    pub fn record_agent_info_interval(mut self, v: usize) -> Self {
        self.record_agent_info_interval = v;
        self
    }

    /// Sets the directory where the trained model is saved.
    pub fn model_dir(mut self, model_dir: impl Into<String>) -> Self {
        self.model_dir = Some(model_dir.into());
        self
    }

    /// Checks the configuration.
    pub fn validate(&self) -> Result<()> {
        check(self.n_episodes > 0, "n_episodes must be positive")?;
        check(
            self.max_steps_per_episode > 0,
            "max_steps_per_episode must be positive",
        )?;
        check(self.record_interval > 0, "record_interval must be positive")?;
        check(
            self.record_agent_info_interval > 0,
            "record_agent_info_interval must be positive",
        )?;
        self.exploration.validate()
    }

    /// Constructs [`TrainerConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TrainerConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_serde_trainer_config() -> Result<()> {
        let config = TrainerConfig::default()
            .n_episodes(100)
            .record_interval(10)
            .record_agent_info_interval(50)
            .model_dir("some/directory");

        let dir = TempDir::new("trainer_config")?;
        let path = dir.path().join("trainer_config.yaml");
        config.save(&path)?;
        let config_ = TrainerConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }

    #[test]
    fn test_invalid_configs_are_rejected() {
        let invalid = [
            ExplorationConfig::default().epsilon_start(1.5),
            ExplorationConfig::default().epsilon_min(-0.1),
            ExplorationConfig::default().epsilon_start(0.1).epsilon_min(0.2),
            ExplorationConfig::default().epsilon_decay(0.0),
            ExplorationConfig::default().lr_start(0.0),
            ExplorationConfig::default().lr_decay(1.5),
        ];
        for config in invalid.iter() {
            let err = config.validate().unwrap_err();
            assert!(matches!(
                err.downcast_ref::<CrestError>(),
                Some(CrestError::InvalidConfig(_))
            ));
        }

        assert!(TrainerConfig::default().n_episodes(0).validate().is_err());
        assert!(TrainerConfig::default()
            .record_agent_info_interval(0)
            .validate()
            .is_err());
        assert!(TrainerConfig::default().validate().is_ok());
    }
}
