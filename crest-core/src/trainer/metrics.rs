//! Per-episode training metrics and their snapshot.
use crate::error::CrestError;
use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

/// Total reward and exploration rate of every finished episode.
///
/// Both sequences grow by exactly one element per episode, so they always
/// have the same length.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TrainingMetrics {
    rewards: Vec<f64>,
    epsilons: Vec<f64>,
}

impl TrainingMetrics {
    /// Constructs empty metrics with room for `n` episodes.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            rewards: Vec::with_capacity(n),
            epsilons: Vec::with_capacity(n),
        }
    }

    /// Appends the result of a finished episode.
    ///
    /// `epsilon` is the exploration rate at the start of the episode.
    pub fn push(&mut self, reward: f64, epsilon: f64) {
        self.rewards.push(reward);
        self.epsilons.push(epsilon);
    }

    /// Total rewards per episode.
    pub fn rewards(&self) -> &[f64] {
        &self.rewards
    }

    /// Exploration rates per episode.
    pub fn epsilons(&self) -> &[f64] {
        &self.epsilons
    }

    /// The number of episodes.
    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    /// Returns `true` if no episode has been recorded.
    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }

    /// Mean reward of the last `window` episodes.
    pub fn recent_mean(&self, window: usize) -> Option<f64> {
        if self.rewards.is_empty() || window == 0 {
            return None;
        }
        let start = self.rewards.len().saturating_sub(window);
        let recent = &self.rewards[start..];
        Some(recent.iter().sum::<f64>() / recent.len() as f64)
    }

    /// Moving average of rewards over full windows.
    ///
    /// The result has `len() - window + 1` elements, empty if there are fewer
    /// episodes than `window`.
    pub fn moving_average(&self, window: usize) -> Vec<f64> {
        if window == 0 {
            return vec![];
        }
        self.rewards
            .windows(window)
            .map(|w| w.iter().sum::<f64>() / window as f64)
            .collect()
    }

    /// Saves the metrics in a binary file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = BufWriter::new(File::create(path)?);
        bincode::serialize_into(file, self)?;
        info!("Saved training metrics in {:?}", path);
        Ok(())
    }

    /// Loads metrics saved with [`TrainingMetrics::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(CrestError::ModelNotFound(path.to_path_buf()).into());
        }
        let file = BufReader::new(File::open(path)?);
        let metrics: Self = bincode::deserialize_from(file)?;
        if metrics.rewards.len() != metrics.epsilons.len() {
            return Err(CrestError::ShapeMismatch {
                expected: vec![metrics.rewards.len()],
                found: vec![metrics.epsilons.len()],
            }
            .into());
        }
        Ok(metrics)
    }

    /// Writes `episode,reward,epsilon` rows in a CSV file.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(["episode", "reward", "epsilon"])?;
        for (i, (r, e)) in self.rewards.iter().zip(self.epsilons.iter()).enumerate() {
            wtr.serialize((i + 1, r, e))?;
        }
        wtr.flush()?;
        Ok(())
    }
}
