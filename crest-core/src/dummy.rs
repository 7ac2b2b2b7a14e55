//! This module is used for tests.
//!
//! [`DummyEnv`] is a deterministic environment: the observation moves from
//! position `0` to position `1` in `goal_steps` steps whatever the action is,
//! and the episode terminates there. Every step gives reward `-1`.
use crate::{error::CrestError, Env, ObsBounds, Step};
use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq)]
/// Dummy observation, `[position, velocity]`.
pub struct DummyObs(pub [f64; 2]);

impl crate::Obs for DummyObs {
    fn len(&self) -> usize {
        2
    }
}

impl AsRef<[f64]> for DummyObs {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Dummy action.
pub struct DummyAct(pub usize);

impl crate::Act for DummyAct {}

impl From<usize> for DummyAct {
    fn from(ix: usize) -> Self {
        Self(ix)
    }
}

impl From<DummyAct> for usize {
    fn from(act: DummyAct) -> Self {
        act.0
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
/// Configuration of [`DummyEnv`].
pub struct DummyEnvConfig {
    /// The number of steps to reach the goal.
    pub goal_steps: usize,

    /// The number of actions.
    pub n_actions: usize,
}

impl Default for DummyEnvConfig {
    fn default() -> Self {
        Self {
            goal_steps: 10,
            n_actions: 3,
        }
    }
}

impl DummyEnvConfig {
    /// Sets the number of steps to reach the goal.
    pub fn goal_steps(mut self, v: usize) -> Self {
        self.goal_steps = v;
        self
    }

    /// Sets the number of actions.
    pub fn n_actions(mut self, v: usize) -> Self {
        self.n_actions = v;
        self
    }
}

/// Dummy env.
pub struct DummyEnv {
    config: DummyEnvConfig,
    steps: usize,
}

impl DummyEnv {
    fn obs(&self) -> DummyObs {
        let goal = self.config.goal_steps as f64;
        DummyObs([self.steps as f64 / goal, 1.0 / goal])
    }
}

impl Env for DummyEnv {
    type Config = DummyEnvConfig;
    type Obs = DummyObs;
    type Act = DummyAct;

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        if config.goal_steps == 0 || config.n_actions == 0 {
            return Err(CrestError::InvalidConfig(format!("{:?}", config)).into());
        }
        Ok(Self {
            config: config.clone(),
            steps: 0,
        })
    }

    fn step(&mut self, a: &Self::Act) -> Result<Step<Self>> {
        if a.0 >= self.config.n_actions {
            return Err(CrestError::InvalidAction {
                act: a.0,
                n_actions: self.config.n_actions,
            }
            .into());
        }
        self.steps += 1;
        let is_terminated = self.steps >= self.config.goal_steps;
        Ok(Step::new(self.obs(), a.clone(), -1.0, is_terminated, false))
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.steps = 0;
        Ok(self.obs())
    }

    fn reset_with_index(&mut self, _ix: usize) -> Result<Self::Obs> {
        self.reset()
    }

    fn obs_bounds(&self) -> ObsBounds {
        ObsBounds::new(vec![0.0, -1.0], vec![1.0, 1.0]).expect("valid dummy bounds")
    }

    fn n_actions(&self) -> usize {
        self.config.n_actions
    }
}
