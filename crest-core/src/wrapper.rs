//! Reward-shaping wrapper of environments.
use crate::{Env, ObsBounds, Step};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Replaces the raw reward of an environment transition with a shaped one.
///
/// Implementations must be stateless: the shaped reward is a function of the
/// observation after the step, the action taken and the raw reward.
pub trait RewardShaper<E: Env> {
    /// Configuration.
    type Config: Clone;

    /// Builds the shaper.
    fn build(config: &Self::Config) -> Self;

    /// Returns the shaped reward.
    fn shape(&self, next_obs: &E::Obs, act: &E::Act, reward: f64) -> f64;
}

/// Configuration of [`RewardShaped`].
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct RewardShapedConfig<C, SC> {
    /// Configuration of the wrapped environment.
    pub env_config: C,

    /// Configuration of the reward shaper.
    pub shaper_config: SC,
}

impl<C, SC> RewardShapedConfig<C, SC> {
    /// Constructs the configuration.
    pub fn new(env_config: C, shaper_config: SC) -> Self {
        Self {
            env_config,
            shaper_config,
        }
    }
}

/// An environment whose rewards are rewritten by a [`RewardShaper`].
///
/// Observations, actions, episode flags and metadata are those of the wrapped
/// environment.
pub struct RewardShaped<E, S> {
    env: E,
    shaper: S,
}

impl<E, S> RewardShaped<E, S>
where
    E: Env,
    S: RewardShaper<E>,
{
    /// Wraps an environment.
    pub fn new(env: E, shaper: S) -> Self {
        Self { env, shaper }
    }

    /// Returns a reference to the wrapped environment.
    pub fn inner(&self) -> &E {
        &self.env
    }
}

impl<E, S> Env for RewardShaped<E, S>
where
    E: Env,
    S: RewardShaper<E>,
{
    type Config = RewardShapedConfig<E::Config, S::Config>;
    type Obs = E::Obs;
    type Act = E::Act;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        Ok(Self {
            env: E::build(&config.env_config, seed)?,
            shaper: S::build(&config.shaper_config),
        })
    }

    fn step(&mut self, a: &Self::Act) -> Result<Step<Self>> {
        let step = self.env.step(a)?;
        let reward = self.shaper.shape(&step.obs, &step.act, step.reward);
        Ok(Step::new(
            step.obs,
            step.act,
            reward,
            step.is_terminated,
            step.is_truncated,
        ))
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.env.reset()
    }

    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        self.env.reset_with_index(ix)
    }

    fn obs_bounds(&self) -> ObsBounds {
        self.env.obs_bounds()
    }

    fn n_actions(&self) -> usize {
        self.env.n_actions()
    }
}
