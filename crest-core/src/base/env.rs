//! Environment.
use super::{Act, Obs, ObsBounds, Step};
use anyhow::Result;

/// Represents an environment, typically an MDP.
///
/// The library only observes the internal state of an environment through
/// this trait. Simulators, reward-shaping wrappers and deterministic mocks
/// used in tests all implement it.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Performes an environment step.
    ///
    /// An error means that the environment contract was violated, e.g., an
    /// action out of range. Callers treat it as fatal.
    fn step(&mut self, a: &Self::Act) -> Result<Step<Self>>
    where
        Self: Sized;

    /// Resets the environment and returns the initial observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Resets the environment with a given index.
    ///
    /// The index is used in an arbitrary way. For example, it can be used as a random seed,
    /// which is useful when evaluation of a trained agent.
    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs>;

    /// Per-dimension bounds of observations.
    fn obs_bounds(&self) -> ObsBounds;

    /// The number of discrete actions.
    fn n_actions(&self) -> usize;
}
