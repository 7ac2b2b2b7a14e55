//! Agent.
use super::{Env, Policy, Transition};
use crate::{record::Record, ExplorationState};
use anyhow::Result;
use std::path::Path;

/// Represents a trainable policy on an environment.
///
/// [`Policy::sample`] is the greedy behavior used for evaluation. During
/// training, the [`Trainer`](crate::Trainer) calls
/// [`Agent::sample_with_exploration`] and [`Agent::opt`] with the exploration
/// state it owns, so the agent itself carries no schedule.
pub trait Agent<E: Env>: Policy<E> {
    /// Samples an action for training, exploring according to `state`.
    fn sample_with_exploration(&mut self, obs: &E::Obs, state: &ExplorationState) -> E::Act;

    /// Performs an optimization step with a single transition.
    fn opt(&mut self, transition: &Transition<E>, state: &ExplorationState) {
        let _ = self.opt_with_record(transition, state);
    }

    /// Performs an optimization step and returns some information.
    fn opt_with_record(&mut self, transition: &Transition<E>, state: &ExplorationState)
        -> Record;

    /// Save the parameters of the agent in the given directory.
    fn save_params(&self, path: &Path) -> Result<()>;

    /// Load the parameters of the agent from the given directory.
    fn load_params(&mut self, path: &Path) -> Result<()>;
}
