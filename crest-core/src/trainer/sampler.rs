//! Interaction of an agent with an environment, one transition at a time.
use crate::{Agent, Env, ExplorationState, Transition};
use anyhow::Result;

/// Holds the environment and the previous observation.
///
/// Each call of [`Sampler::sample`] makes one environment step with an action
/// chosen by the agent and returns the resulting transition.
pub struct Sampler<E: Env> {
    env: E,
    prev_obs: Option<E::Obs>,
}

impl<E: Env> Sampler<E> {
    /// Creates a new sampler with the given environment.
    pub fn new(env: E) -> Self {
        Self {
            env,
            prev_obs: None,
        }
    }

    /// Resets the environment, starting a new episode.
    pub fn reset(&mut self) -> Result<&E::Obs> {
        let obs = self.env.reset()?;
        Ok(&*self.prev_obs.insert(obs))
    }

    /// Samples an action with exploration and applies it to the environment.
    ///
    /// The environment is reset first if no episode is running.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment fails to reset or step.
    pub fn sample<A: Agent<E>>(
        &mut self,
        agent: &mut A,
        state: &ExplorationState,
    ) -> Result<Transition<E>> {
        let obs = match self.prev_obs.take() {
            Some(obs) => obs,
            None => self.env.reset()?,
        };
        let act = agent.sample_with_exploration(&obs, state);
        let step = self.env.step(&act)?;
        let transition = Transition::from_step(obs, step);

        self.prev_obs = match transition.is_done() {
            true => None,
            false => Some(transition.next_obs.clone()),
        };

        Ok(transition)
    }
}
