//! Default implementation of the [`Evaluator`] trait.
//!
//! The reward used for scoring is the reward of the environment the evaluator
//! is built with. Building it with a raw simulator measures task performance;
//! building it with a [`RewardShaped`](crate::RewardShaped) environment
//! reports the training signal instead.
use super::Evaluator;
use crate::{
    record::{Record, RecordValue},
    Env, Policy,
};
use anyhow::Result;
use log::info;

/// Runs a fixed number of episodes with a policy.
///
/// # Examples
///
/// ```ignore
/// let env = MountainCarEnv::build(&MountainCarConfig::default(), 42)?;
/// let mut evaluator = DefaultEvaluator::new(env, 5)?;
/// let record = evaluator.evaluate(&mut policy)?;
/// println!("Average return: {}", record.get_scalar("episode_return")?);
/// ```
pub struct DefaultEvaluator<E: Env> {
    /// The number of episodes to run during evaluation.
    n_episodes: usize,

    /// The environment instance used for evaluation.
    env: E,
}

impl<E: Env> DefaultEvaluator<E> {
    /// Constructs a new [`DefaultEvaluator`].
    pub fn new(env: E, n_episodes: usize) -> Result<Self> {
        Ok(Self { n_episodes, env })
    }

    /// Runs the episodes and returns the total reward of each one.
    ///
    /// Each episode runs until the environment reports termination or
    /// truncation; the environment is reset with the episode index.
    pub fn run_episodes<P: Policy<E>>(&mut self, policy: &mut P) -> Result<Vec<f64>> {
        let mut returns = Vec::with_capacity(self.n_episodes);

        for ix in 0..self.n_episodes {
            let mut prev_obs = self.env.reset_with_index(ix)?;
            let mut r_total = 0.0;
            let mut n_steps = 0;

            loop {
                let act = policy.sample(&prev_obs);
                let step = self.env.step(&act)?;
                r_total += step.reward;
                n_steps += 1;
                if step.is_done() {
                    break;
                }
                prev_obs = step.obs;
            }

            info!(
                "Episode {} finished with total reward: {} ({} steps)",
                ix + 1,
                r_total,
                n_steps
            );
            returns.push(r_total);
        }

        Ok(returns)
    }
}

impl<E: Env> Evaluator<E> for DefaultEvaluator<E> {
    /// Returns the mean return as `"episode_return"` and the returns of all
    /// episodes as `"episode_returns"`.
    fn evaluate<P>(&mut self, policy: &mut P) -> Result<Record>
    where
        P: Policy<E>,
    {
        let returns = self.run_episodes(policy)?;
        let mean = returns.iter().sum::<f64>() / returns.len().max(1) as f64;
        Ok(Record::from_slice(&[
            ("episode_return", RecordValue::Scalar(mean)),
            ("episode_returns", RecordValue::Array1(returns)),
        ]))
    }
}
