//! Train [`Agent`].
mod config;
mod exploration;
mod metrics;
mod sampler;
use crate::{
    record::{
        AggregateRecorder, Record,
        RecordValue::{DateTime, Scalar},
    },
    Agent, Env,
};
use anyhow::Result;
use chrono::Local;
pub use config::{ExplorationConfig, TrainerConfig};
pub use exploration::ExplorationState;
use log::{debug, info};
pub use metrics::TrainingMetrics;
pub use sampler::Sampler;
use std::{fs, marker::PhantomData, path::Path};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Manages the episodic training loop.
///
/// # Training loop
///
/// Every episode goes through three phases:
///
/// 1. *Episode start*: reset [`Env`] and the episode return.
/// 2. *Stepping*: the agent selects an action with the current
///    [`ExplorationState`], the environment steps, and the agent is optimized
///    with the resulting [`Transition`](crate::Transition). The reward is added
///    to the episode return. The phase ends when the episode is terminated or
///    truncated, or after `max_steps_per_episode` steps.
/// 3. *Episode end*: the return and the exploration rate at the start of the
///    episode are appended to [`TrainingMetrics`], a record is stored in the
///    recorder, and the exploration rate and the learning rate decay.
///    Every `record_interval` episodes, the average return of the last
///    `record_interval` episodes is logged and the recorder is flushed.
///
/// Every `record_agent_info_interval` optimization steps, the agent is
/// optimized with [`Agent::opt_with_record`] and the returned record, with
/// the step count under `"opt_steps"`, is stored with the episode records.
/// Records left after the last full `record_interval` are flushed at the end.
///
/// After `n_episodes` episodes, the agent and the metrics are saved in
/// `model_dir` if it is given. An error in any step aborts training without
/// saving anything.
///
/// ```mermaid
/// graph LR
///     A[Agent]-->|Env::Act|B[Env]
///     B -->|"Step&lt;E: Env&gt;"|C[Sampler]
///     C -->|"Transition&lt;E: Env&gt;"|A
///     D[ExplorationState] -->|epsilon, learning rate|A
/// ```
pub struct Trainer<E: Env> {
    /// The number of training episodes.
    n_episodes: usize,

    /// Step cap of an episode.
    max_steps_per_episode: usize,

    /// Decay schedules.
    exploration: ExplorationConfig,

    /// Interval of logging and flushing records in episodes.
    record_interval: usize,

    /// Interval of recording agent information in optimization steps.
    record_agent_info_interval: usize,

    /// Where to save the trained model.
    model_dir: Option<String>,

    phantom: PhantomData<E>,
}

impl<E: Env> Trainer<E> {
    /// Constructs a trainer, failing on an invalid configuration.
    pub fn build(config: TrainerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            n_episodes: config.n_episodes,
            max_steps_per_episode: config.max_steps_per_episode,
            exploration: config.exploration,
            record_interval: config.record_interval,
            record_agent_info_interval: config.record_agent_info_interval,
            model_dir: config.model_dir,
            phantom: PhantomData,
        })
    }

    /// Runs an episode and returns its return and length.
    ///
    /// Every `record_agent_info_interval` optimization steps, the record
    /// returned by the agent is stored in the recorder.
    fn run_episode<A: Agent<E>>(
        &self,
        sampler: &mut Sampler<E>,
        agent: &mut A,
        state: &ExplorationState,
        opt_steps: &mut usize,
        recorder: &mut Box<dyn AggregateRecorder>,
    ) -> Result<(f64, usize)> {
        sampler.reset()?;
        let mut episode_return = 0.0;

        for t in 0..self.max_steps_per_episode {
            let transition = sampler.sample(agent, state)?;
            *opt_steps += 1;
            if *opt_steps % self.record_agent_info_interval == 0 {
                let mut record = agent.opt_with_record(&transition, state);
                record.insert("opt_steps", Scalar(*opt_steps as f64));
                recorder.store(record);
            } else {
                agent.opt(&transition, state);
            }
            episode_return += transition.reward;
            if transition.is_done() {
                return Ok((episode_return, t + 1));
            }
        }

        Ok((episode_return, self.max_steps_per_episode))
    }

    fn flush(recorder: &mut Box<dyn AggregateRecorder>, episode: usize) {
        recorder.store(Record::from_slice(&[("datetime", DateTime(Local::now()))]));
        recorder.flush(episode as i64);
    }

    fn save<A: Agent<E>>(agent: &A, metrics: &TrainingMetrics, model_dir: &str) -> Result<()> {
        let path = Path::new(model_dir);
        fs::create_dir_all(path)?;
        agent.save_params(path)?;
        metrics.save(path.join("training_metrics.bin"))?;
        info!("Saved the model in {:?}.", path);
        Ok(())
    }

    /// Train the agent.
    pub fn train<A>(
        &mut self,
        env: E,
        agent: &mut A,
        recorder: &mut Box<dyn AggregateRecorder>,
    ) -> Result<TrainingMetrics>
    where
        A: Agent<E>,
    {
        let mut sampler = Sampler::new(env);
        let mut state = ExplorationState::new(&self.exploration);
        let mut metrics = TrainingMetrics::with_capacity(self.n_episodes);
        let mut opt_steps = 0;

        for episode in 1..=self.n_episodes {
            let (episode_return, episode_length) =
                self.run_episode(&mut sampler, agent, &state, &mut opt_steps, recorder)?;
            debug!(
                "Episode {}: return = {}, length = {}",
                episode, episode_return, episode_length
            );

            metrics.push(episode_return, state.epsilon);
            recorder.store(Record::from_slice(&[
                ("episode_return", Scalar(episode_return)),
                ("episode_length", Scalar(episode_length as f64)),
                ("epsilon", Scalar(state.epsilon)),
                ("learning_rate", Scalar(state.learning_rate)),
            ]));
            state.decay(&self.exploration);

            if episode % self.record_interval == 0 {
                let avg = metrics.recent_mean(self.record_interval).unwrap_or_default();
                info!(
                    "Episode {}, Avg Reward: {:.2}, Epsilon: {:.3}",
                    episode, avg, state.epsilon
                );
                Self::flush(recorder, episode);
            }
        }

        // Records of the last partial interval
        if self.n_episodes % self.record_interval != 0 {
            Self::flush(recorder, self.n_episodes);
        }

        if let Some(model_dir) = &self.model_dir {
            Self::save(agent, &metrics, model_dir)?;
        }

        Ok(metrics)
    }
}
