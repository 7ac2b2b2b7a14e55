//! Simulator of the mountain car.
use crate::{MountainCarAct, MountainCarConfig, MountainCarObs};
use anyhow::Result;
use crest_core::{error::CrestError, Env, ObsBounds, Step};
use log::{debug, trace};

const MIN_POSITION: f64 = -1.2;
const MAX_POSITION: f64 = 0.6;
const MAX_SPEED: f64 = 0.07;
const GOAL_POSITION: f64 = 0.5;
const FORCE: f64 = 0.001;
const GRAVITY: f64 = 0.0025;

/// Mountain car with discrete actions.
///
/// On every step the velocity changes by `(a - 1) * force - cos(3 * position) * gravity`
/// and is clipped to `[-0.07, 0.07]`, then the position moves by the velocity
/// and is clipped to `[-1.2, 0.6]`. The car stops when it hits the left wall.
/// An episode terminates when the car reaches position `0.5` with at least the
/// goal velocity, and is truncated after
/// [`max_episode_steps`](MountainCarConfig::max_episode_steps) steps.
pub struct MountainCarEnv {
    config: MountainCarConfig,
    position: f64,
    velocity: f64,
    count_steps: usize,
    rng: fastrand::Rng,
}

impl MountainCarEnv {
    /// Places the car at a given state.
    ///
    /// The step counter is not changed.
    pub fn set_state(&mut self, position: f64, velocity: f64) {
        self.position = position;
        self.velocity = velocity;
    }

    /// Current observation.
    pub fn obs(&self) -> MountainCarObs {
        MountainCarObs([self.position, self.velocity])
    }

    /// The number of steps in the current episode.
    pub fn count_steps(&self) -> usize {
        self.count_steps
    }

    fn reset_state(&mut self) -> MountainCarObs {
        self.position = -0.6 + 0.2 * self.rng.f64();
        self.velocity = 0.0;
        self.count_steps = 0;
        self.obs()
    }
}

impl Env for MountainCarEnv {
    type Config = MountainCarConfig;
    type Obs = MountainCarObs;
    type Act = MountainCarAct;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        if config.max_episode_steps == 0 {
            return Err(CrestError::InvalidConfig(
                "max_episode_steps must be positive".to_string(),
            )
            .into());
        }
        let mut env = Self {
            config: config.clone(),
            position: 0.0,
            velocity: 0.0,
            count_steps: 0,
            rng: fastrand::Rng::with_seed(seed as u64),
        };
        env.reset_state();
        Ok(env)
    }

    fn step(&mut self, a: &Self::Act) -> Result<Step<Self>> {
        if a.0 >= MountainCarAct::N_ACTIONS {
            return Err(CrestError::InvalidAction {
                act: a.0,
                n_actions: MountainCarAct::N_ACTIONS,
            }
            .into());
        }

        let push = a.0 as f64 - 1.0;
        self.velocity += push * FORCE - (3.0 * self.position).cos() * GRAVITY;
        self.velocity = self.velocity.clamp(-MAX_SPEED, MAX_SPEED);
        self.position += self.velocity;
        self.position = self.position.clamp(MIN_POSITION, MAX_POSITION);
        if self.position == MIN_POSITION && self.velocity < 0.0 {
            self.velocity = 0.0;
        }
        self.count_steps += 1;

        let is_terminated =
            self.position >= GOAL_POSITION && self.velocity >= self.config.goal_velocity;
        let is_truncated = !is_terminated && self.count_steps >= self.config.max_episode_steps;
        trace!(
            "step {}: act = {}, obs = {:?}",
            self.count_steps,
            a.0,
            self.obs()
        );
        if is_terminated {
            debug!("Reached the goal in {} steps", self.count_steps);
        }

        Ok(Step::new(
            self.obs(),
            *a,
            -1.0,
            is_terminated,
            is_truncated,
        ))
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        Ok(self.reset_state())
    }

    /// Reseeds the random number generator with `ix` before resetting, so
    /// evaluation episodes are reproducible.
    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        self.rng.seed(ix as u64);
        self.reset()
    }

    fn obs_bounds(&self) -> ObsBounds {
        ObsBounds::new(
            vec![MIN_POSITION, -MAX_SPEED],
            vec![MAX_POSITION, MAX_SPEED],
        )
        .expect("bounds of mountain car are valid")
    }

    fn n_actions(&self) -> usize {
        MountainCarAct::N_ACTIONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Result<MountainCarEnv> {
        MountainCarEnv::build(&MountainCarConfig::default(), 42)
    }

    #[test]
    fn test_reset_distribution() -> Result<()> {
        let mut env = env()?;
        for _ in 0..100 {
            let obs = env.reset()?;
            assert!((-0.6..=-0.4).contains(&obs.position()));
            assert_eq!(obs.velocity(), 0.0);
        }
        Ok(())
    }

    #[test]
    fn test_reset_with_index_is_reproducible() -> Result<()> {
        let mut env1 = env()?;
        let mut env2 = MountainCarEnv::build(&MountainCarConfig::default(), 7)?;
        env1.reset()?;
        assert_eq!(env1.reset_with_index(3)?, env2.reset_with_index(3)?);
        Ok(())
    }

    #[test]
    fn test_left_wall_stops_car() -> Result<()> {
        let mut env = env()?;
        env.set_state(-1.19, -0.05);
        let step = env.step(&MountainCarAct::PUSH_LEFT)?;
        assert_eq!(step.obs.position(), MIN_POSITION);
        assert_eq!(step.obs.velocity(), 0.0);
        assert!(!step.is_done());
        Ok(())
    }

    #[test]
    fn test_velocity_is_clipped() -> Result<()> {
        let mut env = env()?;
        env.set_state(-0.5, MAX_SPEED);
        let step = env.step(&MountainCarAct::PUSH_RIGHT)?;
        assert!(step.obs.velocity() <= MAX_SPEED);
        Ok(())
    }

    #[test]
    fn test_terminates_at_goal() -> Result<()> {
        let mut env = env()?;
        env.set_state(0.49, 0.05);
        let step = env.step(&MountainCarAct::PUSH_RIGHT)?;
        assert!(step.obs.position() >= GOAL_POSITION);
        assert!(step.is_terminated);
        assert!(!step.is_truncated);
        assert_eq!(step.reward, -1.0);
        Ok(())
    }

    #[test]
    fn test_truncates_after_max_steps() -> Result<()> {
        let config = MountainCarConfig::default().max_episode_steps(5);
        let mut env = MountainCarEnv::build(&config, 0)?;
        env.reset()?;
        for i in 1..=5 {
            let step = env.step(&MountainCarAct::NO_PUSH)?;
            assert!(!step.is_terminated);
            assert_eq!(step.is_truncated, i == 5);
        }
        env.reset()?;
        assert_eq!(env.count_steps(), 0);
        Ok(())
    }

    #[test]
    fn test_invalid_action() -> Result<()> {
        let mut env = env()?;
        let err = env.step(&MountainCarAct(3)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CrestError>(),
            Some(CrestError::InvalidAction {
                act: 3,
                n_actions: 3
            })
        ));
        Ok(())
    }
}
