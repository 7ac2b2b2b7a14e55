//! Dense reward for the mountain car.
use crate::{MountainCarAct, MountainCarEnv, MountainCarObs};
use crest_core::RewardShaper;
use serde::{Deserialize, Serialize};

/// Configuration of [`MountainCarShaper`].
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct MountainCarShaperConfig {
    /// Position of the goal.
    pub goal_position: f64,
}

impl Default for MountainCarShaperConfig {
    fn default() -> Self {
        Self { goal_position: 0.5 }
    }
}

impl MountainCarShaperConfig {
    /// Sets the position of the goal.
    pub fn goal_position(mut self, v: f64) -> Self {
        self.goal_position = v;
        self
    }
}

/// Rewards speed and pushes along the direction of motion.
///
/// Reaching the goal gives exactly `100`. Otherwise the reward starts at `-1`,
/// gains `10 * velocity` while moving right, then `+1` if the action pushes in
/// the direction of motion and `-5` if not.
#[derive(Clone, Debug)]
pub struct MountainCarShaper {
    goal_position: f64,
}

impl MountainCarShaper {
    /// Returns the shaped reward of reaching `obs` with `act`.
    pub fn reward(&self, obs: &MountainCarObs, act: MountainCarAct) -> f64 {
        let (position, velocity) = (obs.position(), obs.velocity());
        if position >= self.goal_position {
            return 100.0;
        }

        let mut reward = -1.0 + (velocity * 10.0).max(0.0);
        let along_motion = (velocity > 0.0 && act == MountainCarAct::PUSH_RIGHT)
            || (velocity < 0.0 && act == MountainCarAct::PUSH_LEFT);
        reward += if along_motion { 1.0 } else { -5.0 };
        reward
    }
}

impl RewardShaper<MountainCarEnv> for MountainCarShaper {
    type Config = MountainCarShaperConfig;

    fn build(config: &Self::Config) -> Self {
        Self {
            goal_position: config.goal_position,
        }
    }

    /// The raw reward is ignored.
    fn shape(&self, next_obs: &MountainCarObs, act: &MountainCarAct, _reward: f64) -> f64 {
        self.reward(next_obs, *act)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shaper() -> MountainCarShaper {
        MountainCarShaper::build(&MountainCarShaperConfig::default())
    }

    #[test]
    fn test_goal_reward() {
        let shaper = shaper();
        for (obs, act) in [
            ([0.5, 0.0], MountainCarAct::PUSH_LEFT),
            ([0.5, -0.07], MountainCarAct::NO_PUSH),
            ([0.6, 0.07], MountainCarAct::PUSH_RIGHT),
        ] {
            assert_eq!(shaper.reward(&MountainCarObs(obs), act), 100.0);
        }
    }

    #[test]
    fn test_literal_cases() {
        let shaper = shaper();
        let obs = MountainCarObs([0.0, 0.3]);
        assert!((shaper.reward(&obs, MountainCarAct::PUSH_RIGHT) - 3.0).abs() < 1e-12);
        assert!((shaper.reward(&obs, MountainCarAct::PUSH_LEFT) + 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_velocity() {
        let shaper = shaper();
        let obs = MountainCarObs([-0.5, -0.02]);
        assert_eq!(shaper.reward(&obs, MountainCarAct::PUSH_LEFT), 0.0);
        assert_eq!(shaper.reward(&obs, MountainCarAct::NO_PUSH), -6.0);

        let still = MountainCarObs([-0.5, 0.0]);
        assert_eq!(shaper.reward(&still, MountainCarAct::PUSH_RIGHT), -6.0);
    }
}
