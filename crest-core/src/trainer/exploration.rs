use super::ExplorationConfig;

/// The exploration rate and the learning rate of the current episode.
///
/// Owned by the [`Trainer`](crate::Trainer) and passed by reference to the
/// agent on every call. Changes only at the end of an episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplorationState {
    /// Probability of taking a random action.
    pub epsilon: f64,

    /// Step size of value updates.
    pub learning_rate: f64,
}

impl ExplorationState {
    /// The state at the first episode.
    pub fn new(config: &ExplorationConfig) -> Self {
        Self {
            epsilon: config.epsilon_start,
            learning_rate: config.lr_start,
        }
    }

    /// Applies the per-episode decay.
    pub fn decay(&mut self, config: &ExplorationConfig) {
        self.epsilon = config.epsilon_min.max(self.epsilon * config.epsilon_decay);
        self.learning_rate = config.lr_min.max(self.learning_rate * config.lr_decay);
    }
}
