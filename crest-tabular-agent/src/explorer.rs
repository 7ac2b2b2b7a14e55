//! Exploration strategy of the Q-learning agent.
use crate::{DiscreteState, QTable};
use rand::Rng;

/// Epsilon-greedy action selection.
///
/// The exploration rate is not part of the explorer; it is given on every
/// call by the training loop.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct EpsilonGreedy;

impl EpsilonGreedy {
    /// Constructs epsilon-greedy explorer.
    pub fn new() -> Self {
        Self
    }

    /// Takes a uniformly random action with probability `epsilon`, the
    /// greedy action of `table` otherwise.
    ///
    /// `epsilon` must be in `[0, 1]`; the range is checked when the
    /// exploration schedule is configured.
    pub fn action(
        &self,
        table: &QTable,
        state: &DiscreteState,
        epsilon: f64,
        rng: &mut impl Rng,
    ) -> usize {
        debug_assert!((0.0..=1.0).contains(&epsilon), "epsilon = {}", epsilon);
        if rng.gen::<f64>() < epsilon {
            rng.gen_range(0..table.n_actions())
        } else {
            table.best_action(state)
        }
    }
}
