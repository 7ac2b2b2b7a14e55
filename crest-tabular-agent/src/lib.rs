//! Tabular Q-learning.
//!
//! Continuous observations are mapped to [`DiscreteState`]s by a
//! [`Discretizer`]; action values are kept in a dense [`QTable`] and updated
//! with the off-policy temporal-difference rule
//!
//! ```text
//! Q(s, a) <- Q(s, a) + alpha * (r + gamma * max_a' Q(s', a') - Q(s, a))
//! ```
//!
//! [`QLearning`] implements [`crest_core::Agent`] for training, and
//! [`QTablePolicy`] is the greedy policy over a saved table used for
//! evaluation.
mod discretizer;
mod explorer;
mod policy;
mod q_table;
mod qlearning;
pub use discretizer::{DiscreteState, Discretizer};
pub use explorer::EpsilonGreedy;
pub use policy::QTablePolicy;
pub use q_table::QTable;
pub use qlearning::{QLearning, QLearningConfig};

/// File name of the value table in a model directory.
pub const Q_TABLE_FILE: &str = "q_table.bin";
