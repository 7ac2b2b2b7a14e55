//! Q-learning agent.
mod base;
mod config;
pub use base::QLearning;
pub use config::QLearningConfig;
