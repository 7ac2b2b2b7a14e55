#![warn(missing_docs)]
//! Core traits and the training loop of tabular reinforcement learning.
//!
//! This crate does not depend on any concrete environment or value
//! representation. An environment is anything implementing [`Env`], and an
//! agent is anything implementing [`Agent`].
pub mod dummy;
pub mod error;
pub mod record;

mod base;
pub use base::{Act, Agent, Env, Obs, ObsBounds, Policy, Step, Transition};

mod wrapper;
pub use wrapper::{RewardShaped, RewardShapedConfig, RewardShaper};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};

mod trainer;
pub use trainer::{
    ExplorationConfig, ExplorationState, Sampler, Trainer, TrainerConfig, TrainingMetrics,
};
