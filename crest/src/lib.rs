//! Tabular reinforcement learning in Rust.
//!
//! Crest consists of the following crates:
//!
//! * Core and utility
//!   * `crest-core` provides the traits of environments, policies and agents,
//!     the reward-shaping wrapper, the episodic trainer with decaying
//!     exploration, the evaluator and records of training runs.
//!   * `crest-tensorboard` has `TensorboardRecorder` struct to write records
//!     which can be shown in Tensorboard. It is based on
//!     [tensorboard-rs](https://crates.io/crates/tensorboard-rs).
//!   * `crest` is just a collection of examples.
//! * Environment
//!   * `crest-mountain-car-env` simulates the classic mountain car task and
//!     provides its dense reward shaper.
//! * Agent
//!   * `crest-tabular-agent` includes the discretizer of continuous
//!     observations, the dense Q-table and the Q-learning agent.
//!
//! See `examples/mountain_car_q.rs` for training, evaluation and analysis of
//! a Q-learning agent on the mountain car.
