//! Errors in the library.
use std::path::PathBuf;
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug)]
pub enum CrestError {
    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),

    /// A configuration value is out of its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A persisted artifact does not exist.
    #[error("Model not found: {0:?}")]
    ModelNotFound(PathBuf),

    /// A loaded value table does not match the expected shape.
    #[error("Shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        /// Expected shape.
        expected: Vec<usize>,
        /// Shape found in the artifact.
        found: Vec<usize>,
    },

    /// The environment received an action index it does not define.
    #[error("Invalid action {act} for an environment with {n_actions} actions")]
    InvalidAction {
        /// Given action index.
        act: usize,
        /// The number of actions of the environment.
        n_actions: usize,
    },
}
