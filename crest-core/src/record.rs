//! Types and traits for recording values obtained during training and evaluation.
//!
//! [`Record`] is a set of named values. The [`Trainer`](crate::Trainer)
//! stores one record per finished episode in an [`AggregateRecorder`] and
//! flushes it periodically; the recorder decides where aggregated values go
//! (TensorBoard, memory, nowhere).
//!
//! ```rust
//! use crest_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("episode", RecordValue::Scalar(1.0));
//! record.insert("episode_return", RecordValue::Scalar(-200.0));
//! assert_eq!(record.get_scalar("episode_return").unwrap(), -200.0);
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;
mod storage;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::{AggregateRecorder, Recorder};
pub use storage::RecordStorage;
