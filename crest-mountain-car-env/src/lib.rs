//! Mountain car environment.
//!
//! A car on a one-dimensional track between two hills. The observation is
//! `[position, velocity]` and there are three actions: push left, no push and
//! push right. The engine is too weak to drive up the right hill directly, so
//! the car has to swing back and forth to build momentum.
//!
//! [`MountainCarEnv`] gives reward `-1` on every step. [`MountainCarShaper`]
//! rewrites it into a dense signal and is combined with the environment by
//! [`crest_core::RewardShaped`]:
//!
//! ```no_run
//! use anyhow::Result;
//! use crest_core::{Env, RewardShaped, RewardShapedConfig};
//! use crest_mountain_car_env::{MountainCarConfig, MountainCarEnv, MountainCarShaper,
//!     MountainCarShaperConfig};
//!
//! fn main() -> Result<()> {
//!     let config = RewardShapedConfig::new(
//!         MountainCarConfig::default(),
//!         MountainCarShaperConfig::default(),
//!     );
//!     let mut env = RewardShaped::<MountainCarEnv, MountainCarShaper>::build(&config, 42)?;
//!     let _obs = env.reset()?;
//!     Ok(())
//! }
//! ```
mod act;
mod config;
mod env;
mod obs;
mod shaper;
pub use act::MountainCarAct;
pub use config::MountainCarConfig;
pub use env::MountainCarEnv;
pub use obs::MountainCarObs;
pub use shaper::{MountainCarShaper, MountainCarShaperConfig};
