//! Core functionalities.
mod agent;
mod bounds;
mod env;
mod policy;
mod step;
pub use agent::Agent;
pub use bounds::ObsBounds;
pub use env::Env;
pub use policy::Policy;
use std::fmt::Debug;
pub use step::{Step, Transition};

/// An observation of an environment.
pub trait Obs: Clone + Debug {
    /// Returns the number of dimensions of the observation.
    fn len(&self) -> usize;
}

/// An action of an environment.
pub trait Act: Clone + Debug {}
