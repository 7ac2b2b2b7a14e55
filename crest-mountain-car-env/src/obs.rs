use crest_core::Obs;

/// Observation of [`MountainCarEnv`](crate::MountainCarEnv), `[position, velocity]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MountainCarObs(pub [f64; 2]);

impl MountainCarObs {
    /// Position of the car.
    pub fn position(&self) -> f64 {
        self.0[0]
    }

    /// Velocity of the car.
    pub fn velocity(&self) -> f64 {
        self.0[1]
    }
}

impl Obs for MountainCarObs {
    fn len(&self) -> usize {
        2
    }
}

impl AsRef<[f64]> for MountainCarObs {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}
