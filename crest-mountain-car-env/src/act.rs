use crest_core::Act;

/// Action of [`MountainCarEnv`](crate::MountainCarEnv).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MountainCarAct(pub usize);

impl MountainCarAct {
    /// Accelerate to the left.
    pub const PUSH_LEFT: Self = Self(0);

    /// Don't accelerate.
    pub const NO_PUSH: Self = Self(1);

    /// Accelerate to the right.
    pub const PUSH_RIGHT: Self = Self(2);

    /// The number of actions.
    pub const N_ACTIONS: usize = 3;
}

impl Act for MountainCarAct {}

impl From<usize> for MountainCarAct {
    fn from(ix: usize) -> Self {
        Self(ix)
    }
}

impl From<MountainCarAct> for usize {
    fn from(act: MountainCarAct) -> Self {
        act.0
    }
}
