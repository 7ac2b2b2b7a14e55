//! Discretization of continuous observations.
use anyhow::Result;
use crest_core::{error::CrestError, ObsBounds};
use serde::{Deserialize, Serialize};

/// Bin indices of an observation, one per dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiscreteState(Vec<usize>);

impl DiscreteState {
    /// Constructs a state from bin indices.
    pub fn new(ixs: Vec<usize>) -> Self {
        Self(ixs)
    }

    /// Bin indices.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for DiscreteState {
    fn from(ixs: Vec<usize>) -> Self {
        Self(ixs)
    }
}

/// Maps an observation to the bins it falls in.
///
/// Dimension `i` with `n_i` bins over `[low_i, high_i]` has `n_i - 1` interior
/// boundaries splitting the range into equal widths. The bin index of a value
/// is the number of boundaries not exceeding it, so values below `low_i` fall
/// in the first bin and values above `high_i` in the last one.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Discretizer {
    boundaries: Vec<Vec<f64>>,
}

impl Discretizer {
    /// Constructs a discretizer.
    ///
    /// Fails if the number of bin counts differs from the dimension of
    /// `bounds` or a bin count is less than 2.
    pub fn new(bounds: &ObsBounds, n_bins: &[usize]) -> Result<Self> {
        if n_bins.len() != bounds.dim() {
            return Err(CrestError::InvalidConfig(format!(
                "{} bin counts given for {} observation dimensions",
                n_bins.len(),
                bounds.dim()
            ))
            .into());
        }

        let mut boundaries = Vec::with_capacity(n_bins.len());
        for (i, &n) in n_bins.iter().enumerate() {
            if n < 2 {
                return Err(CrestError::InvalidConfig(format!(
                    "bin count of dimension {} must be at least 2, got {}",
                    i, n
                ))
                .into());
            }
            let (low, high) = bounds.get(i);
            let bs: Vec<f64> = (1..n)
                .map(|k| low + (high - low) * k as f64 / n as f64)
                .collect();
            if bs.windows(2).any(|w| w[0] >= w[1]) {
                return Err(CrestError::InvalidConfig(format!(
                    "{} bins are too many to split ({}, {})",
                    n, low, high
                ))
                .into());
            }
            boundaries.push(bs);
        }

        Ok(Self { boundaries })
    }

    /// Returns the bin indices of an observation.
    ///
    /// # Panics
    ///
    /// Panics if the length of `obs` differs from the dimension.
    pub fn discretize(&self, obs: &[f64]) -> DiscreteState {
        assert_eq!(obs.len(), self.dim(), "observation dimension mismatch");
        DiscreteState(
            self.boundaries
                .iter()
                .zip(obs.iter())
                .map(|(bs, &x)| bs.partition_point(|&b| b <= x))
                .collect(),
        )
    }

    /// The number of bins in each dimension.
    pub fn n_bins(&self) -> Vec<usize> {
        self.boundaries.iter().map(|bs| bs.len() + 1).collect()
    }

    /// The number of observation dimensions.
    pub fn dim(&self) -> usize {
        self.boundaries.len()
    }

    /// Interior boundaries of dimension `i`.
    pub fn boundaries(&self, i: usize) -> &[f64] {
        &self.boundaries[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mountain_car() -> Discretizer {
        let bounds = ObsBounds::new(vec![-1.2, -0.07], vec![0.6, 0.07]).unwrap();
        Discretizer::new(&bounds, &[50, 50]).unwrap()
    }

    #[test]
    fn test_bounds_map_to_outer_bins() {
        let d = mountain_car();
        assert_eq!(d.n_bins(), vec![50, 50]);
        assert_eq!(d.boundaries(0).len(), 49);
        assert_eq!(d.discretize(&[-1.2, -0.07]).as_slice(), &[0, 0]);
        assert_eq!(d.discretize(&[-5.0, -1.0]).as_slice(), &[0, 0]);
        assert_eq!(d.discretize(&[0.6, 0.07]).as_slice(), &[49, 49]);
        assert_eq!(d.discretize(&[3.0, 1.0]).as_slice(), &[49, 49]);
    }

    #[test]
    fn test_deterministic_and_monotone() {
        let d = mountain_car();
        let mut prev = 0;
        for i in 0..=400 {
            let x = -1.5 + 2.1 * i as f64 / 400.0;
            let s = d.discretize(&[x, 0.0]);
            assert_eq!(s, d.discretize(&[x, 0.0]));
            let ix = s.as_slice()[0];
            assert!(ix >= prev);
            assert!(ix < 50);
            prev = ix;
        }
        assert_eq!(prev, 49);
    }

    #[test]
    fn test_value_on_boundary_goes_up() {
        let bounds = ObsBounds::new(vec![0.0], vec![4.0]).unwrap();
        let d = Discretizer::new(&bounds, &[4]).unwrap();
        assert_eq!(d.boundaries(0), &[1.0, 2.0, 3.0]);
        assert_eq!(d.discretize(&[0.999]).as_slice(), &[0]);
        assert_eq!(d.discretize(&[1.0]).as_slice(), &[1]);
        assert_eq!(d.discretize(&[2.5]).as_slice(), &[2]);
        assert_eq!(d.discretize(&[3.0]).as_slice(), &[3]);
    }

    #[test]
    fn test_two_bins() {
        let bounds = ObsBounds::new(vec![-1.0], vec![1.0]).unwrap();
        let d = Discretizer::new(&bounds, &[2]).unwrap();
        assert_eq!(d.discretize(&[-0.1]).as_slice(), &[0]);
        assert_eq!(d.discretize(&[0.0]).as_slice(), &[1]);
    }

    #[test]
    fn test_invalid_bins() {
        let bounds = ObsBounds::new(vec![-1.0, -1.0], vec![1.0, 1.0]).unwrap();
        for n_bins in [vec![1, 10], vec![10, 0], vec![10]].iter() {
            let err = Discretizer::new(&bounds, n_bins).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<CrestError>(),
                Some(CrestError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    #[should_panic]
    fn test_wrong_observation_length() {
        mountain_car().discretize(&[0.0]);
    }
}
