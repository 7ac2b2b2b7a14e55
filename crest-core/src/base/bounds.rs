//! Bounds of continuous observations.
use crate::error::CrestError;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Per-dimension `(low, high)` bounds of an observation.
///
/// The bounds are supplied by the environment and do not change during a run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ObsBounds {
    low: Vec<f64>,
    high: Vec<f64>,
}

impl ObsBounds {
    /// Constructs bounds, checking that every dimension satisfies `low < high`.
    pub fn new(low: Vec<f64>, high: Vec<f64>) -> Result<Self> {
        if low.is_empty() || low.len() != high.len() {
            return Err(CrestError::InvalidConfig(format!(
                "bounds must be non-empty with equal lengths, got {} and {}",
                low.len(),
                high.len()
            ))
            .into());
        }

        for (i, (l, h)) in low.iter().zip(high.iter()).enumerate() {
            if !l.is_finite() || !h.is_finite() || l >= h {
                return Err(CrestError::InvalidConfig(format!(
                    "malformed bounds ({}, {}) in dimension {}",
                    l, h, i
                ))
                .into());
            }
        }

        Ok(Self { low, high })
    }

    /// The number of dimensions.
    pub fn dim(&self) -> usize {
        self.low.len()
    }

    /// Lower bounds.
    pub fn low(&self) -> &[f64] {
        &self.low
    }

    /// Upper bounds.
    pub fn high(&self) -> &[f64] {
        &self.high
    }

    /// Returns `(low, high)` of the `i`-th dimension.
    pub fn get(&self, i: usize) -> (f64, f64) {
        (self.low[i], self.high[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_bounds() {
        assert!(ObsBounds::new(vec![], vec![]).is_err());
        assert!(ObsBounds::new(vec![0.0], vec![1.0, 2.0]).is_err());
        assert!(ObsBounds::new(vec![1.0], vec![1.0]).is_err());
        assert!(ObsBounds::new(vec![0.0], vec![f64::NAN]).is_err());

        let bounds = ObsBounds::new(vec![-1.2, -0.07], vec![0.6, 0.07]).unwrap();
        assert_eq!(bounds.dim(), 2);
        assert_eq!(bounds.get(1), (-0.07, 0.07));
    }
}
