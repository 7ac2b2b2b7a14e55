//! Dense table of action values.
use crate::DiscreteState;
use anyhow::Result;
use crest_core::error::CrestError;
use log::info;
use ndarray::{Array2, ArrayD, ArrayView1, IxDyn};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

/// Action values indexed by `(discrete state, action)`.
///
/// The logical shape is `(dims[0], ..., dims[k-1], n_actions)`. Values are
/// stored in a single row-major array with one row per discrete state, so the
/// row of a state is its row-major offset in `dims`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QTable {
    dims: Vec<usize>,
    values: Array2<f64>,
}

impl QTable {
    /// Constructs a zero-filled table.
    pub fn new(dims: &[usize], n_actions: usize) -> Result<Self> {
        if dims.is_empty() || dims.iter().any(|&d| d == 0) || n_actions == 0 {
            return Err(CrestError::InvalidConfig(format!(
                "invalid table shape {:?} x {}",
                dims, n_actions
            ))
            .into());
        }
        let n_states = dims.iter().product();
        Ok(Self {
            dims: dims.to_vec(),
            values: Array2::zeros((n_states, n_actions)),
        })
    }

    /// Row-major offset of a state.
    ///
    /// # Panics
    ///
    /// Panics if the state has a wrong dimension or an index out of range.
    fn row(&self, state: &DiscreteState) -> usize {
        let ixs = state.as_slice();
        assert_eq!(ixs.len(), self.dims.len(), "state dimension mismatch");
        ixs.iter().zip(self.dims.iter()).fold(0, |row, (&ix, &dim)| {
            assert!(ix < dim, "bin index {} out of range {}", ix, dim);
            row * dim + ix
        })
    }

    /// The number of bins in each state dimension.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// The number of actions.
    pub fn n_actions(&self) -> usize {
        self.values.ncols()
    }

    /// The number of discrete states.
    pub fn n_states(&self) -> usize {
        self.values.nrows()
    }

    /// Logical shape, `dims` followed by the number of actions.
    pub fn shape(&self) -> Vec<usize> {
        let mut shape = self.dims.clone();
        shape.push(self.n_actions());
        shape
    }

    /// Returns the value of an action at a state.
    pub fn get(&self, state: &DiscreteState, act: usize) -> f64 {
        self.values[[self.row(state), act]]
    }

    /// Returns the values of all actions at a state.
    pub fn values(&self, state: &DiscreteState) -> ArrayView1<f64> {
        self.values.row(self.row(state))
    }

    /// Returns the action with the largest value at a state.
    ///
    /// Ties are broken by the lowest action index.
    pub fn best_action(&self, state: &DiscreteState) -> usize {
        let mut best = 0;
        let values = self.values(state);
        for (a, v) in values.iter().enumerate().skip(1) {
            if *v > values[best] {
                best = a;
            }
        }
        best
    }

    /// Returns the largest value at a state.
    pub fn max_value(&self, state: &DiscreteState) -> f64 {
        self.values(state)[self.best_action(state)]
    }

    /// Applies the Q-learning update and returns the temporal-difference error.
    ///
    /// The target bootstraps from the greedy value of `next_state`, whatever
    /// action is taken there.
    pub fn update(
        &mut self,
        state: &DiscreteState,
        act: usize,
        reward: f64,
        next_state: &DiscreteState,
        learning_rate: f64,
        discount_factor: f64,
    ) -> f64 {
        let target = reward + discount_factor * self.max_value(next_state);
        let row = self.row(state);
        let q = &mut self.values[[row, act]];
        let td_err = target - *q;
        *q += learning_rate * td_err;
        td_err
    }

    /// The largest value of every state, in row-major order of states.
    pub fn max_values(&self) -> Vec<f64> {
        self.values
            .rows()
            .into_iter()
            .map(|r| r.iter().copied().fold(f64::NEG_INFINITY, f64::max))
            .collect()
    }

    /// Returns the values as an array of the logical shape.
    pub fn to_dense(&self) -> Result<ArrayD<f64>> {
        Ok(self.values.clone().into_shape(IxDyn(&self.shape()))?)
    }

    /// Checks that the state dimensions of the table are `dims`.
    pub fn check_dims(&self, dims: &[usize]) -> Result<()> {
        if self.dims != dims {
            return Err(CrestError::ShapeMismatch {
                expected: dims.to_vec(),
                found: self.dims.clone(),
            }
            .into());
        }
        Ok(())
    }

    /// Saves the table in a binary file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = BufWriter::new(File::create(path)?);
        bincode::serialize_into(file, self)?;
        info!("Saved Q-table {:?} in {:?}", self.shape(), path);
        Ok(())
    }

    /// Loads a table saved with [`QTable::save`].
    ///
    /// Fails with [`CrestError::ModelNotFound`] if the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(CrestError::ModelNotFound(path.to_path_buf()).into());
        }
        let file = BufReader::new(File::open(path)?);
        let table: Self = bincode::deserialize_from(file)?;
        let n_states: usize = table.dims.iter().product();
        if table.dims.is_empty() || n_states != table.n_states() {
            return Err(CrestError::ShapeMismatch {
                expected: vec![n_states, table.n_actions()],
                found: table.values.shape().to_vec(),
            }
            .into());
        }
        info!("Loaded Q-table {:?} from {:?}", table.shape(), path);
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    fn s(ixs: &[usize]) -> DiscreteState {
        DiscreteState::new(ixs.to_vec())
    }

    #[test]
    fn test_new_table_is_zero() -> Result<()> {
        let table = QTable::new(&[50, 50], 3)?;
        assert_eq!(table.n_states(), 2500);
        assert_eq!(table.shape(), vec![50, 50, 3]);
        assert!(table.max_values().iter().all(|v| *v == 0.0));
        assert!(QTable::new(&[], 3).is_err());
        assert!(QTable::new(&[3, 0], 3).is_err());
        assert!(QTable::new(&[3, 3], 0).is_err());
        Ok(())
    }

    #[test]
    fn test_tie_break_lowest_index() -> Result<()> {
        let mut table = QTable::new(&[2, 2], 3)?;
        let state = s(&[1, 0]);
        for _ in 0..3 {
            assert_eq!(table.best_action(&state), 0);
        }

        table.update(&state, 1, 5.0, &s(&[0, 0]), 1.0, 0.0);
        table.update(&state, 2, 5.0, &s(&[0, 0]), 1.0, 0.0);
        for _ in 0..3 {
            assert_eq!(table.best_action(&state), 1);
        }
        assert_eq!(table.max_value(&state), 5.0);
        Ok(())
    }

    #[test]
    fn test_update_contracts_gap() -> Result<()> {
        let mut table = QTable::new(&[3], 2)?;
        let (state, next_state) = (s(&[0]), s(&[2]));
        table.update(&next_state, 1, 4.0, &s(&[1]), 1.0, 0.0);
        table.update(&state, 0, 2.0, &s(&[1]), 1.0, 0.0);

        let (alpha, gamma, reward) = (0.1, 0.99, -1.0);
        let q_old = table.get(&state, 0);
        let target = reward + gamma * table.max_value(&next_state);
        let td_err = table.update(&state, 0, reward, &next_state, alpha, gamma);
        let q_new = table.get(&state, 0);

        assert_eq!(td_err, target - q_old);
        assert!((q_new - target).abs() < (q_old - target).abs());
        assert!(((q_new - target).abs() - (1.0 - alpha) * (q_old - target).abs()).abs() < 1e-12);
        assert_eq!(table.get(&next_state, 1), 4.0);
        Ok(())
    }

    #[test]
    fn test_row_major_layout() -> Result<()> {
        let mut table = QTable::new(&[2, 3], 2)?;
        table.update(&s(&[1, 2]), 1, 7.0, &s(&[0, 0]), 1.0, 0.0);
        let dense = table.to_dense()?;
        assert_eq!(dense.shape(), &[2, 3, 2]);
        assert_eq!(dense[IxDyn(&[1, 2, 1])], 7.0);
        assert_eq!(table.max_values()[5], 7.0);
        Ok(())
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_state() {
        let table = QTable::new(&[2, 2], 3).unwrap();
        table.best_action(&s(&[2, 0]));
    }

    #[test]
    fn test_save_and_load() -> Result<()> {
        let mut table = QTable::new(&[4, 5], 3)?;
        table.update(&s(&[3, 1]), 2, 0.123456789, &s(&[0, 4]), 0.37, 0.99);
        table.update(&s(&[0, 4]), 0, -1.0 / 3.0, &s(&[3, 1]), 0.1, 0.99);

        let dir = TempDir::new("q_table")?;
        let path = dir.path().join("q_table.bin");
        table.save(&path)?;
        let loaded = QTable::load(&path)?;
        assert_eq!(loaded, table);
        assert!(loaded
            .max_values()
            .iter()
            .zip(table.max_values().iter())
            .all(|(a, b)| a.to_bits() == b.to_bits()));
        Ok(())
    }

    #[test]
    fn test_load_missing() -> Result<()> {
        let dir = TempDir::new("q_table")?;
        let err = QTable::load(dir.path().join("q_table.bin")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CrestError>(),
            Some(CrestError::ModelNotFound(_))
        ));
        Ok(())
    }
}
