//! Greedy policy over a trained table.
use crate::{Discretizer, QTable, Q_TABLE_FILE};
use anyhow::Result;
use crest_core::{Env, Policy};
use log::info;
use std::{marker::PhantomData, path::Path};

/// Takes the action with the largest value in the table, without exploration.
///
/// Used to evaluate a table trained by [`QLearning`](crate::QLearning).
pub struct QTablePolicy<E: Env> {
    table: QTable,
    discretizer: Discretizer,
    phantom: PhantomData<E>,
}

impl<E: Env> QTablePolicy<E> {
    /// Constructs the policy.
    ///
    /// Fails with [`CrestError::ShapeMismatch`](crest_core::error::CrestError::ShapeMismatch)
    /// if the table is not shaped by the bin counts of `discretizer`.
    pub fn new(table: QTable, discretizer: Discretizer) -> Result<Self> {
        table.check_dims(&discretizer.n_bins())?;
        Ok(Self {
            table,
            discretizer,
            phantom: PhantomData,
        })
    }

    /// Loads the table saved in `model_dir`.
    pub fn load(model_dir: impl AsRef<Path>, discretizer: Discretizer) -> Result<Self> {
        let path = model_dir.as_ref().join(Q_TABLE_FILE);
        info!("Load Q-table for evaluation from {:?}", path);
        Self::new(QTable::load(path)?, discretizer)
    }

    /// The value table.
    pub fn q_table(&self) -> &QTable {
        &self.table
    }
}

impl<E> Policy<E> for QTablePolicy<E>
where
    E: Env,
    E::Obs: AsRef<[f64]>,
    E::Act: From<usize>,
{
    fn sample(&mut self, obs: &E::Obs) -> E::Act {
        let state = self.discretizer.discretize(obs.as_ref());
        self.table.best_action(&state).into()
    }
}
