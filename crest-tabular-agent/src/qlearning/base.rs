//! Q-learning agent on a discretized observation space.
use super::QLearningConfig;
use crate::{Discretizer, EpsilonGreedy, QTable, Q_TABLE_FILE};
use anyhow::Result;
use crest_core::{
    error::CrestError,
    record::{Record, RecordValue},
    Agent, Env, ExplorationState, ObsBounds, Policy, Transition,
};
use rand::{rngs::SmallRng, SeedableRng};
use std::{fs, marker::PhantomData, path::Path};

/// Tabular Q-learning agent.
///
/// The agent owns the value table and the discretizer. Exploration rate and
/// learning rate come from the [`ExplorationState`] given by the trainer.
pub struct QLearning<E: Env> {
    table: QTable,
    discretizer: Discretizer,
    explorer: EpsilonGreedy,
    discount_factor: f64,
    n_opts: usize,
    rng: SmallRng,
    phantom: PhantomData<E>,
}

impl<E> QLearning<E>
where
    E: Env,
    E::Obs: AsRef<[f64]>,
    E::Act: From<usize> + Into<usize>,
{
    /// Constructs an agent with a zero-filled table.
    ///
    /// `bounds` and `n_actions` are the metadata of the environment.
    pub fn build(config: QLearningConfig, bounds: &ObsBounds, n_actions: usize) -> Result<Self> {
        config.validate()?;
        let discretizer = Discretizer::new(bounds, &config.n_bins)?;
        let table = QTable::new(&discretizer.n_bins(), n_actions)?;

        Ok(Self {
            table,
            discretizer,
            explorer: EpsilonGreedy::new(),
            discount_factor: config.discount_factor,
            n_opts: 0,
            rng: SmallRng::seed_from_u64(config.seed),
            phantom: PhantomData,
        })
    }

    /// The value table.
    pub fn q_table(&self) -> &QTable {
        &self.table
    }

    /// The discretizer.
    pub fn discretizer(&self) -> &Discretizer {
        &self.discretizer
    }

    /// The number of optimization steps so far.
    pub fn n_opts(&self) -> usize {
        self.n_opts
    }

    /// Updates the value of the visited pair and returns the TD error.
    fn update(&mut self, transition: &Transition<E>, state: &ExplorationState) -> f64 {
        let s = self.discretizer.discretize(transition.obs.as_ref());
        let next_s = self.discretizer.discretize(transition.next_obs.as_ref());
        let act: usize = transition.act.clone().into();
        self.n_opts += 1;
        self.table.update(
            &s,
            act,
            transition.reward,
            &next_s,
            state.learning_rate,
            self.discount_factor,
        )
    }
}

impl<E> Policy<E> for QLearning<E>
where
    E: Env,
    E::Obs: AsRef<[f64]>,
    E::Act: From<usize> + Into<usize>,
{
    /// Takes the greedy action.
    fn sample(&mut self, obs: &E::Obs) -> E::Act {
        let state = self.discretizer.discretize(obs.as_ref());
        self.table.best_action(&state).into()
    }
}

impl<E> Agent<E> for QLearning<E>
where
    E: Env,
    E::Obs: AsRef<[f64]>,
    E::Act: From<usize> + Into<usize>,
{
    fn sample_with_exploration(&mut self, obs: &E::Obs, state: &ExplorationState) -> E::Act {
        let s = self.discretizer.discretize(obs.as_ref());
        self.explorer
            .action(&self.table, &s, state.epsilon, &mut self.rng)
            .into()
    }

    fn opt(&mut self, transition: &Transition<E>, state: &ExplorationState) {
        self.update(transition, state);
    }

    fn opt_with_record(&mut self, transition: &Transition<E>, state: &ExplorationState) -> Record {
        let td_err = self.update(transition, state);
        Record::from_slice(&[("td_error", RecordValue::Scalar(td_err))])
    }

    fn save_params(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)?;
        self.table.save(path.join(Q_TABLE_FILE))
    }

    fn load_params(&mut self, path: &Path) -> Result<()> {
        let table = QTable::load(path.join(Q_TABLE_FILE))?;
        let mut expected = self.discretizer.n_bins();
        expected.push(self.table.n_actions());
        if table.shape() != expected {
            return Err(CrestError::ShapeMismatch {
                expected,
                found: table.shape(),
            }
            .into());
        }
        self.table = table;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crest_core::dummy::{DummyAct, DummyEnv, DummyEnvConfig, DummyObs};
    use tempdir::TempDir;

    fn agent(n_bins: Vec<usize>) -> Result<QLearning<DummyEnv>> {
        let env = DummyEnv::build(&DummyEnvConfig::default(), 0)?;
        let config = QLearningConfig::default().n_bins(n_bins);
        QLearning::build(config, &env.obs_bounds(), env.n_actions())
    }

    fn transition(act: usize, reward: f64) -> Transition<DummyEnv> {
        Transition {
            obs: DummyObs([0.05, 0.1]),
            act: DummyAct(act),
            reward,
            next_obs: DummyObs([0.15, 0.1]),
            is_terminated: false,
            is_truncated: false,
        }
    }

    #[test]
    fn test_opt_updates_visited_pair() -> Result<()> {
        let mut agent = agent(vec![10, 4])?;
        let state = ExplorationState {
            epsilon: 0.0,
            learning_rate: 0.5,
        };
        let record = agent.opt_with_record(&transition(2, 3.0), &state);
        assert_eq!(record.get_scalar("td_error")?, 3.0);

        let s = agent.discretizer().discretize(&[0.05, 0.1]);
        assert_eq!(agent.q_table().get(&s, 2), 1.5);
        assert_eq!(agent.sample(&DummyObs([0.05, 0.1])), DummyAct(2));
        assert_eq!(
            agent.sample_with_exploration(&DummyObs([0.05, 0.1]), &state),
            DummyAct(2)
        );
        assert_eq!(agent.n_opts(), 1);
        Ok(())
    }

    #[test]
    fn test_opt_matches_opt_with_record() -> Result<()> {
        let (mut agent1, mut agent2) = (agent(vec![10, 4])?, agent(vec![10, 4])?);
        let state = ExplorationState {
            epsilon: 0.0,
            learning_rate: 0.3,
        };
        for (act, reward) in [(0, -1.0), (2, 4.0), (0, 2.0)] {
            agent1.opt(&transition(act, reward), &state);
            agent2.opt_with_record(&transition(act, reward), &state);
        }
        assert_eq!(agent1.q_table(), agent2.q_table());
        assert_eq!(agent1.n_opts(), 3);
        assert_eq!(agent2.n_opts(), 3);
        Ok(())
    }

    #[test]
    fn test_save_and_load_params() -> Result<()> {
        let dir = TempDir::new("qlearning")?;
        let mut agent1 = agent(vec![10, 4])?;
        let state = ExplorationState {
            epsilon: 1.0,
            learning_rate: 0.1,
        };
        agent1.opt(&transition(1, -1.0), &state);
        agent1.save_params(dir.path())?;

        let mut agent2 = agent(vec![10, 4])?;
        agent2.load_params(dir.path())?;
        assert_eq!(agent1.q_table(), agent2.q_table());

        let mut agent3 = agent(vec![5, 5])?;
        let err = agent3.load_params(dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CrestError>(),
            Some(CrestError::ShapeMismatch { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_invalid_discount_factor() {
        let env = DummyEnv::build(&DummyEnvConfig::default(), 0).unwrap();
        let config = QLearningConfig::default().discount_factor(1.5);
        assert!(QLearning::<DummyEnv>::build(config, &env.obs_bounds(), 3).is_err());
    }
}
