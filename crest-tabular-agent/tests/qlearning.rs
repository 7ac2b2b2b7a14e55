use anyhow::Result;
use crest_core::{
    dummy::{DummyEnv, DummyEnvConfig, DummyObs},
    error::CrestError,
    record::{AggregateRecorder, BufferedRecorder},
    Agent, DefaultEvaluator, Env, Evaluator, ExplorationConfig, Policy, Trainer, TrainerConfig,
    TrainingMetrics,
};
use crest_tabular_agent::{QLearning, QLearningConfig, QTablePolicy, Q_TABLE_FILE};
use tempdir::TempDir;

fn env() -> Result<DummyEnv> {
    DummyEnv::build(&DummyEnvConfig::default().goal_steps(10), 0)
}

fn agent(env: &DummyEnv) -> Result<QLearning<DummyEnv>> {
    let config = QLearningConfig::default().n_bins(vec![10, 2]).seed(7);
    QLearning::build(config, &env.obs_bounds(), env.n_actions())
}

#[test]
fn test_train_on_dummy_env() -> Result<()> {
    let dir = TempDir::new("qlearning")?;
    let model_dir = dir.path().join("model");
    let env = env()?;
    let mut agent = agent(&env)?;
    let exploration = ExplorationConfig::default().epsilon_decay(0.9).epsilon_min(0.05);
    let config = TrainerConfig::default()
        .n_episodes(50)
        .record_interval(10)
        .exploration(exploration)
        .model_dir(model_dir.to_string_lossy());
    let mut trainer = Trainer::build(config)?;
    let mut recorder: Box<dyn AggregateRecorder> = Box::new(BufferedRecorder::new());

    let metrics = trainer.train(env, &mut agent, &mut recorder)?;

    assert_eq!(metrics.len(), 50);
    assert!(metrics.rewards().iter().all(|r| *r == -10.0));
    assert!(metrics.epsilons().windows(2).all(|w| w[1] <= w[0]));
    assert!(metrics.epsilons().iter().all(|e| *e >= 0.05));
    assert_eq!(agent.n_opts(), 500);

    // Every visited value has moved towards the negative returns.
    assert!(agent.q_table().max_values().iter().all(|v| *v <= 0.0));
    assert!(model_dir.join(Q_TABLE_FILE).is_file());
    assert_eq!(
        TrainingMetrics::load(model_dir.join("training_metrics.bin"))?,
        metrics
    );
    Ok(())
}

#[test]
fn test_evaluate_saved_table() -> Result<()> {
    let dir = TempDir::new("qlearning")?;
    let env = env()?;
    let mut agent = agent(&env)?;
    let config = TrainerConfig::default().n_episodes(20).record_interval(20);
    let mut trainer = Trainer::build(config)?;
    let mut recorder: Box<dyn AggregateRecorder> = Box::new(BufferedRecorder::new());
    trainer.train(env, &mut agent, &mut recorder)?;
    agent.save_params(dir.path())?;

    let mut policy =
        QTablePolicy::<DummyEnv>::load(dir.path(), agent.discretizer().clone())?;
    assert_eq!(policy.q_table(), agent.q_table());

    let obs = DummyObs([0.35, 0.1]);
    assert_eq!(policy.sample(&obs), agent.sample(&obs));

    let mut evaluator = DefaultEvaluator::new(self::env()?, 3)?;
    let record = evaluator.evaluate(&mut policy)?;
    assert_eq!(record.get_scalar("episode_return")?, -10.0);
    assert_eq!(record.get_array1("episode_returns")?, vec![-10.0; 3]);
    Ok(())
}

#[test]
fn test_load_missing_table() -> Result<()> {
    let dir = TempDir::new("qlearning")?;
    let env = env()?;
    let agent = agent(&env)?;

    let err = QTablePolicy::<DummyEnv>::load(dir.path(), agent.discretizer().clone())
        .err()
        .unwrap();
    assert!(matches!(
        err.downcast_ref::<CrestError>(),
        Some(CrestError::ModelNotFound(_))
    ));
    Ok(())
}
