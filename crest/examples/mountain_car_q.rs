use anyhow::Result;
use clap::{Parser, ValueEnum};
use crest_core::{
    record::{AggregateRecorder, NullRecorder},
    DefaultEvaluator, Env, Evaluator as _, RewardShaped, RewardShapedConfig, Trainer,
    TrainerConfig, TrainingMetrics,
};
use crest_mountain_car_env::{
    MountainCarConfig, MountainCarEnv, MountainCarShaper, MountainCarShaperConfig,
};
use crest_tabular_agent::{
    Discretizer, QLearning, QLearningConfig, QTable, QTablePolicy, Q_TABLE_FILE,
};
use crest_tensorboard::TensorboardRecorder;
use log::{info, warn};
use serde::Serialize;
use std::{fs, path::Path};

const N_EPISODES: usize = 200_000;
const RECORD_INTERVAL: usize = 10_000;
const N_EPISODES_PER_EVAL: usize = 5;
const MOVING_AVERAGE_WINDOW: usize = 100;
const METRICS_FILE: &str = "training_metrics.bin";
const METRICS_CSV_FILE: &str = "training_metrics.csv";
const MODEL_DIR: &str = "./crest/examples/model/mountain_car_q";

type ShapedEnv = RewardShaped<MountainCarEnv, MountainCarShaper>;
type ShapedEnvConfig = RewardShapedConfig<MountainCarConfig, MountainCarShaperConfig>;

mod config {
    use super::*;

    #[derive(Serialize)]
    pub struct MountainCarQConfig {
        pub env_config: ShapedEnvConfig,
        pub agent_config: QLearningConfig,
        pub trainer_config: TrainerConfig,
    }

    impl MountainCarQConfig {
        pub fn new(n_episodes: usize, model_dir: &str) -> Self {
            let env_config = ShapedEnvConfig::new(
                MountainCarConfig::default(),
                MountainCarShaperConfig::default(),
            );
            let agent_config = QLearningConfig::default();
            let trainer_config = TrainerConfig::default()
                .n_episodes(n_episodes)
                .record_interval(RECORD_INTERVAL.min(n_episodes).max(1))
                .model_dir(model_dir);
            Self {
                env_config,
                agent_config,
                trainer_config,
            }
        }

        /// Writes the configuration as YAML in the model directory.
        pub fn save(&self, model_dir: &str) -> Result<()> {
            fs::create_dir_all(model_dir)?;
            let path = Path::new(model_dir).join("config.yaml");
            fs::write(&path, serde_yaml::to_string(self)?)?;
            info!("Saved the configuration in {:?}", path);
            Ok(())
        }
    }
}

use config::MountainCarQConfig;

/// Which reward the greedy policy is scored with.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum EvalReward {
    /// `-1` per step of the simulator.
    Raw,

    /// The reward used in training.
    Shaped,
}

/// Train/eval Q-learning agent in mountain car environment
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Train the agent, not evaluate
    #[arg(short, long, default_value_t = false)]
    train: bool,

    /// Evaluate the saved agent, not train
    #[arg(short, long, default_value_t = false)]
    eval: bool,

    /// Summarize the saved training metrics and Q-table
    #[arg(short, long, default_value_t = false)]
    report: bool,

    /// Write training records for Tensorboard in the model directory
    #[arg(long, default_value_t = false)]
    tensorboard: bool,

    /// Reward used in evaluation
    #[arg(long, value_enum, default_value_t = EvalReward::Raw)]
    eval_reward: EvalReward,

    /// The number of training episodes
    #[arg(long, default_value_t = N_EPISODES)]
    episodes: usize,

    /// Directory of the trained model
    #[arg(long, default_value_t = MODEL_DIR.to_string())]
    model_dir: String,
}

fn create_recorder(args: &Args, model_dir: &str) -> Box<dyn AggregateRecorder> {
    match args.tensorboard {
        true => Box::new(TensorboardRecorder::new(model_dir)),
        false => Box::new(NullRecorder::new()),
    }
}

fn train(args: &Args, n_episodes: usize, model_dir: &str) -> Result<TrainingMetrics> {
    let config = MountainCarQConfig::new(n_episodes, model_dir);
    config.save(model_dir)?;
    let mut recorder = create_recorder(args, model_dir);
    let mut trainer = Trainer::build(config.trainer_config.clone())?;

    let env = ShapedEnv::build(&config.env_config, 0)?;
    let mut agent = QLearning::build(
        config.agent_config.clone(),
        &env.obs_bounds(),
        env.n_actions(),
    )?;

    let metrics = trainer.train(env, &mut agent, &mut recorder)?;
    if let Some(avg) = metrics.recent_mean(MOVING_AVERAGE_WINDOW) {
        info!(
            "Training finished, average reward of the last {} episodes: {:.2}",
            MOVING_AVERAGE_WINDOW, avg
        );
    }

    Ok(metrics)
}

fn evaluate<E>(env: E, model_dir: &str, agent_config: &QLearningConfig) -> Result<f64>
where
    E: Env,
    E::Obs: AsRef<[f64]>,
    E::Act: From<usize>,
{
    let discretizer = Discretizer::new(&env.obs_bounds(), &agent_config.n_bins)?;
    let mut policy = QTablePolicy::<E>::load(model_dir, discretizer)?;
    let record = DefaultEvaluator::new(env, N_EPISODES_PER_EVAL)?.evaluate(&mut policy)?;
    let avg = record.get_scalar("episode_return")?;
    info!(
        "Average return of the greedy policy over {} episodes: {:.2}",
        N_EPISODES_PER_EVAL, avg
    );
    Ok(avg)
}

fn eval(model_dir: &str, eval_reward: EvalReward) -> Result<f64> {
    let config = MountainCarQConfig::new(N_EPISODES, model_dir);
    match eval_reward {
        EvalReward::Raw => {
            let env = MountainCarEnv::build(&config.env_config.env_config, 0)?;
            evaluate(env, model_dir, &config.agent_config)
        }
        EvalReward::Shaped => {
            let env = ShapedEnv::build(&config.env_config, 0)?;
            evaluate(env, model_dir, &config.agent_config)
        }
    }
}

fn report_metrics(metrics: &TrainingMetrics, model_dir: &Path) -> Result<()> {
    info!("Episodes: {}", metrics.len());
    if let Some(epsilon) = metrics.epsilons().last() {
        info!("Final epsilon: {:.4}", epsilon);
    }

    let ma = metrics.moving_average(MOVING_AVERAGE_WINDOW);
    match (ma.first(), ma.last()) {
        (Some(first), Some(last)) => {
            let (best_ix, best) = ma
                .iter()
                .enumerate()
                .fold((0, f64::NEG_INFINITY), |acc, (i, &v)| {
                    if v > acc.1 {
                        (i, v)
                    } else {
                        acc
                    }
                });
            info!(
                "Moving average reward (window {}): first {:.2}, last {:.2}, best {:.2} at episode {}",
                MOVING_AVERAGE_WINDOW,
                first,
                last,
                best,
                best_ix + MOVING_AVERAGE_WINDOW
            );
        }
        _ => info!(
            "Fewer episodes than the moving average window ({})",
            MOVING_AVERAGE_WINDOW
        ),
    }

    let path = model_dir.join(METRICS_CSV_FILE);
    metrics.write_csv(&path)?;
    info!("Exported training metrics to {:?}", path);
    Ok(())
}

fn report_q_table(table: &QTable) {
    let max_values = table.max_values();
    let n = max_values.len() as f64;
    let min = max_values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = max_values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = max_values.iter().sum::<f64>() / n;
    info!("Q-table shape: {:?}", table.shape());
    info!(
        "Max Q-values over states: min {:.3}, mean {:.3}, max {:.3}",
        min, mean, max
    );
}

fn report(model_dir: &str) -> Result<()> {
    let model_dir = Path::new(model_dir);

    match TrainingMetrics::load(model_dir.join(METRICS_FILE)) {
        Ok(metrics) => report_metrics(&metrics, model_dir)?,
        Err(e) => warn!("Skipped training metrics: {}", e),
    }

    match QTable::load(model_dir.join(Q_TABLE_FILE)) {
        Ok(table) => report_q_table(&table),
        Err(e) => warn!("Skipped Q-table: {}", e),
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let model_dir = args.model_dir.clone();
    let run_all = !(args.train || args.eval || args.report);

    if args.train || run_all {
        train(&args, args.episodes, &model_dir)?;
    }
    if args.eval || run_all {
        eval(&model_dir, args.eval_reward)?;
    }
    if args.report || run_all {
        report(&model_dir)?;
    }

    Ok(())
}
