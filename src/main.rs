//! Episode runner.
//!
//! Run with:
//! `cargo run --release -- --episodes 10 --policy random --seed 7`
//! `RUST_LOG=debug cargo run -- --config env.json --policy uniform`
//!
//! Prints one JSON summary line per episode.

use std::env;
use std::fs;

use log::{info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use lynx::environment::chess_environment::ChessEnvironment;
use lynx::environment::config::EnvConfig;
use lynx::environment::policies::{Policy, RandomLegalPolicy, UniformActionPolicy};
use lynx::utils::render_observation::render_observation;

#[derive(Debug, Clone)]
struct RunOptions {
    episodes: usize,
    seed: u64,
    policy: String,
    config: EnvConfig,
}

#[derive(Debug, Serialize)]
struct EpisodeSummary<'a> {
    episode: usize,
    policy: &'a str,
    self_color: i32,
    plies: u32,
    steps: usize,
    reward: f32,
    final_record: String,
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{flag} needs a value"))?;
    value
        .parse::<T>()
        .map_err(|_| format!("invalid value '{value}' for {flag}"))
}

fn parse_args(args: &[String]) -> Result<RunOptions, String> {
    let mut options = RunOptions {
        episodes: 1,
        seed: 0,
        policy: "random".to_owned(),
        config: EnvConfig::default(),
    };
    let mut color = None;
    let mut max_plies = None;

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--episodes" => options.episodes = parse_value(flag, iter.next())?,
            "--seed" => options.seed = parse_value(flag, iter.next())?,
            "--policy" => options.policy = parse_value(flag, iter.next())?,
            "--color" => color = Some(parse_value::<i32>(flag, iter.next())?),
            "--max-plies" => max_plies = Some(parse_value::<u32>(flag, iter.next())?),
            "--config" => {
                let path: String = parse_value(flag, iter.next())?;
                let text = fs::read_to_string(&path).map_err(|e| format!("{path}: {e}"))?;
                options.config = EnvConfig::from_json(&text).map_err(|e| e.to_string())?;
            }
            other => return Err(format!("unknown argument '{other}'")),
        }
    }

    // Flags override the config file.
    if let Some(color) = color {
        options.config.self_color = color;
    }
    if max_plies.is_some() {
        options.config.max_episode_plies = max_plies;
    }
    options.config.validate().map_err(|e| e.to_string())?;

    Ok(options)
}

fn run_episodes<P: Policy>(options: &RunOptions, policy: &mut P) -> Result<(), String> {
    let mut env: ChessEnvironment =
        ChessEnvironment::new(options.config.clone()).map_err(|e| e.to_string())?;

    for episode in 0..options.episodes {
        env.reset().map_err(|e| e.to_string())?;
        let mut steps = 0usize;

        let reward = loop {
            let action = policy.choose_action(&env);
            let step = env.step(&action).map_err(|e| e.to_string())?;
            steps += 1;

            if let Ok(board) = render_observation(&step.observation) {
                trace!("after {action:?}\n{board}");
            }
            if step.terminal() {
                break step.reward;
            }
        };

        info!(
            "episode {episode} finished after {} plies with reward {reward}",
            env.plies()
        );

        let summary = EpisodeSummary {
            episode,
            policy: policy.name(),
            self_color: env.config().self_color,
            plies: env.plies(),
            steps,
            reward,
            final_record: env.record(),
        };
        println!(
            "{}",
            serde_json::to_string(&summary).map_err(|e| e.to_string())?
        );
    }

    Ok(())
}

fn main() -> Result<(), String> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = parse_args(&args)?;
    info!(
        "running {} episode(s) with the {} policy, seed {}",
        options.episodes, options.policy, options.seed
    );

    let rng = StdRng::seed_from_u64(options.seed);
    match options.policy.as_str() {
        "random" => run_episodes(&options, &mut RandomLegalPolicy::new(rng)),
        "uniform" => run_episodes(&options, &mut UniformActionPolicy::new(rng)),
        other => Err(format!("unknown policy '{other}', expected random or uniform")),
    }
}
