//! Lava Runner headless driver
//!
//! Loads level plans (or the built-in demo set), runs each level at a fixed
//! timestep and logs what happens. Player input is not simulated: the player
//! stands where it spawned while fireballs and coins move around it.
//!
//! Usage: `lava-runner [PLANS.json] [--settings FILE] [--seed N] [--seconds SECONDS]`

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use lava_runner::sim::{LevelEvent, LevelParser, LevelStatus, tick};
use lava_runner::{Plan, Settings, SimResult, parse_plans, plans};

/// Coin under the player, fireball bouncing into the player, and a level
/// nobody can finish standing still
const DEMO_PLANS: &str = r#"[
    [" o ", " @ ", "xxx"],
    ["      ", "@  =  ", "xxxxxx"],
    ["x   v   x", "x @   o x", "xxx!!!xxx"]
]"#;

#[derive(Parser, Debug)]
#[command(name = "lava-runner")]
#[command(about = "Run tile platformer levels headless and log the outcome")]
struct Cli {
    /// JSON file holding an array of level plans (built-in demo when omitted)
    plans: Option<PathBuf>,

    /// Settings file (JSON)
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Seed for coin phases, overrides the settings file
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Simulated time budget per level, overrides the settings file
    #[arg(long, value_name = "SECONDS")]
    seconds: Option<f64>,
}

/// Run one level until it finishes or the time budget runs out
fn run_level(
    index: usize,
    plan: &Plan,
    parser: &mut LevelParser,
    settings: &Settings,
) -> SimResult<LevelStatus> {
    let mut level = parser.parse(plan).with_finish_delay(settings.finish_delay);
    log::info!(
        "Level {index}: {}x{}, {} actors",
        level.width(),
        level.height(),
        level.actors().len()
    );

    for step in 0..settings.max_ticks() {
        for event in tick(&mut level, settings.sim_dt)? {
            match event {
                LevelEvent::CoinCollected(id) => {
                    log::info!("  tick {step}: coin {} collected", id.get())
                }
                LevelEvent::Won => log::info!("  tick {step}: all coins collected"),
                LevelEvent::Lost(cause) => {
                    log::info!("  tick {step}: player touched {}", cause.as_str())
                }
            }
        }
        if level.is_finished() {
            break;
        }
    }

    Ok(level.status())
}

fn run(args: Cli) -> SimResult<()> {
    let mut settings = match &args.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if let Some(seconds) = args.seconds {
        settings.max_seconds = seconds;
    }

    let plans = match &args.plans {
        Some(path) => plans::load_plans(path)?,
        None => parse_plans(DEMO_PLANS)?,
    };

    let mut parser = LevelParser::with_seed(&settings.symbol_table(), settings.seed);
    for (index, plan) in plans.iter().enumerate() {
        match run_level(index, plan, &mut parser, &settings)? {
            LevelStatus::Won => log::info!("Level {index}: won"),
            LevelStatus::Lost => log::info!("Level {index}: lost"),
            LevelStatus::Running => log::warn!(
                "Level {index}: still running after {}s",
                settings.max_seconds
            ),
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
