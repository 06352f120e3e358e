//! Headless blockfall runner (default binary).
//!
//! Runs one game without a terminal UI: a frame scheduler supplies elapsed time, a
//! scripted command (if any) is queued before every frame, events are logged, and the
//! final board and totals are printed when the run ends.

mod cli;

use anyhow::{Context, Result};
use log::{info, warn};

use blockfall::core::{EngineConfig, GameState, RandomSource};
use blockfall::engine::{FrameScheduler, GameDriver, RealtimeFrames, SimulatedFrames};
use blockfall::types::GameEvent;

use cli::{parse_run_args, render_board, RunArgs, CONFIG_ENV};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let run_args = parse_run_args(&args, std::env::var(CONFIG_ENV).ok())?;

    let config = match &run_args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    match run_args.seed {
        Some(seed) => {
            info!("seed {}", seed);
            let game = GameState::with_config(config, seed)?;
            run(game, &run_args)
        }
        None => {
            let game = GameState::with_rng(config, fastrand::Rng::new())?;
            run(game, &run_args)
        }
    }
}

fn run<R: RandomSource>(game: GameState<R>, args: &RunArgs) -> Result<()> {
    let mut driver = GameDriver::new(game);
    driver.add_listener(log_event);
    driver.game_mut().start();

    let mut scheduler: Box<dyn FrameScheduler> = if args.realtime {
        Box::new(RealtimeFrames::new(args.step_ms).with_max_frames(args.frames))
    } else {
        Box::new(SimulatedFrames::new(args.step_ms, args.frames))
    };

    let summary = driver.run(scheduler.as_mut(), |frame| args.scripted_command(frame));

    let snapshot = driver.snapshot();
    print!("{}", render_board(&snapshot));
    println!(
        "frames: {}  score: {}  lines: {}  level: {}{}",
        summary.frames,
        snapshot.score,
        snapshot.lines,
        snapshot.level,
        if summary.game_over { "  (game over)" } else { "" }
    );
    Ok(())
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::LevelChanged {
            level,
            drop_interval_ms,
        } => info!("level {} (drop every {}ms)", level, drop_interval_ms),
        GameEvent::LinesChanged { lines, cleared } => {
            info!("cleared {} line(s), {} total", cleared, lines)
        }
        GameEvent::GameOver { score, lines, level } => warn!(
            "game over with score {} ({} lines, level {})",
            score, lines, level
        ),
        _ => {}
    }
}
