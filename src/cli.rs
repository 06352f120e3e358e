//! Command-line parsing and text output for the headless runner.
//!
//! Usage:
//!   blockfall [--seed N] [--frames N] [--step-ms N] [--config PATH] [--script a,b,c] [--realtime]

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use blockfall::core::GameSnapshot;
use blockfall::types::{Color, Command, TICK_MS};

pub const CONFIG_ENV: &str = "BLOCKFALL_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    /// Fixed seed; None draws from entropy.
    pub seed: Option<u32>,
    pub frames: u64,
    pub step_ms: u32,
    pub config: Option<PathBuf>,
    /// One command per frame, cycling.
    pub script: Vec<Command>,
    pub realtime: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            seed: None,
            frames: 3600,
            step_ms: TICK_MS,
            config: None,
            script: Vec::new(),
            realtime: false,
        }
    }
}

impl RunArgs {
    /// Command for frame `n` of the run
    pub fn scripted_command(&self, frame: u64) -> Option<Command> {
        if self.script.is_empty() {
            return None;
        }
        Some(self.script[(frame % self.script.len() as u64) as usize])
    }
}

/// Parse arguments (without the program name). `env_config` is the value of
/// `BLOCKFALL_CONFIG`; `--config` wins over it.
pub fn parse_run_args(args: &[String], env_config: Option<String>) -> Result<RunArgs> {
    let mut out = RunArgs {
        config: env_config.filter(|s| !s.is_empty()).map(PathBuf::from),
        ..RunArgs::default()
    };

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                let v = value(args, &mut i, "--seed")?;
                out.seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--frames" => {
                let v = value(args, &mut i, "--frames")?;
                out.frames = v
                    .parse::<u64>()
                    .map_err(|_| anyhow!("invalid --frames value: {}", v))?;
            }
            "--step-ms" => {
                let v = value(args, &mut i, "--step-ms")?;
                out.step_ms = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --step-ms value: {}", v))?;
            }
            "--config" => {
                let v = value(args, &mut i, "--config")?;
                out.config = Some(PathBuf::from(v));
            }
            "--script" => {
                let v = value(args, &mut i, "--script")?;
                out.script = parse_script(v)?;
            }
            "--realtime" => {
                out.realtime = true;
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(out)
}

fn value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing value for {}", flag))
}

/// Comma-separated command names, e.g. `moveLeft,rotateCw,softDrop`
pub fn parse_script(s: &str) -> Result<Vec<Command>> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| Command::from_str(part).ok_or_else(|| anyhow!("unknown command: {}", part)))
        .collect()
}

/// Plain-text board: `.` empty, piece letter for locked cells and the active piece.
pub fn render_board(snapshot: &GameSnapshot) -> String {
    let mut out = String::with_capacity((snapshot.width as usize + 1) * snapshot.height as usize);
    for y in 0..snapshot.height as i16 {
        for x in 0..snapshot.width as i16 {
            let ch = match snapshot.visible_cell(x, y) {
                Some(color) => color_char(color),
                None => '.',
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

fn color_char(color: Color) -> char {
    match color {
        Color::Cyan => 'I',
        Color::Yellow => 'O',
        Color::Purple => 'T',
        Color::Green => 'S',
        Color::Red => 'Z',
        Color::Blue => 'J',
        Color::Orange => 'L',
    }
}
