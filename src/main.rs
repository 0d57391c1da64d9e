//! Headless runner (default binary).
//!
//! Plays a seeded game with a scripted input pattern, or plays back a
//! recorded replay, then prints the final snapshot. No terminal rendering.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use nestris::engine::{run_replay_from, FrameInput, GameSnapshot, Replay};
use nestris::types::{Action, Direction, HeldInputs};
use nestris::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore};

#[derive(Debug, Parser)]
#[command(name = "nestris", about = "Deterministic NES-style Tetris engine runner")]
struct Cli {
    #[arg(long, help = "Randomizer seed (random if omitted)")]
    seed: Option<u32>,

    #[arg(long, default_value_t = 0, help = "Starting level (capped at 99)")]
    start_level: u32,

    #[arg(long, default_value_t = 3600, help = "Frames to simulate when no replay is given")]
    frames: usize,

    #[arg(long, help = "Play back a JSON replay instead of the scripted game")]
    replay: Option<PathBuf>,

    #[arg(long, help = "Write the generated input as a JSON replay")]
    record: Option<PathBuf>,

    #[arg(long, help = "Load and update the high score in this JSON file")]
    high_score_file: Option<PathBuf>,

    #[arg(long, help = "Run the game twice and fail if the results differ")]
    verify_determinism: bool,

    #[arg(long, default_value = "info", help = "Log filter when RUST_LOG is unset")]
    log_level: String,

    #[arg(long, help = "Print the final snapshot as JSON")]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&cli.log_level))?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    let replay = match &cli.replay {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading replay {}", path.display()))?;
            Replay::from_json(&text).with_context(|| format!("parsing replay {}", path.display()))?
        }
        None => scripted_replay(cli.seed.unwrap_or_else(rand_seed), cli.start_level, cli.frames),
    };

    if let Some(path) = &cli.record {
        fs::write(path, replay.to_json()?).with_context(|| format!("writing replay {}", path.display()))?;
        info!(path = %path.display(), frames = replay.frames.len(), "replay written");
    }

    let mut store: Box<dyn HighScoreStore> = match &cli.high_score_file {
        Some(path) => Box::new(FileHighScoreStore::new(path)),
        None => Box::new(MemoryHighScoreStore::default()),
    };
    let stored = store.load().unwrap_or_else(|err| {
        warn!(error = %err, "could not load high score, starting from 0");
        0
    });

    let initial = replay.initial_state().with_high_score(stored);
    let outcome = run_replay_from(initial.clone(), &replay)?;
    if cli.verify_determinism {
        let again = run_replay_from(initial, &replay)?;
        if again != outcome {
            bail!("replay of seed {} diverged between runs", replay.seed);
        }
        info!(events = outcome.events.len(), "determinism verified");
    }

    let final_state = outcome.state;
    if final_state.high_score() > stored {
        store.save(final_state.high_score())?;
    }

    print_snapshot(&final_state.snapshot(), cli.json)
}

fn rand_seed() -> u32 {
    nestris::core::Randomizer::from_entropy().seed()
}

/// Start, then sweep left and right with periodic rotations and soft drops
fn scripted_replay(seed: u32, start_level: u32, frames: usize) -> Replay {
    let mut replay = Replay::new(seed, start_level);
    replay.push(FrameInput::new(&[Action::Start], HeldInputs::default()));

    for i in 0..frames {
        let direction = match (i / 40) % 4 {
            0 => Direction::Left,
            2 => Direction::Right,
            _ => Direction::None,
        };
        let actions: &[Action] = if i % 53 == 0 { &[Action::RotateCw] } else { &[] };
        let held = HeldInputs {
            direction,
            soft_drop: i % 7 < 3,
        };
        replay.push(FrameInput::new(actions, held));
    }
    replay
}

fn print_snapshot(snapshot: &GameSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", snapshot.to_json()?);
        return Ok(());
    }

    for row in snapshot.board.iter().skip(usize::from(nestris::types::HIDDEN_ROWS)) {
        let line: String = row.iter().map(|&c| if c == 0 { '.' } else { '#' }).collect();
        println!("{line}");
    }
    println!(
        "status={:?} score={} high={} level={} lines={} tetrises={} frame={} seed={}",
        snapshot.status,
        snapshot.score,
        snapshot.high_score,
        snapshot.level,
        snapshot.lines,
        snapshot.tetrises,
        snapshot.frame,
        snapshot.seed
    );
    Ok(())
}
