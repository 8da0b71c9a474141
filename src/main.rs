//! Hero Maze headless runner
//!
//! Plays a session with the autopilot at the wheel and logs the outcome.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use hero_maze::Tuning;
use hero_maze::sim::{Autopilot, GameEvent, GameState, tick};

/// Frames simulated when `--frames` is not given
const DEFAULT_FRAMES: u64 = 20_000;

/// Frames kept running after a win so the settled state is visible
const FRAMES_AFTER_WIN: u64 = 60;

#[derive(Debug, Parser)]
#[command(name = "hero-maze", about = "Run a Hero Maze session with the autopilot")]
struct Cli {
    /// Tuning JSON file; built-in defaults when omitted
    tuning: Option<PathBuf>,

    /// Maximum number of frames to simulate
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    frames: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Tuning::default(),
    };

    log::info!("Hero Maze (headless) starting, up to {} frames", cli.frames);
    let mut state = GameState::new(tuning);
    let mut pilot = Autopilot::new();
    let mut won_on = None;

    while !state.close_requested() && state.frame < cli.frames {
        let input = pilot.next_input(&state);
        tick(&mut state, &input);

        if won_on.is_none() && state.events.contains(&GameEvent::Won) {
            won_on = Some(state.frame);
        }
        if let Some(frame) = won_on {
            if state.frame >= frame + FRAMES_AFTER_WIN {
                break;
            }
        }
    }

    log::info!(
        "Finished after {} frames: {}/{} tiles, caught {} times, hero scale {:.2}",
        state.frame,
        state.tiles.visited_count(),
        state.tiles.len(),
        state.times_caught,
        state.hero.body.scale.x,
    );
    match (won_on, state.close_reason()) {
        (Some(frame), _) => log::info!("Maze completed on frame {frame}"),
        (None, Some(reason)) => log::info!("Session closed: {reason:?}"),
        (None, None) => log::info!("Frame limit reached"),
    }
    Ok(())
}
