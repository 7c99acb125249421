//! Shoot Boss headless runner
//!
//! Drives the simulation with the autopilot for a fixed number of frames and
//! prints the final frame as JSON. Useful for soak tests and balance passes.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use shoot_boss::consts::FRAME_DT;
use shoot_boss::sim::{Autopilot, FrameSnapshot, GameEvent, Simulation};
use shoot_boss::{Settings, Tuning};

#[derive(Parser, Debug)]
#[command(name = "shoot-boss")]
#[command(about = "Headless autopilot run of the Shoot Boss simulation")]
struct Cli {
    /// Frames to simulate (60 per second)
    #[arg(long, default_value_t = 60 * 60)]
    frames: u64,
    /// Autopilot RNG seed
    #[arg(long, default_value_t = 0x5eed_b055)]
    seed: u64,
    /// Balance overrides (JSON)
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Player preferences (JSON)
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let tuning = match &cli.tuning {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read tuning file {}", path.display()))?;
            Tuning::from_json(&json)
                .with_context(|| format!("invalid tuning in {}", path.display()))?
        }
        None => Tuning::default(),
    };

    let settings = match &cli.settings {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file {}", path.display()))?;
            Settings::from_json(&json)
                .with_context(|| format!("invalid settings in {}", path.display()))?
        }
        None => Settings::default(),
    };

    log::info!("Shoot Boss (headless) running {} frames", cli.frames);
    let snapshot = run(Simulation::with_tuning(tuning), &settings, cli.seed, cli.frames);

    log::info!("{} | {}", snapshot.boss_label(), snapshot.player_label());
    let json = serde_json::to_string_pretty(&snapshot).context("failed to serialize snapshot")?;
    println!("{}", json);
    Ok(())
}

fn run(mut sim: Simulation, settings: &Settings, seed: u64, frames: u64) -> FrameSnapshot {
    let mut pilot = Autopilot::new(seed, settings.difficulty());
    let mut snapshot = sim.snapshot(Vec::new());
    let mut volleys = 0u64;
    let mut shots = 0u64;

    for _ in 0..frames {
        let input = pilot.next_input(&sim);
        snapshot = sim.step(&input, FRAME_DT);

        for event in &snapshot.events {
            match event {
                GameEvent::BossVolley { .. } => volleys += 1,
                GameEvent::PlayerFired { .. } => shots += 1,
                // The options dialog would open here; close it straight away
                GameEvent::ShowOptions => sim.resume_after(settings.resume_delay_frames),
                _ => {}
            }
        }
    }

    log::info!(
        "Ran {} frames: {} player shots, {} boss volleys, {} live actors",
        frames,
        shots,
        volleys,
        sim.live_count()
    );
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["shoot-boss"]).unwrap();
        assert_eq!(cli.frames, 3600);
        assert!(cli.tuning.is_none());
        assert!(cli.settings.is_none());
    }

    #[test]
    fn test_cli_flags() {
        let cli =
            Cli::try_parse_from(["shoot-boss", "--frames", "100", "--tuning", "balance.json"])
                .unwrap();
        assert_eq!(cli.frames, 100);
        assert_eq!(cli.tuning, Some(PathBuf::from("balance.json")));
    }

    #[test]
    fn test_cli_rejects_positional() {
        assert!(Cli::try_parse_from(["shoot-boss", "100"]).is_err());
    }
}
