//! Meteor Storm headless driver
//!
//! Steps the simulation at a fixed frame rate with a simple autopilot and
//! reports the outcome. Stands in for the real host (renderer, audio, keys).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use meteor_storm::sim::{EntityTag, GameSnapshot, Simulation, TickInput, TickSummary};
use meteor_storm::{AudioLog, ConfigError, ConfigPreset, SimConfig, SoundEffect};

#[derive(Parser, Debug)]
#[command(name = "meteor-storm", about = "Run a headless Meteor Storm session")]
struct Args {
    /// RNG seed for meteorite spawns
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Simulated seconds to run (stops early on game over)
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,
    /// Frames per simulated second
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// JSON config overrides
    #[arg(long)]
    config: Option<PathBuf>,
    /// Base preset: classic or sprite
    #[arg(long, default_value = "classic")]
    preset: String,
    /// Print the final report as JSON
    #[arg(long)]
    json: bool,
}

/// End-of-run report
#[derive(Debug, Serialize)]
struct Report {
    seed: u64,
    frames: u64,
    seconds: f32,
    shots: usize,
    kills: usize,
    hits: usize,
    state: GameSnapshot,
}

fn load_config(args: &Args) -> Result<SimConfig, ConfigError> {
    match &args.config {
        Some(path) => SimConfig::load(path),
        None => {
            let preset = ConfigPreset::parse(&args.preset).unwrap_or_else(|| {
                log::warn!("Unknown preset '{}', using Classic", args.preset);
                ConfigPreset::Classic
            });
            Ok(SimConfig::from_preset(preset))
        }
    }
}

/// Chase the lowest meteorite horizontally and keep the trigger held
fn autopilot(summary: &TickSummary) -> TickInput {
    let ship_x = summary
        .entities
        .iter()
        .find(|e| e.kind == EntityTag::Ship)
        .map(|e| e.pos.x)
        .unwrap_or(0.0);
    let target_x = summary
        .entities
        .iter()
        .filter(|e| e.kind == EntityTag::Meteorite)
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|e| e.pos.x)
        .unwrap_or(0.0);

    TickInput {
        x: ((target_x - ship_x) / 20.0).clamp(-1.0, 1.0),
        y: 0.0,
        shoot: true,
        ..Default::default()
    }
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut sim = match Simulation::new(config, args.seed, AudioLog::default()) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let fps = args.fps.max(1);
    let dt = 1.0 / fps as f32;
    let total_frames = (args.seconds.max(0.0) * fps as f32).round() as u64;

    let mut summary = sim.step(&TickInput::default(), 0.0);
    let mut frames = 0;
    while frames < total_frames && !summary.state.is_game_over {
        let input = autopilot(&summary);
        summary = sim.step(&input, dt);
        frames += 1;

        if !summary.events.is_empty() && frames % u64::from(fps) == 0 {
            log::info!("[{:>6.2}s] {}", frames as f32 * dt, summary.state);
        }
    }

    let audio = sim.audio();
    let report = Report {
        seed: args.seed,
        frames,
        seconds: frames as f32 * dt,
        shots: audio.count(SoundEffect::Shoot),
        kills: audio.count(SoundEffect::Explosion),
        hits: audio.count(SoundEffect::Hit),
        state: summary.state,
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                log::error!("Failed to encode report: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!(
            "{} after {:.1}s ({} shots, {} kills, {} hits)",
            report.state, report.seconds, report.shots, report.kills, report.hits
        );
        log::info!("{}", sim.debug_info());
    }
    ExitCode::SUCCESS
}
