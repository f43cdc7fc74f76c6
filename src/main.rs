//! Skyhop command-line entry point
//!
//! Dumps level and backdrop blueprints as JSON and runs headless frame
//! simulations against a stationary player.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use skyhop::sim::{GameEvent, LevelWorld, PlayerProbe, Rect};
use skyhop::{Tuning, generate_background_with, generate_level_with};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Optional tuning JSON file (missing fields keep their defaults)
    #[arg(short, long, global = true)]
    tuning: Option<String>,

    /// Pretty-print JSON output
    #[arg(short, long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the level blueprint for a level number
    Level { level: u32 },
    /// Print the parallax backdrop blueprint for a level number
    Background { level: u32 },
    /// Run the level's enemies for a number of frames with the player parked at the start
    Simulate {
        level: u32,
        #[arg(short, long, default_value_t = 600)]
        frames: u64,
    },
}

#[derive(Serialize)]
struct SimulationSummary {
    level: u32,
    frames: u64,
    enemies_at_start: usize,
    enemies_remaining: usize,
    projectiles_in_flight: usize,
    events: BTreeMap<&'static str, u32>,
}

fn event_name(event: &GameEvent) -> &'static str {
    match event {
        GameEvent::EnemyDefeated { .. } => "enemy_defeated",
        GameEvent::PlayerDamaged { .. } => "player_damaged",
        GameEvent::EnemyFellOut { .. } => "enemy_fell_out",
        GameEvent::ProjectileFired => "projectile_fired",
    }
}

fn simulate(level: u32, frames: u64, tuning: &Tuning) -> SimulationSummary {
    let blueprint = generate_level_with(level, tuning);
    let mut world = LevelWorld::from_blueprint(&blueprint, tuning);
    let enemies_at_start = world.live_enemy_count();

    // Player parked on the first platform
    let start = blueprint.platforms.first().copied().unwrap_or_default();
    let player =
        PlayerProbe::at_rest(Rect::new(start.x + 10.0, start.top() - 40.0, 30.0, 40.0));

    let mut events = BTreeMap::new();
    for _ in 0..frames {
        for event in world.step(&player) {
            *events.entry(event_name(&event)).or_insert(0) += 1;
        }
    }

    SimulationSummary {
        level: blueprint.level_number,
        frames,
        enemies_at_start,
        enemies_remaining: world.live_enemy_count(),
        projectiles_in_flight: world.active_projectile_count(),
        events,
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => {
            Tuning::load(path).with_context(|| format!("Failed to load tuning file: {}", path))?
        }
        None => Tuning::default(),
    };

    match args.command {
        Command::Level { level } => print_json(&generate_level_with(level, &tuning), args.pretty),
        Command::Background { level } => {
            print_json(&generate_background_with(level, &tuning), args.pretty)
        }
        Command::Simulate { level, frames } => {
            log::info!("Simulating level {} for {} frames", level, frames);
            print_json(&simulate(level, frames, &tuning), args.pretty)
        }
    }
}
