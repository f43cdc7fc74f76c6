//! Skyhop - side-scrolling platformer core
//!
//! Core modules:
//! - `blueprint`: Deterministic level and backdrop blueprints (seeded, replayable)
//! - `sim`: Per-frame enemy behavior, projectiles and collision outcomes
//! - `tuning`: Data-driven difficulty and physics knobs
//! - `error`: Error types for configuration and entity construction

pub mod blueprint;
pub mod error;
pub mod sim;
pub mod tuning;

pub use blueprint::{
    BackgroundBlueprint, LevelBlueprint, SeededSource, generate_background,
    generate_background_with, generate_level, generate_level_with,
};
pub use error::{SpawnError, TuningError};
pub use tuning::{PhysicsTuning, Tuning};

/// Game configuration constants
pub mod consts {
    /// Number of levels in the reference campaign
    pub const MAX_LEVEL: u32 = 8;

    /// Playfield height; anything below this (plus margin) has fallen out
    pub const WORLD_HEIGHT: f32 = 600.0;
    /// Top edge of ground-tier platforms
    pub const GROUND_Y: f32 = 550.0;
    pub const GROUND_HEIGHT: f32 = 50.0;
    pub const RAISED_HEIGHT: f32 = 20.0;

    /// Platform widths are drawn from [MIN, MIN + SPAN)
    pub const PLATFORM_MIN_WIDTH: f32 = 150.0;
    pub const PLATFORM_WIDTH_SPAN: f32 = 250.0;
    /// Exit landing pad width
    pub const FINAL_PLATFORM_WIDTH: f32 = 300.0;
    /// Platforms narrower than this never host an enemy
    pub const MIN_ENEMY_PLATFORM_WIDTH: f32 = 100.0;

    /// Enemy hitbox (all archetypes)
    pub const ENEMY_SIZE: f32 = 30.0;
    pub const PROJECTILE_SIZE: f32 = 10.0;
    pub const COIN_SIZE: f32 = 20.0;
    pub const EXTRA_LIFE_SIZE: f32 = 24.0;

    /// Exit flag dimensions
    pub const FLAG_WIDTH: f32 = 30.0;
    pub const FLAG_HEIGHT: f32 = 80.0;

    /// Horizontal extent of the parallax backdrop
    pub const BACKDROP_WIDTH: f32 = 3200.0;

    /// Seed multipliers (level number * multiplier)
    pub const LEVEL_SEED_MULTIPLIER: u64 = 1000;
    pub const BACKGROUND_SEED_MULTIPLIER: u64 = 5000;
}

/// Clamp a requested level into `[1, max_level]`, falling back to level 1.
///
/// Out-of-range requests are not fatal; they produce a warning for the host.
pub fn sanitize_level(level: u32, max_level: u32) -> u32 {
    if (1..=max_level).contains(&level) {
        level
    } else {
        log::warn!(
            "Level {} outside 1..={}, falling back to level 1",
            level,
            max_level
        );
        1
    }
}

/// Affine difficulty multiplier: 1.0 at level 1, 2.0 at `max_level`
#[inline]
pub fn difficulty_for_level(level: u32, max_level: u32) -> f32 {
    let span = max_level.saturating_sub(1).max(1);
    1.0 + (level.saturating_sub(1)) as f32 / span as f32
}
