//! Difficulty and physics tuning
//!
//! Every field has a default matching the reference campaign, so a tuning file
//! only needs to name what it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LEVEL;
use crate::error::TuningError;

/// Upper bound on the jumper's sideways takeoff kick (pixels/frame)
pub const MAX_JUMP_IMPULSE_X: f32 = 100.0;

/// Per-frame physics constants shared by every enemy archetype
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Downward acceleration added to vertical velocity each frame
    pub gravity: f32,
    /// Terminal fall speed
    pub max_fall_speed: f32,
    /// Horizontal velocity multiplier applied to jumpers every frame
    pub jump_friction: f32,
    /// Jumpers pick a horizontal impulse in [-x, x] on takeoff
    pub jump_impulse_x: f32,
    /// Plasma projectile speed (pixels/frame)
    pub projectile_speed: f32,
    /// Projectiles die once this far outside the world rectangle
    pub projectile_margin: f32,
    /// Slack when deciding whether the player came down on top of an enemy
    pub stomp_tolerance: f32,
    /// Entities below WORLD_HEIGHT + this have fallen out
    pub fall_out_margin: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            max_fall_speed: 15.0,
            jump_friction: 0.95,
            jump_impulse_x: 3.0,
            projectile_speed: 5.0,
            projectile_margin: 100.0,
            stomp_tolerance: 10.0,
            fall_out_margin: 100.0,
        }
    }
}

/// Top-level tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Last level of the campaign (difficulty reaches 2.0 here)
    pub max_level: u32,
    pub physics: PhysicsTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_level: MAX_LEVEL,
            physics: PhysicsTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.max_level < 2 {
            return Err(TuningError::Invalid(format!(
                "max_level must be at least 2, got {}",
                self.max_level
            )));
        }
        let physics = &self.physics;
        let fields = [
            ("gravity", physics.gravity),
            ("max_fall_speed", physics.max_fall_speed),
            ("jump_friction", physics.jump_friction),
            ("jump_impulse_x", physics.jump_impulse_x),
            ("projectile_speed", physics.projectile_speed),
            ("projectile_margin", physics.projectile_margin),
            ("stomp_tolerance", physics.stomp_tolerance),
            ("fall_out_margin", physics.fall_out_margin),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(TuningError::Invalid(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }
        if physics.projectile_speed <= 0.0 {
            return Err(TuningError::Invalid(
                "projectile_speed must be positive".to_string(),
            ));
        }
        if physics.max_fall_speed <= 0.0 {
            return Err(TuningError::Invalid(format!(
                "max_fall_speed must be positive, got {}",
                physics.max_fall_speed
            )));
        }
        if !(physics.jump_friction > 0.0 && physics.jump_friction <= 1.0) {
            return Err(TuningError::Invalid(format!(
                "jump_friction must be in (0, 1], got {}",
                physics.jump_friction
            )));
        }
        if physics.gravity < 0.0 || physics.stomp_tolerance < 0.0 {
            return Err(TuningError::Invalid(
                "gravity and stomp_tolerance cannot be negative".to_string(),
            ));
        }
        // The takeoff kick is drawn from [-x, x]; its width must stay finite
        if !(0.0..=MAX_JUMP_IMPULSE_X).contains(&physics.jump_impulse_x) {
            return Err(TuningError::Invalid(format!(
                "jump_impulse_x must be in [0, {}], got {}",
                MAX_JUMP_IMPULSE_X, physics.jump_impulse_x
            )));
        }
        Ok(())
    }
}
