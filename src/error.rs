//! Error types
//!
//! Generation and per-frame simulation never fail; these cover the two places
//! where bad input can be rejected up front: tuning files and entity construction.

/// Rejected tuning/configuration input
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    #[error("Tuning JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid tuning: {0}")]
    Invalid(String),
}

/// An enemy descriptor that cannot be turned into a live entity
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SpawnError {
    #[error("Patrol span is empty or inverted: start {start} >= end {end}")]
    InvalidPatrol { start: f32, end: f32 },

    #[error("Jump interval is inverted: min {min} > max {max}")]
    InvalidJumpInterval { min: u32, max: u32 },

    #[error("Fire rate must be at least one frame")]
    InvalidFireRate,
}
