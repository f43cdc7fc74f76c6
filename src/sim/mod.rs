//! Deterministic per-frame simulation
//!
//! Enemy behavior and collision outcomes. This module must stay pure and
//! deterministic:
//! - Frame-counted timers only (no wall clock)
//! - Seeded RNG only
//! - Stable iteration order (blueprint order)
//! - No rendering, input or platform dependencies

pub mod collision;
pub mod enemy;
pub mod geometry;
pub mod jumper;
pub mod patroller;
pub mod shooter;
pub mod world;

pub use collision::{Collider, CollisionOutcome, PlayerProbe, classify, resolve};
pub use enemy::{Enemy, EnemyKind};
pub use geometry::{Rect, land_on_platforms};
pub use jumper::JumpingEnemy;
pub use patroller::{Direction, GroundPatroller};
pub use shooter::{PlasmaShooter, Projectile};
pub use world::{DamageSource, GameEvent, LevelWorld};
