//! Live enemy entities
//!
//! `Enemy` wraps the three archetypes so the world can hold them in a single
//! ordered collection and dispatch by pattern match.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Collider;
use super::geometry::Rect;
use super::jumper::JumpingEnemy;
use super::patroller::GroundPatroller;
use super::shooter::{PlasmaShooter, Projectile};
use crate::blueprint::EnemyDescriptor;
use crate::consts::WORLD_HEIGHT;
use crate::error::SpawnError;
use crate::tuning::PhysicsTuning;

/// Archetype tag, used in events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Ground,
    Plasma,
    Jumping,
}

impl EnemyKind {
    /// Score for defeating this kind of enemy
    pub fn points(self) -> u32 {
        match self {
            EnemyKind::Ground => 100,
            EnemyKind::Jumping => 150,
            EnemyKind::Plasma => 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Enemy {
    Ground(GroundPatroller),
    Plasma(PlasmaShooter),
    Jumping(JumpingEnemy),
}

impl Enemy {
    /// Instantiate a live enemy from its blueprint descriptor.
    ///
    /// `rng` seeds per-entity randomness (the jumper's first timer).
    pub fn from_descriptor<R: Rng + ?Sized>(
        descriptor: &EnemyDescriptor,
        rng: &mut R,
    ) -> Result<Self, SpawnError> {
        let enemy = match *descriptor {
            EnemyDescriptor::Ground {
                x,
                y,
                speed,
                patrol_start,
                patrol_end,
            } => Enemy::Ground(GroundPatroller::new(x, y, speed, patrol_start, patrol_end)?),
            EnemyDescriptor::Plasma {
                x,
                y,
                range,
                fire_rate,
            } => Enemy::Plasma(PlasmaShooter::new(x, y, range, fire_rate)?),
            EnemyDescriptor::Jumping {
                x,
                y,
                jump_force,
                jump_interval_min,
                jump_interval_max,
            } => Enemy::Jumping(JumpingEnemy::new(
                x,
                y,
                jump_force,
                jump_interval_min,
                jump_interval_max,
                rng,
            )?),
        };
        Ok(enemy)
    }

    pub fn kind(&self) -> EnemyKind {
        match self {
            Enemy::Ground(_) => EnemyKind::Ground,
            Enemy::Plasma(_) => EnemyKind::Plasma,
            Enemy::Jumping(_) => EnemyKind::Jumping,
        }
    }

    fn collider(&self) -> &dyn Collider {
        match self {
            Enemy::Ground(e) => e,
            Enemy::Plasma(e) => e,
            Enemy::Jumping(e) => e,
        }
    }

    fn collider_mut(&mut self) -> &mut dyn Collider {
        match self {
            Enemy::Ground(e) => e,
            Enemy::Plasma(e) => e,
            Enemy::Jumping(e) => e,
        }
    }

    pub fn rect(&self) -> Rect {
        self.collider().hitbox()
    }

    pub fn is_alive(&self) -> bool {
        self.collider().is_active()
    }

    /// Dropped below the playable area
    pub fn has_fallen_out(&self, physics: &PhysicsTuning) -> bool {
        self.rect().top() > WORLD_HEIGHT + physics.fall_out_margin
    }

    /// Advance one frame. Returns true when a shooter fired this frame.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        platforms: &[Rect],
        player: &Rect,
        projectiles: &mut Vec<Projectile>,
        rng: &mut R,
        physics: &PhysicsTuning,
    ) -> bool {
        match self {
            Enemy::Ground(e) => {
                e.update(platforms, physics);
                false
            }
            Enemy::Plasma(e) => e.update(player, projectiles, physics),
            Enemy::Jumping(e) => {
                e.update(platforms, rng, physics);
                false
            }
        }
    }
}

impl Collider for Enemy {
    fn hitbox(&self) -> Rect {
        self.collider().hitbox()
    }

    fn is_active(&self) -> bool {
        self.collider().is_active()
    }

    fn deactivate(&mut self) {
        self.collider_mut().deactivate();
    }
}
