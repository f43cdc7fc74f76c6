//! Plasma shooter and its projectiles
//!
//! The shooter never moves. While the player is within horizontal range it
//! charges a frame counter and fires one aimed shot every `fire_rate` frames.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Collider;
use super::geometry::Rect;
use crate::consts::{ENEMY_SIZE, PROJECTILE_SIZE};
use crate::error::SpawnError;
use crate::tuning::PhysicsTuning;

/// A plasma bolt travelling in a straight line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub rect: Rect,
    pub velocity: Vec2,
    pub active: bool,
}

impl Projectile {
    /// Spawn a projectile centred on `center`
    pub fn new(center: Vec2, velocity: Vec2) -> Self {
        Self {
            rect: Rect::new(
                center.x - PROJECTILE_SIZE / 2.0,
                center.y - PROJECTILE_SIZE / 2.0,
                PROJECTILE_SIZE,
                PROJECTILE_SIZE,
            ),
            velocity,
            active: true,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.rect.x, self.rect.y)
    }

    /// Move by one frame of velocity; deactivate once outside `world` plus margin.
    ///
    /// Deactivation is permanent.
    pub fn update(&mut self, world: &Rect, physics: &PhysicsTuning) {
        if !self.active {
            return;
        }

        self.rect.translate(self.velocity);

        if !world
            .expanded(physics.projectile_margin)
            .contains_point(self.position())
        {
            self.active = false;
        }
    }
}

impl Collider for Projectile {
    fn hitbox(&self) -> Rect {
        self.rect
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn stompable(&self) -> bool {
        false
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlasmaShooter {
    pub rect: Rect,
    /// Maximum horizontal distance (centre to centre) at which it charges
    pub range: f32,
    /// Frames of charging per shot
    pub fire_rate: u32,
    pub fire_timer: u32,
    pub alive: bool,
}

impl PlasmaShooter {
    pub fn new(x: f32, y: f32, range: f32, fire_rate: u32) -> Result<Self, SpawnError> {
        if fire_rate == 0 {
            return Err(SpawnError::InvalidFireRate);
        }
        Ok(Self {
            rect: Rect::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
            range,
            fire_rate,
            fire_timer: 0,
            alive: true,
        })
    }

    pub fn in_range(&self, player: &Rect) -> bool {
        (player.center().x - self.rect.center().x).abs() <= self.range
    }

    /// Advance one frame. Returns true when a projectile was added to `projectiles`.
    pub fn update(
        &mut self,
        player: &Rect,
        projectiles: &mut Vec<Projectile>,
        physics: &PhysicsTuning,
    ) -> bool {
        if !self.alive || !self.in_range(player) {
            return false;
        }

        self.fire_timer += 1;
        if self.fire_timer < self.fire_rate {
            return false;
        }
        self.fire_timer = 0;

        let origin = self.rect.center();
        // Player exactly on top of the muzzle: shoot straight up
        let direction = (player.center() - origin)
            .try_normalize()
            .unwrap_or(Vec2::NEG_Y);
        projectiles.push(Projectile::new(origin, direction * physics.projectile_speed));
        log::debug!("Plasma shot from ({:.0}, {:.0})", origin.x, origin.y);
        true
    }
}

impl Collider for PlasmaShooter {
    fn hitbox(&self) -> Rect {
        self.rect
    }

    fn is_active(&self) -> bool {
        self.alive
    }

    fn deactivate(&mut self) {
        self.alive = false;
    }
}
