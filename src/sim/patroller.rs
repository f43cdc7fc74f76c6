//! Ground patroller
//!
//! Walks back and forth between two x coordinates. The span is closed: touching
//! either end flips direction and the walker is clamped inside, so it can never
//! leave its patrol path however large its speed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Collider;
use super::geometry::{Rect, land_on_platforms};
use crate::consts::ENEMY_SIZE;
use crate::error::SpawnError;
use crate::tuning::PhysicsTuning;

/// Horizontal walking direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1 for left, +1 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundPatroller {
    pub rect: Rect,
    pub velocity: Vec2,
    pub speed: f32,
    pub direction: Direction,
    patrol_start: f32,
    patrol_end: f32,
    pub grounded: bool,
    pub alive: bool,
}

impl GroundPatroller {
    /// Build a patroller walking right from `x`.
    ///
    /// Rejects an empty or inverted span; a spawn outside the span is clamped in.
    pub fn new(
        x: f32,
        y: f32,
        speed: f32,
        patrol_start: f32,
        patrol_end: f32,
    ) -> Result<Self, SpawnError> {
        // Also rejects NaN bounds
        if !(patrol_start < patrol_end) {
            return Err(SpawnError::InvalidPatrol {
                start: patrol_start,
                end: patrol_end,
            });
        }

        Ok(Self {
            rect: Rect::new(
                x.clamp(patrol_start, patrol_end),
                y,
                ENEMY_SIZE,
                ENEMY_SIZE,
            ),
            velocity: Vec2::ZERO,
            speed: speed.abs(),
            direction: Direction::Right,
            patrol_start,
            patrol_end,
            grounded: false,
            alive: true,
        })
    }

    pub fn patrol_bounds(&self) -> (f32, f32) {
        (self.patrol_start, self.patrol_end)
    }

    /// Advance one frame: patrol step, then gravity and landing
    pub fn update(&mut self, platforms: &[Rect], physics: &PhysicsTuning) {
        if !self.alive {
            return;
        }

        self.velocity.x = self.speed * self.direction.sign();
        self.rect.x += self.velocity.x;

        if self.rect.x >= self.patrol_end {
            self.rect.x = self.patrol_end;
            self.direction = Direction::Left;
        } else if self.rect.x <= self.patrol_start {
            self.rect.x = self.patrol_start;
            self.direction = Direction::Right;
        }

        let previous_bottom = self.rect.bottom();
        self.velocity.y = (self.velocity.y + physics.gravity).min(physics.max_fall_speed);
        self.rect.y += self.velocity.y;

        self.grounded = self.velocity.y >= 0.0
            && land_on_platforms(&mut self.rect, previous_bottom, platforms);
        if self.grounded {
            self.velocity.y = 0.0;
        }
    }
}

impl Collider for GroundPatroller {
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
