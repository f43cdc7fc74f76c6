//! Jumping enemy
//!
//! Sits on a platform counting down a frame timer. When the timer runs out
//! while grounded it leaps with a random sideways kick and draws a fresh timer
//! from its `[min, max]` interval. Landing never touches the timer.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Collider;
use super::geometry::{Rect, land_on_platforms};
use crate::consts::ENEMY_SIZE;
use crate::error::SpawnError;
use crate::tuning::PhysicsTuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpingEnemy {
    pub rect: Rect,
    pub velocity: Vec2,
    /// Upward impulse applied on takeoff
    pub jump_force: f32,
    interval_min: u32,
    interval_max: u32,
    jump_timer: i32,
    pub grounded: bool,
    pub alive: bool,
}

impl JumpingEnemy {
    /// Build a jumper with its first timer drawn from `[interval_min, interval_max]`
    pub fn new<R: Rng + ?Sized>(
        x: f32,
        y: f32,
        jump_force: f32,
        interval_min: u32,
        interval_max: u32,
        rng: &mut R,
    ) -> Result<Self, SpawnError> {
        if interval_min > interval_max {
            return Err(SpawnError::InvalidJumpInterval {
                min: interval_min,
                max: interval_max,
            });
        }

        let mut enemy = Self {
            rect: Rect::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
            velocity: Vec2::ZERO,
            jump_force,
            interval_min,
            interval_max,
            jump_timer: 0,
            grounded: false,
            alive: true,
        };
        enemy.jump_timer = enemy.draw_timer(rng);
        Ok(enemy)
    }

    fn draw_timer<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        let frames = rng.random_range(self.interval_min..=self.interval_max);
        i32::try_from(frames).unwrap_or(i32::MAX)
    }

    /// Frames until the next jump (may be <= 0 while waiting to land)
    pub fn jump_timer(&self) -> i32 {
        self.jump_timer
    }

    pub fn jump_interval(&self) -> (u32, u32) {
        (self.interval_min, self.interval_max)
    }

    /// Advance one frame. Returns true when the enemy took off this frame.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        platforms: &[Rect],
        rng: &mut R,
        physics: &PhysicsTuning,
    ) -> bool {
        if !self.alive {
            return false;
        }

        self.jump_timer -= 1;
        let jumped = self.jump_timer <= 0 && self.grounded;
        if jumped {
            let kick = physics.jump_impulse_x;
            self.velocity.y = -self.jump_force;
            self.velocity.x = rng.random_range(-kick..=kick);
            self.grounded = false;
            self.jump_timer = self.draw_timer(rng);
            log::trace!("Jumper takeoff, next jump in {} frames", self.jump_timer);
        }

        self.velocity.x *= physics.jump_friction;
        self.rect.x += self.velocity.x;

        let previous_bottom = self.rect.bottom();
        self.velocity.y = (self.velocity.y + physics.gravity).min(physics.max_fall_speed);
        self.rect.y += self.velocity.y;

        self.grounded = self.velocity.y >= 0.0
            && land_on_platforms(&mut self.rect, previous_bottom, platforms);
        if self.grounded {
            self.velocity.y = 0.0;
        }

        jumped
    }
}

impl Collider for JumpingEnemy {
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
