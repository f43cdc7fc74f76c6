//! Player-versus-enemy collision outcomes
//!
//! One rule for every hostile entity: coming down onto an enemy from above
//! defeats it, any other overlap damages the player. The caller owns the side
//! effects (bounce, score, lives); this module only classifies and flips
//! liveness.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::tuning::PhysicsTuning;

/// What the player looks like for collision purposes this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerProbe {
    /// Hitbox after this frame's movement
    pub rect: Rect,
    /// Top edge before this frame's vertical movement
    pub previous_y: f32,
    /// Positive means falling
    pub velocity_y: f32,
}

impl PlayerProbe {
    /// A player standing still at `rect`
    pub fn at_rest(rect: Rect) -> Self {
        Self {
            rect,
            previous_y: rect.y,
            velocity_y: 0.0,
        }
    }

    /// Bottom edge before this frame's vertical movement
    #[inline]
    pub fn previous_bottom(&self) -> f32 {
        self.previous_y + self.rect.height
    }
}

/// Classification of a player overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionOutcome {
    /// Player landed on top; the enemy is removed and the player bounces
    Defeat,
    /// Any other contact; the player loses a life
    Damage,
}

/// Classify an overlap between the player and a hostile hitbox.
///
/// Returns `None` when the rectangles do not overlap.
pub fn classify(
    player: &PlayerProbe,
    target: &Rect,
    stomp_tolerance: f32,
) -> Option<CollisionOutcome> {
    if !player.rect.intersects(target) {
        return None;
    }

    let falling = player.velocity_y > 0.0;
    let came_from_above = player.previous_bottom() <= target.top() + stomp_tolerance;

    if falling && came_from_above {
        Some(CollisionOutcome::Defeat)
    } else {
        Some(CollisionOutcome::Damage)
    }
}

/// Anything hostile the player can touch
pub trait Collider {
    fn hitbox(&self) -> Rect;

    /// Dead enemies and spent projectiles never collide
    fn is_active(&self) -> bool;

    /// Whether landing on top defeats this collider (projectiles always hurt)
    fn stompable(&self) -> bool {
        true
    }

    /// Take the collider out of play
    fn deactivate(&mut self);
}

/// Evaluate and apply the collision contract for one collider.
///
/// A `Defeat` deactivates the collider. A projectile is also spent when it
/// deals `Damage`.
pub fn resolve<C: Collider + ?Sized>(
    player: &PlayerProbe,
    collider: &mut C,
    physics: &PhysicsTuning,
) -> Option<CollisionOutcome> {
    if !collider.is_active() {
        return None;
    }

    let outcome = match classify(player, &collider.hitbox(), physics.stomp_tolerance)? {
        CollisionOutcome::Defeat if collider.stompable() => CollisionOutcome::Defeat,
        _ => CollisionOutcome::Damage,
    };

    match outcome {
        CollisionOutcome::Defeat => collider.deactivate(),
        CollisionOutcome::Damage if !collider.stompable() => collider.deactivate(),
        CollisionOutcome::Damage => {}
    }

    log::trace!("Collision outcome: {:?}", outcome);
    Some(outcome)
}
