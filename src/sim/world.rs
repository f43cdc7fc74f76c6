//! Per-level runtime state and the frame step
//!
//! A `LevelWorld` is built once from a `LevelBlueprint` and owned by the host
//! for the lifetime of the level. Everything that must replay identically
//! (enemies, projectiles, runtime RNG) lives here.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionOutcome, PlayerProbe, resolve};
use super::enemy::{Enemy, EnemyKind};
use super::geometry::Rect;
use super::shooter::Projectile;
use crate::blueprint::LevelBlueprint;
use crate::consts::LEVEL_SEED_MULTIPLIER;
use crate::tuning::{PhysicsTuning, Tuning};

/// What hurt the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageSource {
    Enemy(EnemyKind),
    Projectile,
}

/// Outcomes reported to the host after a frame step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player stomped an enemy: bounce the player and award `points`
    EnemyDefeated { kind: EnemyKind, points: u32 },
    /// Player touched something hostile: take a life
    PlayerDamaged { source: DamageSource },
    /// An enemy dropped below the playfield and was removed
    EnemyFellOut { kind: EnemyKind },
    ProjectileFired,
}

/// Live state of one level
#[derive(Debug, Clone)]
pub struct LevelWorld {
    pub level_number: u32,
    pub platforms: Vec<Rect>,
    /// Live enemies in blueprint order
    pub enemies: Vec<Enemy>,
    /// Shared projectile pool, appended by shooters
    pub projectiles: Vec<Projectile>,
    pub bounds: Rect,
    pub physics: PhysicsTuning,
    /// Simulation frame counter
    pub frame: u64,
    rng: Pcg32,
}

impl LevelWorld {
    /// Build the world with a runtime RNG keyed on the level number
    pub fn from_blueprint(blueprint: &LevelBlueprint, tuning: &Tuning) -> Self {
        let seed = u64::from(blueprint.level_number) * LEVEL_SEED_MULTIPLIER;
        Self::with_seed(blueprint, tuning, seed)
    }

    /// Build the world with an explicit runtime seed (for replays across runs)
    pub fn with_seed(blueprint: &LevelBlueprint, tuning: &Tuning, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut enemies = Vec::with_capacity(blueprint.enemies.len());
        for (index, descriptor) in blueprint.enemies.iter().enumerate() {
            match Enemy::from_descriptor(descriptor, &mut rng) {
                Ok(enemy) => enemies.push(enemy),
                Err(err) => log::warn!(
                    "Level {}: skipping enemy {}: {}",
                    blueprint.level_number,
                    index,
                    err
                ),
            }
        }

        log::info!(
            "Level {} loaded: {} platforms, {} enemies",
            blueprint.level_number,
            blueprint.platforms.len(),
            enemies.len()
        );

        Self {
            level_number: blueprint.level_number,
            platforms: blueprint.platforms.clone(),
            enemies,
            projectiles: Vec::new(),
            bounds: blueprint.world_bounds(),
            physics: tuning.physics,
            frame: 0,
            rng,
        }
    }

    /// Advance every entity by one frame and evaluate collisions with the player.
    ///
    /// Order: enemy updates, projectile updates, collisions, then pruning of
    /// dead enemies and spent projectiles.
    pub fn step(&mut self, player: &PlayerProbe) -> Vec<GameEvent> {
        self.frame += 1;
        let physics = self.physics;
        let mut events = Vec::new();

        for enemy in &mut self.enemies {
            let fired = enemy.update(
                &self.platforms,
                &player.rect,
                &mut self.projectiles,
                &mut self.rng,
                &physics,
            );
            if fired {
                events.push(GameEvent::ProjectileFired);
            }
        }

        for projectile in &mut self.projectiles {
            projectile.update(&self.bounds, &physics);
        }

        for enemy in &mut self.enemies {
            match resolve(player, enemy, &physics) {
                Some(CollisionOutcome::Defeat) => {
                    let kind = enemy.kind();
                    events.push(GameEvent::EnemyDefeated {
                        kind,
                        points: kind.points(),
                    });
                }
                Some(CollisionOutcome::Damage) => events.push(GameEvent::PlayerDamaged {
                    source: DamageSource::Enemy(enemy.kind()),
                }),
                None => {}
            }
        }

        for projectile in &mut self.projectiles {
            if resolve(player, projectile, &physics).is_some() {
                events.push(GameEvent::PlayerDamaged {
                    source: DamageSource::Projectile,
                });
            }
        }

        self.enemies.retain(|enemy| {
            if !enemy.is_alive() {
                return false;
            }
            if enemy.has_fallen_out(&physics) {
                events.push(GameEvent::EnemyFellOut { kind: enemy.kind() });
                return false;
            }
            true
        });
        self.projectiles.retain(|p| p.active);

        if !events.is_empty() {
            log::trace!("Frame {}: {:?}", self.frame, events);
        }
        events
    }

    pub fn live_enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn active_projectile_count(&self) -> usize {
        self.projectiles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::{EnemyDescriptor, generate_level};
    use crate::consts::{GROUND_HEIGHT, GROUND_Y};

    fn flat_blueprint(enemies: Vec<EnemyDescriptor>) -> LevelBlueprint {
        LevelBlueprint {
            level_number: 1,
            difficulty: 1.0,
            platforms: vec![Rect::new(0.0, GROUND_Y, 2000.0, GROUND_HEIGHT)],
            enemies,
            collectibles: Vec::new(),
            end_flag: Rect::new(1900.0, GROUND_Y - 80.0, 30.0, 80.0),
            background_seed: 5000,
        }
    }

    fn far_away_player() -> PlayerProbe {
        PlayerProbe::at_rest(Rect::new(1800.0, 510.0, 30.0, 40.0))
    }

    #[test]
    fn test_world_from_generated_level() {
        for level in 1..=8 {
            let blueprint = generate_level(level);
            let world = LevelWorld::from_blueprint(&blueprint, &Tuning::default());
            assert_eq!(world.live_enemy_count(), blueprint.enemies.len());
            assert_eq!(world.active_projectile_count(), 0);
            assert_eq!(world.bounds.right(), blueprint.platforms.last().unwrap().right());
        }
    }

    #[test]
    fn test_malformed_descriptor_is_skipped() {
        let blueprint = flat_blueprint(vec![
            EnemyDescriptor::Ground {
                x: 100.0,
                y: 520.0,
                speed: 1.0,
                patrol_start: 300.0,
                patrol_end: 50.0,
            },
            EnemyDescriptor::Plasma {
                x: 500.0,
                y: 520.0,
                range: 100.0,
                fire_rate: 60,
            },
        ]);
        let world = LevelWorld::from_blueprint(&blueprint, &Tuning::default());
        assert_eq!(world.live_enemy_count(), 1);
        assert_eq!(world.enemies[0].kind(), EnemyKind::Plasma);
    }

    #[test]
    fn test_stomp_removes_enemy_and_awards_points() {
        let blueprint = flat_blueprint(vec![EnemyDescriptor::Ground {
            x: 100.0,
            y: 520.0,
            speed: 0.0,
            patrol_start: 50.0,
            patrol_end: 300.0,
        }]);
        let mut world = LevelWorld::from_blueprint(&blueprint, &Tuning::default());

        // Enemy hitbox after landing: y 520..550. Player falls from bottom 515 to 525.
        let player = PlayerProbe {
            rect: Rect::new(100.0, 485.0, 30.0, 40.0),
            previous_y: 475.0,
            velocity_y: 10.0,
        };
        let events = world.step(&player);
        assert_eq!(
            events,
            vec![GameEvent::EnemyDefeated {
                kind: EnemyKind::Ground,
                points: 100
            }]
        );
        assert_eq!(world.live_enemy_count(), 0);
    }

    #[test]
    fn test_side_contact_damages_and_keeps_enemy() {
        let blueprint = flat_blueprint(vec![EnemyDescriptor::Ground {
            x: 100.0,
            y: 520.0,
            speed: 0.0,
            patrol_start: 50.0,
            patrol_end: 300.0,
        }]);
        let mut world = LevelWorld::from_blueprint(&blueprint, &Tuning::default());
        let player = PlayerProbe::at_rest(Rect::new(110.0, 510.0, 30.0, 40.0));

        let events = world.step(&player);
        assert_eq!(
            events,
            vec![GameEvent::PlayerDamaged {
                source: DamageSource::Enemy(EnemyKind::Ground)
            }]
        );
        assert_eq!(world.live_enemy_count(), 1);
    }

    #[test]
    fn test_projectile_hits_player_and_is_pruned() {
        let blueprint = flat_blueprint(vec![EnemyDescriptor::Plasma {
            x: 500.0,
            y: 520.0,
            range: 400.0,
            fire_rate: 1,
        }]);
        let mut world = LevelWorld::from_blueprint(&blueprint, &Tuning::default());
        // Player centre level with the muzzle, 100px to the left
        let player = PlayerProbe::at_rest(Rect::new(400.0, 515.0, 30.0, 40.0));

        let mut fired = 0;
        let mut hits = 0;
        for _ in 0..40 {
            for event in world.step(&player) {
                match event {
                    GameEvent::ProjectileFired => fired += 1,
                    GameEvent::PlayerDamaged {
                        source: DamageSource::Projectile,
                    } => hits += 1,
                    _ => {}
                }
            }
        }
        assert_eq!(fired, 40);
        assert!(hits > 0);
        // Shots in flight never exceed what the distance allows
        assert!(world.active_projectile_count() < 40);
    }

    #[test]
    fn test_fallen_enemy_is_reported_and_removed() {
        let mut blueprint = flat_blueprint(vec![EnemyDescriptor::Jumping {
            x: 100.0,
            y: 520.0,
            jump_force: 10.0,
            jump_interval_min: 1000,
            jump_interval_max: 1000,
        }]);
        // No floor under the jumper
        blueprint.platforms = vec![Rect::new(1500.0, GROUND_Y, 500.0, GROUND_HEIGHT)];
        let mut world = LevelWorld::from_blueprint(&blueprint, &Tuning::default());

        let mut fell = false;
        for _ in 0..200 {
            if world
                .step(&far_away_player())
                .contains(&GameEvent::EnemyFellOut {
                    kind: EnemyKind::Jumping,
                })
            {
                fell = true;
                break;
            }
        }
        assert!(fell);
        assert_eq!(world.live_enemy_count(), 0);
    }

    #[test]
    fn test_replay_is_deterministic() {
        let blueprint = generate_level(8);
        let tuning = Tuning::default();
        let mut a = LevelWorld::from_blueprint(&blueprint, &tuning);
        let mut b = LevelWorld::from_blueprint(&blueprint, &tuning);
        let start = blueprint.platforms[0];
        let player = PlayerProbe::at_rest(Rect::new(start.x + 10.0, 510.0, 30.0, 40.0));

        for _ in 0..600 {
            assert_eq!(a.step(&player), b.step(&player));
        }
        assert_eq!(a.enemies, b.enemies);
        assert_eq!(a.projectiles, b.projectiles);
    }
}
