//! Level blueprint generation
//!
//! A level is a left-to-right run of platforms ending in a landing pad with the
//! exit flag. Everything is drawn from one `SeededSource` keyed on the level
//! number, so regenerating a level reproduces it exactly.

use serde::{Deserialize, Serialize};

use super::seeded::SeededSource;
use crate::consts::*;
use crate::sim::Rect;
use crate::tuning::Tuning;
use crate::{difficulty_for_level, sanitize_level};

/// Spawn parameters for one enemy, by archetype
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EnemyDescriptor {
    /// Walks back and forth inside `[patrol_start, patrol_end]`
    Ground {
        x: f32,
        y: f32,
        speed: f32,
        patrol_start: f32,
        patrol_end: f32,
    },
    /// Stationary turret firing at the player while within `range`
    Plasma {
        x: f32,
        y: f32,
        range: f32,
        /// Frames between shots
        fire_rate: u32,
    },
    /// Hops at random intervals drawn from `[min, max]` frames
    Jumping {
        x: f32,
        y: f32,
        jump_force: f32,
        jump_interval_min: u32,
        jump_interval_max: u32,
    },
}

impl EnemyDescriptor {
    /// Spawn position (top-left of the hitbox)
    pub fn position(&self) -> (f32, f32) {
        match *self {
            EnemyDescriptor::Ground { x, y, .. }
            | EnemyDescriptor::Plasma { x, y, .. }
            | EnemyDescriptor::Jumping { x, y, .. } => (x, y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectibleKind {
    Coin,
    ExtraLife,
}

/// A pickup placed above a platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub rect: Rect,
}

/// Immutable description of one level's content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelBlueprint {
    pub level_number: u32,
    /// Difficulty multiplier in [1.0, 2.0]
    pub difficulty: f32,
    /// Left to right; the last entry is the exit landing pad
    pub platforms: Vec<Rect>,
    pub enemies: Vec<EnemyDescriptor>,
    pub collectibles: Vec<Collectible>,
    pub end_flag: Rect,
    pub background_seed: u64,
}

impl LevelBlueprint {
    /// Playable area: from x = 0 to the end of the last platform, full height
    pub fn world_bounds(&self) -> Rect {
        let right = self
            .platforms
            .iter()
            .map(Rect::right)
            .fold(0.0_f32, f32::max);
        Rect::new(0.0, 0.0, right, WORLD_HEIGHT)
    }

    /// Horizontal gaps between consecutive platforms
    pub fn gaps(&self) -> Vec<f32> {
        self.platforms
            .windows(2)
            .map(|pair| pair[1].left() - pair[0].right())
            .collect()
    }

    /// Mean gap width; 0 for a single-platform level
    pub fn average_gap(&self) -> f32 {
        let gaps = self.gaps();
        if gaps.is_empty() {
            return 0.0;
        }
        gaps.iter().sum::<f32>() / gaps.len() as f32
    }

    /// The exit landing pad
    pub fn final_platform(&self) -> Option<&Rect> {
        self.platforms.last()
    }

    pub fn coin_count(&self) -> usize {
        self.collectibles
            .iter()
            .filter(|c| c.kind == CollectibleKind::Coin)
            .count()
    }
}

/// Generate a level with the reference tuning
pub fn generate_level(level: u32) -> LevelBlueprint {
    generate_level_with(level, &Tuning::default())
}

/// Generate a level; out-of-range levels fall back to level 1 with a warning
pub fn generate_level_with(level: u32, tuning: &Tuning) -> LevelBlueprint {
    let level = sanitize_level(level, tuning.max_level);
    let mut rng = SeededSource::new(level as u64 * LEVEL_SEED_MULTIPLIER);
    let difficulty = difficulty_for_level(level, tuning.max_level);

    let platforms = generate_platforms(&mut rng, difficulty);
    let enemies = generate_enemies(&mut rng, &platforms, difficulty);
    let collectibles = generate_collectibles(&mut rng, &platforms, difficulty);
    let end_flag = place_end_flag(&platforms);

    let blueprint = LevelBlueprint {
        level_number: level,
        difficulty,
        platforms,
        enemies,
        collectibles,
        end_flag,
        background_seed: level as u64 * BACKGROUND_SEED_MULTIPLIER,
    };

    log::debug!(
        "Level {}: difficulty={:.2}, platforms={}, enemies={}, collectibles={}, avg gap={:.1}",
        level,
        difficulty,
        blueprint.platforms.len(),
        blueprint.enemies.len(),
        blueprint.collectibles.len(),
        blueprint.average_gap()
    );

    blueprint
}

/// Number of generated platforms before the landing pad (fewer when harder)
pub fn platform_count_for(difficulty: f32) -> usize {
    (12 - (difficulty * 2.0).floor() as i32).max(1) as usize
}

/// Number of enemies to place (more when harder)
pub fn enemy_count_for(difficulty: f32) -> usize {
    (2.0 + (difficulty - 1.0) * 3.0).floor() as usize
}

fn generate_platforms(rng: &mut SeededSource, difficulty: f32) -> Vec<Rect> {
    let count = platform_count_for(difficulty);
    let mut platforms = Vec::with_capacity(count + 1);
    let mut x = 0.0_f32;

    for _ in 0..count {
        let width = PLATFORM_MIN_WIDTH + rng.next() * PLATFORM_WIDTH_SPAN;
        let raised = rng.chance(0.5);
        let platform = if raised {
            let y = GROUND_Y - 100.0 - rng.next() * 150.0;
            Rect::new(x, y, width, RAISED_HEIGHT)
        } else {
            Rect::new(x, GROUND_Y, width, GROUND_HEIGHT)
        };
        platforms.push(platform);

        // Gap grows strictly with difficulty; the draw only adds jitter
        let gap = 100.0 + 50.0 * (difficulty - 1.0) + rng.next() * 30.0;
        x += width + gap;
    }

    platforms.push(Rect::new(x, GROUND_Y, FINAL_PLATFORM_WIDTH, GROUND_HEIGHT));
    platforms
}

fn generate_enemies(
    rng: &mut SeededSource,
    platforms: &[Rect],
    difficulty: f32,
) -> Vec<EnemyDescriptor> {
    let playable = &platforms[..platforms.len().saturating_sub(1)];
    let candidates: Vec<&Rect> = playable
        .iter()
        .filter(|p| p.width > MIN_ENEMY_PLATFORM_WIDTH)
        .collect();

    if candidates.is_empty() {
        log::debug!("No platform wide enough for enemies");
        return Vec::new();
    }

    let count = enemy_count_for(difficulty);
    let plasma_chance = (difficulty - 1.0) * 0.4;
    let mut enemies = Vec::with_capacity(count);

    for _ in 0..count {
        let platform = candidates[rng.index(candidates.len())];
        let y = platform.top() - ENEMY_SIZE;

        let roll = rng.next();
        let enemy = if roll < plasma_chance {
            let fire_rate = (120.0 - 40.0 * (difficulty - 1.0) + rng.next() * 30.0).floor();
            EnemyDescriptor::Plasma {
                x: platform.center().x - ENEMY_SIZE / 2.0,
                y,
                range: 300.0 + 100.0 * (difficulty - 1.0),
                fire_rate: fire_rate.max(1.0) as u32,
            }
        } else if roll < plasma_chance + (1.0 - plasma_chance) * 0.6 {
            let patrol_start = platform.left() + 10.0;
            let patrol_end = platform.right() - 10.0 - ENEMY_SIZE;
            EnemyDescriptor::Ground {
                x: patrol_start + rng.next() * (patrol_end - patrol_start),
                y,
                speed: 1.0 + (difficulty - 1.0) + rng.next() * 0.5,
                patrol_start,
                patrol_end,
            }
        } else {
            let min = (90.0 - 30.0 * (difficulty - 1.0)).round() as u32;
            EnemyDescriptor::Jumping {
                x: platform.left() + rng.next() * (platform.width - ENEMY_SIZE),
                y,
                jump_force: 10.0 + 2.0 * (difficulty - 1.0),
                jump_interval_min: min,
                jump_interval_max: min + 90,
            }
        };
        enemies.push(enemy);
    }

    enemies
}

fn generate_collectibles(
    rng: &mut SeededSource,
    platforms: &[Rect],
    difficulty: f32,
) -> Vec<Collectible> {
    let skip_chance = 0.1 + 0.2 * (difficulty - 1.0);
    let mut collectibles = Vec::new();

    for platform in platforms {
        if rng.chance(skip_chance) {
            continue;
        }
        let coins = 1 + rng.index(3);
        let spacing = platform.width / (coins + 1) as f32;
        for i in 0..coins {
            let cx = platform.left() + spacing * (i + 1) as f32;
            collectibles.push(Collectible {
                kind: CollectibleKind::Coin,
                rect: Rect::new(
                    cx - COIN_SIZE / 2.0,
                    platform.top() - 40.0,
                    COIN_SIZE,
                    COIN_SIZE,
                ),
            });
        }
    }

    // Extra lives only on raised platforms, and fewer of them later on
    let lives = if difficulty < 1.5 { 2 } else { 1 };
    let mut raised: Vec<&Rect> = platforms.iter().filter(|p| p.top() < GROUND_Y).collect();
    for _ in 0..lives {
        if raised.is_empty() {
            break;
        }
        let platform = raised.remove(rng.index(raised.len()));
        collectibles.push(Collectible {
            kind: CollectibleKind::ExtraLife,
            rect: Rect::new(
                platform.center().x - EXTRA_LIFE_SIZE / 2.0,
                platform.top() - 60.0,
                EXTRA_LIFE_SIZE,
                EXTRA_LIFE_SIZE,
            ),
        });
    }

    collectibles
}

fn place_end_flag(platforms: &[Rect]) -> Rect {
    let pad = platforms
        .last()
        .copied()
        .unwrap_or(Rect::new(0.0, GROUND_Y, FINAL_PLATFORM_WIDTH, GROUND_HEIGHT));
    Rect::new(
        pad.right() - 60.0 - FLAG_WIDTH,
        pad.top() - FLAG_HEIGHT,
        FLAG_WIDTH,
        FLAG_HEIGHT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_deterministic() {
        for level in 1..=MAX_LEVEL {
            assert_eq!(generate_level(level), generate_level(level));
        }
    }

    #[test]
    fn test_out_of_range_falls_back_to_level_one() {
        let fallback = generate_level(0);
        assert_eq!(fallback.level_number, 1);
        assert_eq!(fallback, generate_level(1));
        assert_eq!(generate_level(99), generate_level(1));
    }

    #[test]
    fn test_platform_layout() {
        let level = generate_level(3);
        let pad = level.final_platform().unwrap();
        assert_eq!(pad.width, FINAL_PLATFORM_WIDTH);
        assert_eq!(pad.top(), GROUND_Y);
        assert_eq!(level.platforms.len(), platform_count_for(level.difficulty) + 1);
        assert_eq!(level.platforms[0].left(), 0.0);

        for p in &level.platforms[..level.platforms.len() - 1] {
            assert!(p.width >= PLATFORM_MIN_WIDTH);
            assert!(p.width < PLATFORM_MIN_WIDTH + PLATFORM_WIDTH_SPAN);
            if p.top() < GROUND_Y {
                assert!((300.0..=450.0).contains(&p.top()));
                assert_eq!(p.height, RAISED_HEIGHT);
            } else {
                assert_eq!(p.height, GROUND_HEIGHT);
            }
        }
    }

    #[test]
    fn test_platforms_do_not_overlap() {
        for level in 1..=MAX_LEVEL {
            let bp = generate_level(level);
            for gap in bp.gaps() {
                assert!(gap > 99.0, "level {level} gap {gap}");
            }
        }
    }

    #[test]
    fn test_enemies_stand_on_non_final_platforms() {
        for level in 1..=MAX_LEVEL {
            let bp = generate_level(level);
            let pad = *bp.final_platform().unwrap();
            assert_eq!(bp.enemies.len(), enemy_count_for(bp.difficulty));
            for enemy in &bp.enemies {
                let (x, y) = enemy.position();
                let host = bp.platforms[..bp.platforms.len() - 1].iter().find(|p| {
                    (p.top() - ENEMY_SIZE - y).abs() < 1e-3 && x >= p.left() && x <= p.right()
                });
                assert!(host.is_some(), "level {level}: enemy at ({x}, {y}) has no platform");
                assert!(x + ENEMY_SIZE < pad.left());
            }
        }
    }

    #[test]
    fn test_patrol_spans_are_valid() {
        for level in 1..=MAX_LEVEL {
            for enemy in generate_level(level).enemies {
                if let EnemyDescriptor::Ground {
                    x,
                    patrol_start,
                    patrol_end,
                    ..
                } = enemy
                {
                    assert!(patrol_start < patrol_end);
                    assert!(x >= patrol_start && x <= patrol_end);
                }
            }
        }
    }

    #[test]
    fn test_first_level_has_no_plasma_shooters() {
        let bp = generate_level(1);
        assert!(
            bp.enemies
                .iter()
                .all(|e| !matches!(e, EnemyDescriptor::Plasma { .. }))
        );
    }

    #[test]
    fn test_no_enemy_candidates_yields_empty_list() {
        let mut rng = SeededSource::new(1);
        let narrow = vec![
            Rect::new(0.0, GROUND_Y, 80.0, GROUND_HEIGHT),
            Rect::new(200.0, GROUND_Y, FINAL_PLATFORM_WIDTH, GROUND_HEIGHT),
        ];
        assert!(generate_enemies(&mut rng, &narrow, 2.0).is_empty());

        let only_pad = vec![Rect::new(0.0, GROUND_Y, FINAL_PLATFORM_WIDTH, GROUND_HEIGHT)];
        assert!(generate_enemies(&mut rng, &only_pad, 1.0).is_empty());
    }

    #[test]
    fn test_coins_sit_above_platform_tops() {
        let bp = generate_level(2);
        for c in bp.collectibles.iter().filter(|c| c.kind == CollectibleKind::Coin) {
            let host = bp
                .platforms
                .iter()
                .find(|p| c.rect.center().x > p.left() && c.rect.center().x < p.right());
            let host = host.expect("coin floats over a gap");
            assert_eq!(c.rect.top(), host.top() - 40.0);
        }

        let coins = bp.coin_count();
        assert!(coins > 0);
        assert!(coins <= bp.platforms.len() * 3);
        let lives = bp
            .collectibles
            .iter()
            .filter(|c| c.kind == CollectibleKind::ExtraLife)
            .count();
        assert_eq!(coins + lives, bp.collectibles.len());
    }

    #[test]
    fn test_extra_lives_on_raised_platforms() {
        for level in 1..=MAX_LEVEL {
            let bp = generate_level(level);
            let lives: Vec<_> = bp
                .collectibles
                .iter()
                .filter(|c| c.kind == CollectibleKind::ExtraLife)
                .collect();
            let limit = if bp.difficulty < 1.5 { 2 } else { 1 };
            assert!(lives.len() <= limit);
            for life in lives {
                let host = bp
                    .platforms
                    .iter()
                    .find(|p| (p.center().x - life.rect.center().x).abs() < 0.01);
                assert!(host.unwrap().top() < GROUND_Y);
            }
        }
    }

    #[test]
    fn test_end_flag_on_final_platform() {
        let bp = generate_level(5);
        let pad = bp.final_platform().unwrap();
        assert_eq!(bp.end_flag.bottom(), pad.top());
        assert!(bp.end_flag.left() > pad.left());
        assert!(bp.end_flag.right() < pad.right());
    }

    #[test]
    fn test_background_seed() {
        assert_eq!(generate_level(3).background_seed, 15_000);
    }
}
