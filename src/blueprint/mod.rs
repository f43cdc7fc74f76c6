//! Deterministic blueprint generation
//!
//! Pure functions of the level number. Nothing here touches the clock, global
//! state or OS randomness:
//! - Level layout keyed on `level * 1000`
//! - Backdrop keyed on `level * 5000`
//! - Identical input always yields an identical (`PartialEq`) blueprint

pub mod background;
pub mod level;
pub mod seeded;

pub use background::{
    BackgroundBlueprint, Cloud, ElementType, LayerElements, Mountain, ParallaxLayer, Shape,
    ShapeKind, Star, generate_background, generate_background_with,
};
pub use level::{
    Collectible, CollectibleKind, EnemyDescriptor, LevelBlueprint, enemy_count_for,
    generate_level, generate_level_with, platform_count_for,
};
pub use seeded::SeededSource;
