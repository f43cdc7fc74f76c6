//! Parallax backdrop generation
//!
//! Each level owns its own `SeededSource` (seed = level * 5000), so a change to
//! one level's layer mix never shifts another level's draws.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use super::seeded::SeededSource;
use crate::consts::{BACKDROP_WIDTH, BACKGROUND_SEED_MULTIPLIER, WORLD_HEIGHT};
use crate::sanitize_level;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Stars,
    Clouds,
    Mountains,
    Geometric,
}

impl ElementType {
    const ALL: [ElementType; 4] = [
        ElementType::Stars,
        ElementType::Clouds,
        ElementType::Mountains,
        ElementType::Geometric,
    ];

    /// Candidate layer colours (0xRRGGBB)
    fn palette(self) -> &'static [u32] {
        match self {
            ElementType::Stars => &[0x0b_0d_2a, 0x1a_14_46, 0x10_20_40],
            ElementType::Clouds => &[0x87_ce_eb, 0xb0_c4_de, 0xe0_e6_f0],
            ElementType::Mountains => &[0x4a_5d_6e, 0x5b_4a_6e, 0x3e_5e_4a],
            ElementType::Geometric => &[0x2d_1b_4e, 0x1b_3a_4e, 0x4e_1b_3a],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub brightness: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub opacity: f32,
}

/// A mountain silhouette; `y` is the baseline, the peak is `height` above it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mountain {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Triangle,
    Square,
    Circle,
    Hexagon,
}

impl ShapeKind {
    const ALL: [ShapeKind; 4] = [
        ShapeKind::Triangle,
        ShapeKind::Square,
        ShapeKind::Circle,
        ShapeKind::Hexagon,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub x: f32,
    pub y: f32,
    pub kind: ShapeKind,
    pub size: f32,
    pub opacity: f32,
    /// Radians
    pub rotation: f32,
}

/// A layer's elements; one variant per element type so a layer never mixes kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "element_type", content = "elements", rename_all = "snake_case")]
pub enum LayerElements {
    Stars(Vec<Star>),
    Clouds(Vec<Cloud>),
    Mountains(Vec<Mountain>),
    Geometric(Vec<Shape>),
}

impl LayerElements {
    pub fn element_type(&self) -> ElementType {
        match self {
            LayerElements::Stars(_) => ElementType::Stars,
            LayerElements::Clouds(_) => ElementType::Clouds,
            LayerElements::Mountains(_) => ElementType::Mountains,
            LayerElements::Geometric(_) => ElementType::Geometric,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            LayerElements::Stars(v) => v.len(),
            LayerElements::Clouds(v) => v.len(),
            LayerElements::Mountains(v) => v.len(),
            LayerElements::Geometric(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One scrolling layer of the backdrop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallaxLayer {
    /// Scroll factor in [0, 1]; 0 is pinned to the screen, 1 moves with the world
    pub depth: f32,
    pub color: u32,
    #[serde(flatten)]
    pub elements: LayerElements,
}

impl ParallaxLayer {
    pub fn element_type(&self) -> ElementType {
        self.elements.element_type()
    }

    /// Horizontal screen offset for a camera position
    #[inline]
    pub fn offset(&self, camera_x: f32) -> f32 {
        camera_x * self.depth
    }
}

/// Immutable backdrop description for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundBlueprint {
    pub level_number: u32,
    /// Back to front, depths strictly increasing
    pub layers: Vec<ParallaxLayer>,
}

/// Generate the backdrop for a level (reference campaign length)
pub fn generate_background(level: u32) -> BackgroundBlueprint {
    generate_background_with(level, &Tuning::default())
}

pub fn generate_background_with(level: u32, tuning: &Tuning) -> BackgroundBlueprint {
    let level = sanitize_level(level, tuning.max_level);
    let mut rng = SeededSource::new(level as u64 * BACKGROUND_SEED_MULTIPLIER);

    let layer_count = 3 + rng.index(2);
    let layers = (0..layer_count)
        .map(|index| generate_layer(&mut rng, index))
        .collect::<Vec<_>>();

    log::debug!(
        "Background {}: {} layers ({:?})",
        level,
        layers.len(),
        layers.iter().map(|l| l.element_type()).collect::<Vec<_>>()
    );

    BackgroundBlueprint {
        level_number: level,
        layers,
    }
}

/// Depth for a layer index: 0.1, 0.2, 0.3, 0.4
#[inline]
pub fn layer_depth(index: usize) -> f32 {
    0.1 + (index as f32 / 4.0) * 0.4
}

fn pick_element_type(rng: &mut SeededSource, index: usize) -> ElementType {
    match index {
        // Far layers: sky features
        0 => {
            if rng.chance(0.5) {
                ElementType::Stars
            } else {
                ElementType::Geometric
            }
        }
        1 => {
            if rng.chance(0.5) {
                ElementType::Clouds
            } else {
                ElementType::Mountains
            }
        }
        _ => ElementType::ALL[rng.index(ElementType::ALL.len())],
    }
}

fn generate_layer(rng: &mut SeededSource, index: usize) -> ParallaxLayer {
    let element_type = pick_element_type(rng, index);
    let palette = element_type.palette();
    let color = palette[rng.index(palette.len())];

    let elements = match element_type {
        ElementType::Stars => {
            let count = 60 + rng.index(40);
            LayerElements::Stars(
                (0..count)
                    .map(|_| Star {
                        x: rng.next() * BACKDROP_WIDTH,
                        y: rng.next() * WORLD_HEIGHT * 0.7,
                        size: rng.range(1.0, 3.0),
                        brightness: rng.range(0.5, 1.0),
                    })
                    .collect(),
            )
        }
        ElementType::Clouds => {
            let count = 5 + rng.index(5);
            LayerElements::Clouds(
                (0..count)
                    .map(|_| Cloud {
                        x: rng.next() * BACKDROP_WIDTH,
                        y: rng.range(20.0, 220.0),
                        width: rng.range(80.0, 200.0),
                        height: rng.range(30.0, 60.0),
                        opacity: rng.range(0.3, 0.7),
                    })
                    .collect(),
            )
        }
        ElementType::Mountains => {
            let count = 4 + rng.index(4);
            let spacing = BACKDROP_WIDTH / count as f32;
            LayerElements::Mountains(
                (0..count)
                    .map(|i| Mountain {
                        x: i as f32 * spacing + rng.next() * spacing * 0.5,
                        y: WORLD_HEIGHT,
                        width: rng.range(200.0, 400.0),
                        height: rng.range(100.0, 300.0),
                        opacity: rng.range(0.4, 0.8),
                    })
                    .collect(),
            )
        }
        ElementType::Geometric => {
            let count = 8 + rng.index(8);
            LayerElements::Geometric(
                (0..count)
                    .map(|_| Shape {
                        x: rng.next() * BACKDROP_WIDTH,
                        y: rng.next() * WORLD_HEIGHT,
                        kind: ShapeKind::ALL[rng.index(ShapeKind::ALL.len())],
                        size: rng.range(20.0, 60.0),
                        opacity: rng.range(0.1, 0.3),
                        rotation: rng.next() * TAU,
                    })
                    .collect(),
            )
        }
    };

    ParallaxLayer {
        depth: layer_depth(index),
        color,
        elements,
    }
}
