//! Axis-aligned rectangle geometry
//!
//! Screen space: x grows right, y grows down, so a platform's walkable surface
//! is its `top()` edge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (platforms, hitboxes, world bounds)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap test (touching edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// True when the spans on the x axis overlap
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }

    /// Inclusive point containment
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Grow the rectangle by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Rect {
        Rect::new(
            self.x - margin,
            self.y - margin,
            self.width + margin * 2.0,
            self.height + margin * 2.0,
        )
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

/// Resolve a falling body against platform tops.
///
/// `previous_bottom` is the body's bottom edge before this frame's vertical
/// move. A landing happens when the body was at or above a platform top and is
/// now at or below it while overlapping horizontally. The body is snapped onto
/// the highest such platform and the function returns true.
pub fn land_on_platforms(body: &mut Rect, previous_bottom: f32, platforms: &[Rect]) -> bool {
    let mut landing: Option<f32> = None;
    for platform in platforms {
        if !body.overlaps_horizontally(platform) {
            continue;
        }
        if previous_bottom <= platform.top() && body.bottom() >= platform.top() {
            landing = Some(match landing {
                Some(top) => top.min(platform.top()),
                None => platform.top(),
            });
        }
    }

    match landing {
        Some(top) => {
            body.y = top - body.height;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_intersects_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(10.0, 0.0, 10.0, 10.0);
        let overlapping = Rect::new(9.0, 9.0, 10.0, 10.0);
        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));
    }

    #[test]
    fn test_expanded() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0).expanded(10.0);
        assert_eq!(r, Rect::new(-10.0, -10.0, 120.0, 70.0));
        assert!(r.contains_point(Vec2::new(-10.0, 60.0)));
        assert!(!r.contains_point(Vec2::new(-10.5, 0.0)));
    }

    #[test]
    fn test_land_on_platform_snaps_to_top() {
        let platforms = [Rect::new(0.0, 550.0, 200.0, 50.0)];
        let mut body = Rect::new(50.0, 525.0, 30.0, 30.0);
        assert!(land_on_platforms(&mut body, 545.0, &platforms));
        assert_eq!(body.bottom(), 550.0);
    }

    #[test]
    fn test_no_landing_from_below_or_beside() {
        let platforms = [Rect::new(0.0, 400.0, 200.0, 20.0)];

        // Body was already below the platform top (jumping up through it)
        let mut body = Rect::new(50.0, 395.0, 30.0, 30.0);
        assert!(!land_on_platforms(&mut body, 430.0, &platforms));

        // Body is past the platform's right edge
        let mut body = Rect::new(210.0, 375.0, 30.0, 30.0);
        assert!(!land_on_platforms(&mut body, 398.0, &platforms));
    }

    #[test]
    fn test_lands_on_highest_crossed_platform() {
        let platforms = [
            Rect::new(0.0, 420.0, 200.0, 20.0),
            Rect::new(0.0, 410.0, 200.0, 20.0),
        ];
        let mut body = Rect::new(50.0, 395.0, 30.0, 30.0);
        assert!(land_on_platforms(&mut body, 405.0, &platforms));
        assert_eq!(body.bottom(), 410.0);
    }
}
