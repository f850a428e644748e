//! Static rectangular barriers and circle-vs-rect resolution
//!
//! The one non-trivial geometric routine in the game: push a circle out of an
//! axis-aligned rectangle so it no longer overlaps.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Below this squared distance the circle center counts as on/inside the rect
const ZERO_DIST_SQ: f32 = 1e-6;
/// Extra clearance when pushing out along the contact normal
const PUSH_EPSILON: f32 = 0.01;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Closest point on (or in) the rect to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.left(), self.right()),
            p.y.clamp(self.top(), self.bottom()),
        )
    }
}

/// Which face a circle was ejected through when its center sat on the rect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitFace {
    Left,
    Right,
    Top,
    Bottom,
}

/// Pick the face with the smallest penetration.
///
/// Ties resolve left, right, top, bottom in that order.
pub fn nearest_face(center: Vec2, rect: &Rect) -> ExitFace {
    let left = (center.x - rect.left()).abs();
    let right = (rect.right() - center.x).abs();
    let top = (center.y - rect.top()).abs();
    let bottom = (rect.bottom() - center.y).abs();
    let min = left.min(right).min(top).min(bottom);

    if min == left {
        ExitFace::Left
    } else if min == right {
        ExitFace::Right
    } else if min == top {
        ExitFace::Top
    } else {
        ExitFace::Bottom
    }
}

/// Push a circle out of `rect`. Returns true if the center was moved.
pub fn resolve_circle_rect(center: &mut Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = rect.closest_point(*center);
    let delta = *center - closest;
    let dist_sq = delta.length_squared();

    if dist_sq >= radius * radius {
        return false;
    }

    if dist_sq <= ZERO_DIST_SQ {
        // Center is on or inside the rect: no usable normal, exit via nearest face
        match nearest_face(*center, rect) {
            ExitFace::Left => center.x = rect.left() - radius,
            ExitFace::Right => center.x = rect.right() + radius,
            ExitFace::Top => center.y = rect.top() - radius,
            ExitFace::Bottom => center.y = rect.bottom() + radius,
        }
    } else {
        let normal = delta / dist_sq.sqrt();
        *center = closest + normal * (radius + PUSH_EPSILON);
    }
    true
}

/// A static obstacle. Immutable for the lifetime of a level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Barrier {
    pub rect: Rect,
}

impl Barrier {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
        }
    }

    /// Resolve a circle against this barrier
    #[inline]
    pub fn push_out(&self, center: &mut Vec2, radius: f32) -> bool {
        resolve_circle_rect(center, radius, &self.rect)
    }
}

/// Resolve a circle against every barrier in order.
///
/// Each barrier is applied independently, so a circle wedged between two
/// barriers ends up wherever the last one put it.
pub fn resolve_against_all(center: &mut Vec2, radius: f32, barriers: &[Barrier]) -> bool {
    let mut moved = false;
    for barrier in barriers {
        moved |= barrier.push_out(center, radius);
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_rect() -> Rect {
        Rect::new(100.0, 100.0, 120.0, 40.0)
    }

    #[test]
    fn test_no_overlap_is_untouched() {
        let mut c = Vec2::new(50.0, 50.0);
        assert!(!resolve_circle_rect(&mut c, 10.0, &test_rect()));
        assert_eq!(c, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_exactly_touching_is_not_a_collision() {
        let mut c = Vec2::new(90.0, 120.0);
        assert!(!resolve_circle_rect(&mut c, 10.0, &test_rect()));
    }

    #[test]
    fn test_push_out_along_normal() {
        // Overlapping the left face from outside
        let mut c = Vec2::new(95.0, 120.0);
        assert!(resolve_circle_rect(&mut c, 10.0, &test_rect()));
        assert!((c.x - (100.0 - 10.01)).abs() < 1e-3);
        assert!((c.y - 120.0).abs() < 1e-4);
    }

    #[test]
    fn test_corner_push_is_diagonal() {
        let mut c = Vec2::new(97.0, 97.0);
        assert!(resolve_circle_rect(&mut c, 10.0, &test_rect()));
        let corner = Vec2::new(100.0, 100.0);
        assert!(((c - corner).length() - 10.01).abs() < 1e-3);
        assert!((c.x - c.y).abs() < 1e-4);
    }

    #[test]
    fn test_center_inside_exits_nearest_face() {
        // 5 from top, far from the others
        let mut c = Vec2::new(160.0, 105.0);
        assert!(resolve_circle_rect(&mut c, 8.0, &test_rect()));
        assert_eq!(c, Vec2::new(160.0, 92.0));

        // 3 from right
        let mut c = Vec2::new(217.0, 120.0);
        assert!(resolve_circle_rect(&mut c, 8.0, &test_rect()));
        assert_eq!(c, Vec2::new(228.0, 120.0));
    }

    #[test]
    fn test_nearest_face_tie_order() {
        let square = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Dead center: all four equal, left wins
        assert_eq!(nearest_face(Vec2::new(5.0, 5.0), &square), ExitFace::Left);
        // Right and top tie
        assert_eq!(nearest_face(Vec2::new(8.0, 2.0), &square), ExitFace::Right);
        // Top and bottom tie on a wide rect
        let wide = Rect::new(0.0, 0.0, 100.0, 10.0);
        assert_eq!(nearest_face(Vec2::new(50.0, 5.0), &wide), ExitFace::Top);
        assert_eq!(nearest_face(Vec2::new(50.0, 9.0), &wide), ExitFace::Bottom);
    }

    #[test]
    fn test_center_on_edge_uses_face_exit() {
        let mut c = Vec2::new(100.0, 120.0);
        assert!(resolve_circle_rect(&mut c, 10.0, &test_rect()));
        assert_eq!(c, Vec2::new(90.0, 120.0));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn prop_no_residual_penetration(
            rx in 0.0f32..800.0,
            ry in 0.0f32..400.0,
            rw in 10.0f32..200.0,
            rh in 10.0f32..100.0,
            u in -0.5f32..1.5,
            v in -0.5f32..1.5,
            radius in 2.0f32..30.0,
        ) {
            let rect = Rect::new(rx, ry, rw, rh);
            let mut c = Vec2::new(rx + u * rw, ry + v * rh);
            resolve_circle_rect(&mut c, radius, &rect);
            let dist = (c - rect.closest_point(c)).length();
            prop_assert!(dist >= radius - 1e-3, "dist {} < radius {}", dist, radius);
        }
    }
}
