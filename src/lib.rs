//! Arena Survivor - a top-down arena survival shooter
//!
//! Core modules:
//! - `sim`: Simulation core (entities, collisions, level director, game modes)
//! - `scene`: Read-only snapshot handed to the renderer each frame
//! - `platform`: Host-side clock and input latching
//! - `settings`: User configuration
//! - `autopilot`: Demo bot that drives the simulation headless

pub mod autopilot;
pub mod platform;
pub mod scene;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the clock will account for (stalls are dropped past this)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arena dimensions (virtual units, shared with the renderer)
    pub const ARENA_WIDTH: f32 = 960.0;
    pub const ARENA_HEIGHT: f32 = 540.0;

    /// Bullets are culled once they leave the arena by this much
    pub const BULLET_CULL_MARGIN: f32 = 50.0;
    /// Enemies spawn this far outside the arena edge
    pub const SPAWN_MARGIN: f32 = 40.0;
    /// Player center is kept this far inside the arena edges
    pub const PLAYER_EDGE_MARGIN: f32 = 16.0;
}

/// Epsilon added to distances before dividing, so normalization never blows up
pub const DIST_EPSILON: f32 = 1e-5;

/// Unit vector pointing along `theta` (radians)
#[inline]
pub fn vec_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Direction from `from` toward `to`.
///
/// The epsilon in the denominator keeps this finite when the points coincide;
/// the result is then a (near) zero vector instead of NaN.
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    delta / (delta.length() + DIST_EPSILON)
}

/// Circle-circle contact test (touching counts)
#[inline]
pub fn circles_touch(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    (a - b).length() <= ra + rb
}

/// Arena center point
#[inline]
pub fn arena_center() -> Vec2 {
    Vec2::new(consts::ARENA_WIDTH / 2.0, consts::ARENA_HEIGHT / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_to_is_unit_length() {
        let dir = direction_to(Vec2::new(10.0, 10.0), Vec2::new(13.0, 14.0));
        assert!((dir.length() - 1.0).abs() < 1e-4);
        assert!((dir.x - 0.6).abs() < 1e-4);
    }

    #[test]
    fn test_direction_to_coincident_points_is_finite() {
        let p = Vec2::new(5.0, 5.0);
        let dir = direction_to(p, p);
        assert!(dir.is_finite());
        assert_eq!(dir, Vec2::ZERO);
    }

    #[test]
    fn test_circles_touch_is_inclusive() {
        assert!(circles_touch(Vec2::ZERO, 3.0, Vec2::new(5.0, 0.0), 2.0));
        assert!(!circles_touch(Vec2::ZERO, 3.0, Vec2::new(5.1, 0.0), 2.0));
    }

    #[test]
    fn test_vec_from_angle() {
        let v = vec_from_angle(std::f32::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }
}
