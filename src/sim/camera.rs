//! Screen shake camera

use glam::Vec2;
use rand::Rng;

/// Shake decay in units per second
pub const SHAKE_DECAY_PER_SEC: f32 = 60.0;

/// Camera offset driven by a decaying shake magnitude
#[derive(Debug, Clone, Default)]
pub struct Camera {
    pub offset: Vec2,
    pub shake_magnitude: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jitter the offset while shaking, then decay the magnitude toward zero
    pub fn update(&mut self, dt: f32, rng: &mut impl Rng) {
        if self.shake_magnitude > 0.0 {
            let m = self.shake_magnitude;
            self.offset = Vec2::new(rng.random_range(-m..=m), rng.random_range(-m..=m));
            self.shake_magnitude = (self.shake_magnitude - SHAKE_DECAY_PER_SEC * dt).max(0.0);
        } else {
            self.offset = Vec2::ZERO;
        }
    }

    /// Raise the shake ceiling. Repeated calls don't stack.
    pub fn shake(&mut self, amount: f32) {
        self.shake_magnitude = self.shake_magnitude.max(amount);
    }
}
