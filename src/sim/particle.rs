//! Decorative particles (sparks, explosions, muzzle flashes)

use glam::Vec2;

use super::pool::Lifecycle;

/// Velocity multiplier applied every update
pub const PARTICLE_DRAG: f32 = 0.98;

/// A short-lived particle. Purely visual, never affects gameplay.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub color: [f32; 4],
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, life: f32, size: f32, color: [f32; 4]) -> Self {
        Self {
            pos,
            vel,
            life,
            max_life: life,
            size,
            color,
        }
    }

    /// Advance one step. Returns whether the particle is still alive.
    pub fn update(&mut self, dt: f32) -> bool {
        self.pos += self.vel * dt;
        self.vel *= PARTICLE_DRAG;
        self.life -= dt;
        self.life > 0.0
    }

    /// Remaining life as a 0..=1 ratio
    pub fn life_ratio(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }

    /// Alpha for the renderer, 255 when fresh down to 0
    pub fn alpha(&self) -> u8 {
        (255.0 * self.life_ratio()) as u8
    }
}

impl Lifecycle for Particle {
    fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}
