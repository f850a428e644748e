//! Player projectiles

use glam::Vec2;

use super::pool::Lifecycle;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, BULLET_CULL_MARGIN};
use crate::scene::colors;

pub const BULLET_SPEED: f32 = 560.0;
pub const BULLET_RADIUS: f32 = 3.0;

#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: [f32; 4],
    pub radius: f32,
    pub alive: bool,
    pub damage: i32,
    /// Enemies this bullet can still pass through
    pub pierce: u32,
}

impl Bullet {
    /// Standard single-damage, non-piercing shot
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            color: colors::BULLET,
            radius: BULLET_RADIUS,
            alive: true,
            damage: 1,
            pierce: 0,
        }
    }

    pub fn with_pierce(mut self, pierce: u32) -> Self {
        self.pierce = pierce;
        self
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        if !in_cull_bounds(self.pos) {
            self.alive = false;
        }
    }

    /// Called on enemy contact: spend a pierce charge or die
    pub fn consume_pierce(&mut self) {
        if self.pierce == 0 {
            self.alive = false;
        } else {
            self.pierce -= 1;
        }
    }
}

impl Lifecycle for Bullet {
    fn is_alive(&self) -> bool {
        self.alive
    }
}

/// Arena bounds grown by the cull margin (exclusive)
fn in_cull_bounds(p: Vec2) -> bool {
    let m = BULLET_CULL_MARGIN;
    -m < p.x && p.x < ARENA_WIDTH + m && -m < p.y && p.y < ARENA_HEIGHT + m
}
