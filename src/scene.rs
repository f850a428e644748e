//! Read-only scene snapshot handed to the renderer
//!
//! The simulation never draws. Each frame the host captures a [`Scene`] and
//! passes it to whatever renderer it uses. Shape instances are `Pod` so they
//! can be uploaded as-is with `bytemuck::cast_slice`.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::Serialize;

use crate::settings::Settings;
use crate::sim::{GameMode, GameState};

/// Colors for game elements (linear RGBA)
pub mod colors {
    const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    pub const BACKGROUND: [f32; 4] = rgb(10, 10, 12);
    pub const GRID: [f32; 4] = rgb(20, 22, 30);
    pub const PLAYER: [f32; 4] = rgb(240, 240, 240);
    pub const PLAYER_BLINK: [f32; 4] = rgb(80, 80, 90);
    pub const AIM_MARKER: [f32; 4] = rgb(250, 220, 90);
    pub const AIM_MARKER_SHIELD: [f32; 4] = rgb(90, 160, 255);
    pub const BULLET: [f32; 4] = rgb(250, 220, 90);
    pub const SPARKLE: [f32; 4] = rgb(240, 240, 240);
    pub const ENEMY_CHASER: [f32; 4] = rgb(255, 160, 70);
    pub const ENEMY_SPRINTER: [f32; 4] = rgb(120, 240, 240);
    pub const ENEMY_TANK: [f32; 4] = rgb(200, 120, 255);
    pub const BARRIER_FILL: [f32; 4] = rgb(28, 30, 40);
    pub const BARRIER_EDGE: [f32; 4] = rgb(50, 55, 70);
    pub const DAMAGE_FLASH: [f32; 4] = rgb(255, 50, 50);
}

/// What a circle instance represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u32)]
pub enum ShapeKind {
    Particle = 0,
    Bullet = 1,
    Enemy = 2,
    Player = 3,
}

/// One circle for the instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize)]
pub struct CircleInstance {
    pub center: [f32; 2],
    pub radius: f32,
    /// [`ShapeKind`] as u32
    pub kind: u32,
    pub color: [f32; 4],
    /// Unit facing vector (zero for shapes without one)
    pub facing: [f32; 2],
}

impl CircleInstance {
    fn new(kind: ShapeKind, center: Vec2, radius: f32, color: [f32; 4], facing: Vec2) -> Self {
        Self {
            center: center.to_array(),
            radius,
            kind: kind as u32,
            color,
            facing: facing.to_array(),
        }
    }
}

/// One barrier rectangle
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize)]
pub struct RectInstance {
    pub min: [f32; 2],
    pub size: [f32; 2],
    pub fill: [f32; 4],
    pub edge: [f32; 4],
}

/// Numbers for the HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub hp: i32,
    pub max_hp: i32,
    pub score: u64,
    pub high_score: u64,
    pub level: u32,
    pub time_remaining: f32,
    pub time_budget: f32,
    pub combo: f32,
    pub damage_flash: f32,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    pub mode: GameMode,
    pub camera_offset: Vec2,
    pub barriers: Vec<RectInstance>,
    /// Back to front: particles, bullets, enemies, player
    pub circles: Vec<CircleInstance>,
    pub hud: Hud,
}

impl Scene {
    /// Snapshot `state`, applying the user's motion/flash preferences
    pub fn capture(state: &GameState, settings: &Settings) -> Self {
        let camera_offset = if settings.effective_screen_shake() {
            state.camera.offset
        } else {
            Vec2::ZERO
        };
        let damage_flash = if settings.effective_damage_flash() {
            state.flash
        } else {
            0.0
        };

        let barriers = state
            .barriers
            .iter()
            .map(|b| RectInstance {
                min: [b.rect.x, b.rect.y],
                size: [b.rect.w, b.rect.h],
                fill: colors::BARRIER_FILL,
                edge: colors::BARRIER_EDGE,
            })
            .collect();

        let mut circles = Vec::with_capacity(
            state.particles.len() + state.bullets.len() + state.enemies.len() + 1,
        );

        for p in &state.particles {
            let mut color = p.color;
            color[3] = p.alpha() as f32 / 255.0;
            circles.push(CircleInstance::new(ShapeKind::Particle, p.pos, p.size, color, Vec2::ZERO));
        }
        for b in &state.bullets {
            let facing = b.vel.normalize_or_zero();
            circles.push(CircleInstance::new(ShapeKind::Bullet, b.pos, b.radius, b.color, facing));
        }
        for e in &state.enemies {
            circles.push(CircleInstance::new(ShapeKind::Enemy, e.pos, e.radius, e.color, e.facing()));
        }

        let player = &state.player;
        let facing = (state.aim - player.pos).try_normalize().unwrap_or(Vec2::X);
        circles.push(CircleInstance::new(
            ShapeKind::Player,
            player.pos,
            player.radius,
            player_color(player.invuln_timer),
            facing,
        ));

        Self {
            mode: state.mode,
            camera_offset,
            barriers,
            circles,
            hud: Hud {
                hp: player.hp,
                max_hp: player.max_hp,
                score: player.score,
                high_score: player.high_score,
                level: state.level.number,
                time_remaining: state.level.time_remaining,
                time_budget: state.level.time_budget,
                combo: player.combo(),
                damage_flash,
            },
        }
    }

    /// Circle instances as raw bytes for a GPU upload
    pub fn circle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.circles)
    }

    pub fn barrier_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.barriers)
    }
}

/// Blink while invulnerable
fn player_color(invuln_timer: f32) -> [f32; 4] {
    if invuln_timer > 0.0 && (invuln_timer * 40.0) as i32 % 2 == 0 {
        colors::PLAYER_BLINK
    } else {
        colors::PLAYER
    }
}
