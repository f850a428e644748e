//! Game state and the root aggregate that owns every entity
//!
//! One `GameState` is one play session. Restarting builds a new one.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::barrier::Barrier;
use super::bullet::Bullet;
use super::camera::Camera;
use super::enemy::{Enemy, EnemyKind};
use super::level::{self, LevelState};
use super::particle::Particle;
use super::player::Player;
use super::pool::Pool;
use crate::scene::colors;
use crate::settings::Settings;
use crate::{arena_center, vec_from_angle};

/// Default particle cap when no settings are supplied
pub const MAX_PARTICLES: usize = 256;

/// Camera shake amounts for each effect
pub const SHAKE_EXPLOSION: f32 = 6.0;
pub const SHAKE_MUZZLE: f32 = 2.5;
pub const SHAKE_BULLET_HIT: f32 = 1.2;
pub const SHAKE_PLAYER_HIT: f32 = 7.0;
/// Damage flash intensity when the player takes a hit
pub const FLASH_PLAYER_HIT: f32 = 0.35;
/// Softer flash for a kill
pub const FLASH_KILL: f32 = 0.2;

/// Top-level game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen, waiting for start
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Simulation frozen until resumed
    Paused,
    /// Survived the level timer, waiting for advance/retry
    Cleared,
    /// Player died, waiting for restart
    GameOver,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Menu => "menu",
            GameMode::Playing => "playing",
            GameMode::Paused => "paused",
            GameMode::Cleared => "cleared",
            GameMode::GameOver => "gameover",
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Shared RNG. Reseeded by every barrier layout, so a session's random
    /// stream is fixed by the level number alone.
    pub rng: Pcg32,
    pub mode: GameMode,
    pub level: LevelState,
    pub player: Player,
    pub camera: Camera,
    pub barriers: Vec<Barrier>,
    pub enemies: Pool<Enemy>,
    pub bullets: Pool<Bullet>,
    pub particles: Pool<Particle>,
    /// Damage flash overlay intensity (decays by dt)
    pub flash: f32,
    /// Last aim target fed in, for player facing
    pub aim: Vec2,
    /// Simulated ticks while playing
    pub time_ticks: u64,
    /// Enemies killed this session
    pub kills: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Create a new session with the default particle cap
    pub fn new() -> Self {
        Self::with_particle_cap(MAX_PARTICLES)
    }

    /// Create a new session honoring user settings
    pub fn with_settings(settings: &Settings) -> Self {
        Self::with_particle_cap(settings.max_particles())
    }

    fn with_particle_cap(particle_cap: usize) -> Self {
        let mut state = Self {
            // Replaced by the level 1 layout below
            rng: Pcg32::seed_from_u64(0),
            mode: GameMode::Menu,
            level: LevelState::new(1),
            player: Player::new(arena_center()),
            camera: Camera::new(),
            barriers: Vec::new(),
            enemies: Pool::new(),
            bullets: Pool::new(),
            particles: Pool::with_cap(particle_cap),
            flash: 0.0,
            aim: arena_center() + Vec2::X,
            time_ticks: 0,
            kills: 0,
        };
        state.setup_level(1, true, true);
        state
    }

    /// Build a fresh session. Nothing carries over except the particle cap.
    pub fn restarted(&self) -> Self {
        let cap = self.particles.cap().unwrap_or(MAX_PARTICLES);
        Self::with_particle_cap(cap)
    }

    /// Reset the level: clear transient entities, new layout, fresh timers
    pub fn setup_level(&mut self, number: u32, reset_player: bool, refill_hp: bool) {
        self.enemies.clear();
        self.bullets.clear();
        self.particles.clear();
        self.barriers = level::barrier_layout(number, &mut self.rng);
        self.level = LevelState::new(number);
        if reset_player {
            self.player.reset_position();
        }
        if refill_hp {
            self.player.refill_hp();
        }
        self.flash = 0.0;
        log::info!(
            "Level {} setup: survive {:.0}s, spawn every {:.2}s",
            number,
            self.level.time_budget,
            level::spawn_interval_for(number)
        );
    }

    /// Move to the next level. Score, hp, combo and buffs carry over.
    pub fn advance_level(&mut self) {
        self.setup_level(self.level.number + 1, true, false);
    }

    /// Replay the current level with full health
    pub fn retry_level(&mut self) {
        self.setup_level(self.level.number, true, true);
    }

    /// Spawn one enemy at a random edge
    pub fn spawn_enemy(&mut self) {
        let (pos, kind) = level::roll_spawn(self.level.number, &mut self.rng);
        let enemy = Enemy::spawn(kind, pos, &mut self.rng);
        self.enemies.spawn(enemy);
    }

    /// Run one spawn event (single enemy or a swarm)
    pub fn spawn_wave(&mut self) {
        let count = level::roll_spawn_count(self.level.number, &mut self.rng);
        if count > 1 {
            log::debug!("Swarm of {} on level {}", count, self.level.number);
        }
        for _ in 0..count {
            self.spawn_enemy();
        }
    }

    /// Burst of particles in the enemy's color, plus a hard shake
    pub fn add_explosion(&mut self, pos: Vec2, color: [f32; 4]) {
        for _ in 0..20 {
            let angle: f32 = self.rng.random_range(0.0..TAU);
            let speed: f32 = self.rng.random_range(40.0..=220.0);
            let life = self.rng.random_range(0.2..=0.6);
            let size = self.rng.random_range(2..=4) as f32;
            self.particles
                .spawn(Particle::new(pos, vec_from_angle(angle) * speed, life, size, color));
        }
        self.camera.shake(SHAKE_EXPLOSION);
    }

    /// Short spray along the aim direction
    pub fn add_muzzle(&mut self, pos: Vec2, angle: f32) {
        for _ in 0..6 {
            let speed: f32 = self.rng.random_range(60.0..=220.0);
            let jitter = angle + self.rng.random_range(-0.2f32..=0.2);
            let life = self.rng.random_range(0.05..=0.2);
            let size = self.rng.random_range(1..=2) as f32;
            self.particles.spawn(Particle::new(
                pos,
                vec_from_angle(jitter) * speed,
                life,
                size,
                colors::BULLET,
            ));
        }
        self.camera.shake(SHAKE_MUZZLE);
    }

    /// Stationary spark where a bullet connected
    pub fn add_hit_spark(&mut self, pos: Vec2) {
        self.particles
            .spawn(Particle::new(pos, Vec2::ZERO, 0.12, 3.0, colors::BULLET));
        self.camera.shake(SHAKE_BULLET_HIT);
    }

    /// Score, explosion and floating sparkles for a kill
    pub fn on_enemy_killed(&mut self, pos: Vec2, kind: EnemyKind) {
        let stats = kind.stats();
        let granted = self.player.add_score(stats.score);
        self.kills += 1;
        log::debug!("Killed {} for {} points", kind.as_str(), granted);

        self.add_explosion(pos, stats.color);
        self.flash = self.flash.max(FLASH_KILL);
        for _ in 0..8 {
            let vel = Vec2::new(
                self.rng.random_range(-30.0..=30.0),
                self.rng.random_range(-80.0..=-20.0),
            );
            self.particles
                .spawn(Particle::new(pos, vel, 0.6, 2.0, colors::SPARKLE));
        }
    }
}
