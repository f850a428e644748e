//! Level progression: time budget, barrier layouts, and the spawn curve
//!
//! Everything here is a pure function of the level number plus the shared RNG.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::barrier::Barrier;
use super::enemy::EnemyKind;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, SPAWN_MARGIN};

/// Barrier layouts keep this much clear space around the arena edge
const LAYOUT_PAD: i32 = 60;
/// Reseed multiplier for deterministic barrier layouts
const LAYOUT_SEED_MULT: u64 = 1337;
/// Thickness of the lane-splitting walls on even / multiple-of-three levels
const LANE_WALL_THICKNESS: f32 = 24.0;

/// Survival time needed to clear a level, in seconds
pub fn goal_time_for(level: u32) -> f32 {
    18.0 + (level.saturating_sub(1)) as f32 * 4.0
}

/// Seconds between spawn events
pub fn spawn_interval_for(level: u32) -> f32 {
    (0.9 - (level.saturating_sub(1)) as f32 * 0.08).max(0.35)
}

/// Chance that a spawn event is a swarm
pub fn swarm_chance(level: u32) -> f32 {
    (0.03 + level as f32 * 0.008).min(0.14)
}

pub fn sprinter_chance(level: u32) -> f32 {
    (0.10 + level as f32 * 0.01).clamp(0.10, 0.30)
}

pub fn tank_chance(level: u32) -> f32 {
    (0.07 + level as f32 * 0.008).clamp(0.07, 0.22)
}

/// Map a uniform roll in [0, 1) to an enemy kind for this level.
///
/// Sprinter is checked first, then tank on the same cumulative roll.
pub fn kind_for_roll(level: u32, roll: f32) -> EnemyKind {
    let sprinter = sprinter_chance(level);
    let tank = tank_chance(level);
    if roll < sprinter {
        EnemyKind::Sprinter
    } else if roll < sprinter + tank {
        EnemyKind::Tank
    } else {
        EnemyKind::Chaser
    }
}

/// Arena edges enemies can enter from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];
}

/// Off-screen point along `edge`; `t` in [0, 1] picks the spot along it
pub fn spawn_point(edge: Edge, t: f32) -> Vec2 {
    match edge {
        Edge::Top => Vec2::new(t * ARENA_WIDTH, -SPAWN_MARGIN),
        Edge::Bottom => Vec2::new(t * ARENA_WIDTH, ARENA_HEIGHT + SPAWN_MARGIN),
        Edge::Left => Vec2::new(-SPAWN_MARGIN, t * ARENA_HEIGHT),
        Edge::Right => Vec2::new(ARENA_WIDTH + SPAWN_MARGIN, t * ARENA_HEIGHT),
    }
}

/// Roll a spawn location and kind
pub fn roll_spawn(level: u32, rng: &mut impl Rng) -> (Vec2, EnemyKind) {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let pos = spawn_point(edge, rng.random_range(0.0..=1.0));
    let kind = kind_for_roll(level, rng.random::<f32>());
    (pos, kind)
}

/// How many enemies the next spawn event produces
pub fn roll_spawn_count(level: u32, rng: &mut impl Rng) -> u32 {
    if rng.random::<f32>() < swarm_chance(level) {
        rng.random_range(3..=5)
    } else {
        1
    }
}

/// Generate the barrier layout for `level`.
///
/// Reseeds `rng` from the level number first, so the same level always gets
/// the same layout. Every draw after this call in the same tick comes from
/// the reseeded stream too.
pub fn barrier_layout(level: u32, rng: &mut Pcg32) -> Vec<Barrier> {
    *rng = Pcg32::seed_from_u64(level as u64 * LAYOUT_SEED_MULT);

    let pad = LAYOUT_PAD;
    let w = ARENA_WIDTH as i32 - pad * 2;
    let h = ARENA_HEIGHT as i32 - pad * 2;

    let count = 2 + level % 3;
    let mut barriers = Vec::with_capacity(count as usize + 2);
    for _ in 0..count {
        let bw = rng.random_range(90..=140);
        let bh = rng.random_range(28..=46);
        let x = pad + rng.random_range(0..=(w - bw).max(1));
        let y = pad + rng.random_range(0..=(h - bh).max(1));
        barriers.push(Barrier::new(x as f32, y as f32, bw as f32, bh as f32));
    }

    let half = LANE_WALL_THICKNESS / 2.0;
    if level % 2 == 0 {
        barriers.push(Barrier::new(
            ARENA_WIDTH / 2.0 - half,
            pad as f32,
            LANE_WALL_THICKNESS,
            h as f32,
        ));
    }
    if level % 3 == 0 {
        barriers.push(Barrier::new(
            pad as f32,
            ARENA_HEIGHT / 2.0 - half,
            w as f32,
            LANE_WALL_THICKNESS,
        ));
    }

    log::info!("Level {} layout: {} barriers", level, barriers.len());
    barriers
}

/// Per-level countdowns, reset on every level transition
#[derive(Debug, Clone, PartialEq)]
pub struct LevelState {
    pub number: u32,
    pub time_budget: f32,
    pub time_remaining: f32,
    pub spawn_timer: f32,
}

impl LevelState {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            time_budget: goal_time_for(number),
            time_remaining: goal_time_for(number),
            // First spawn fires on the first playing tick
            spawn_timer: 0.0,
        }
    }

    /// Run the survival clock down. Returns true once it hits zero.
    pub fn tick_clock(&mut self, dt: f32) -> bool {
        self.time_remaining = (self.time_remaining - dt).max(0.0);
        self.time_remaining == 0.0
    }

    /// Run the spawn countdown. Returns true when a spawn is due and rearms it.
    pub fn tick_spawn(&mut self, dt: f32) -> bool {
        self.spawn_timer -= dt;
        if self.spawn_timer <= 0.0 {
            self.spawn_timer = spawn_interval_for(self.number);
            true
        } else {
            false
        }
    }

    /// Fraction of the budget survived so far
    pub fn progress(&self) -> f32 {
        if self.time_budget <= 0.0 {
            return 1.0;
        }
        1.0 - self.time_remaining / self.time_budget
    }
}
