//! Hostile entities that home in on the player

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::barrier::{Barrier, resolve_against_all};
use super::pool::Lifecycle;
use crate::direction_to;
use crate::scene::colors;

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Baseline
    Chaser,
    /// Fast, fragile
    Sprinter,
    /// Slow, tough
    Tank,
}

/// Fixed per-kind stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub speed_min: f32,
    pub speed_max: f32,
    pub hp: i32,
    pub radius: f32,
    pub damage: i32,
    /// Base score awarded on kill (before combo)
    pub score: u64,
    pub color: [f32; 4],
}

const CHASER: EnemyStats = EnemyStats {
    speed_min: 70.0,
    speed_max: 95.0,
    hp: 2,
    radius: 14.0,
    damage: 10,
    score: 10,
    color: colors::ENEMY_CHASER,
};

const SPRINTER: EnemyStats = EnemyStats {
    speed_min: 120.0,
    speed_max: 160.0,
    hp: 1,
    radius: 10.0,
    damage: 8,
    score: 10,
    color: colors::ENEMY_SPRINTER,
};

const TANK: EnemyStats = EnemyStats {
    speed_min: 50.0,
    speed_max: 65.0,
    hp: 4,
    radius: 18.0,
    damage: 16,
    score: 20,
    color: colors::ENEMY_TANK,
};

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Chaser, EnemyKind::Sprinter, EnemyKind::Tank];

    pub const fn stats(self) -> &'static EnemyStats {
        match self {
            EnemyKind::Chaser => &CHASER,
            EnemyKind::Sprinter => &SPRINTER,
            EnemyKind::Tank => &TANK,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Chaser => "chaser",
            EnemyKind::Sprinter => "sprinter",
            EnemyKind::Tank => "tank",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub speed: f32,
    pub hp: i32,
    pub radius: f32,
    pub color: [f32; 4],
    pub damage: i32,
    pub alive: bool,
}

impl Enemy {
    /// Create an enemy, sampling its speed from the kind's range
    pub fn spawn(kind: EnemyKind, pos: Vec2, rng: &mut impl Rng) -> Self {
        let stats = kind.stats();
        Self {
            kind,
            pos,
            vel: Vec2::ZERO,
            speed: rng.random_range(stats.speed_min..=stats.speed_max),
            hp: stats.hp,
            radius: stats.radius,
            color: stats.color,
            damage: stats.damage,
            alive: true,
        }
    }

    /// Seek the player, then resolve against barriers
    pub fn update(&mut self, dt: f32, player_pos: Vec2, barriers: &[Barrier]) {
        self.vel = direction_to(self.pos, player_pos) * self.speed;
        self.pos += self.vel * dt;
        resolve_against_all(&mut self.pos, self.radius, barriers);
    }

    /// Apply damage. Returns true if this hit killed the enemy.
    pub fn hit(&mut self, damage: i32) -> bool {
        self.hp -= damage;
        if self.hp <= 0 {
            self.alive = false;
        }
        !self.alive
    }

    /// Facing direction for rendering (+x when standing still)
    pub fn facing(&self) -> Vec2 {
        self.vel.try_normalize().unwrap_or(Vec2::X)
    }
}

impl Lifecycle for Enemy {
    fn is_alive(&self) -> bool {
        self.alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_stat_invariants_per_kind() {
        let mut rng = Pcg32::seed_from_u64(42);
        for kind in EnemyKind::ALL {
            let stats = kind.stats();
            for _ in 0..10_000 {
                let e = Enemy::spawn(kind, Vec2::ZERO, &mut rng);
                assert!(e.speed >= stats.speed_min && e.speed <= stats.speed_max);
                assert_eq!(e.hp, stats.hp);
                assert_eq!(e.radius, stats.radius);
                assert_eq!(e.damage, stats.damage);
            }
        }
    }

    #[test]
    fn test_stat_table() {
        assert_eq!(EnemyKind::Chaser.stats().hp, 2);
        assert_eq!(EnemyKind::Sprinter.stats().radius, 10.0);
        assert_eq!(EnemyKind::Tank.stats().damage, 16);
        assert_eq!(EnemyKind::Tank.stats().score, 20);
    }

    #[test]
    fn test_seeks_player() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut e = Enemy::spawn(EnemyKind::Chaser, Vec2::new(0.0, 100.0), &mut rng);
        let speed = e.speed;
        e.update(0.1, Vec2::new(200.0, 100.0), &[]);
        assert!((e.pos.x - speed * 0.1).abs() < 1e-2);
        assert!((e.pos.y - 100.0).abs() < 1e-4);
        assert!((e.facing() - Vec2::X).length() < 1e-5);
    }

    #[test]
    fn test_on_top_of_player_stays_finite() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut e = Enemy::spawn(EnemyKind::Tank, Vec2::new(50.0, 50.0), &mut rng);
        e.update(0.1, Vec2::new(50.0, 50.0), &[]);
        assert!(e.pos.is_finite());
        assert_eq!(e.facing(), Vec2::X);
    }

    #[test]
    fn test_barrier_blocks_path() {
        let mut rng = Pcg32::seed_from_u64(3);
        let wall = Barrier::new(100.0, 0.0, 20.0, 200.0);
        let mut e = Enemy::spawn(EnemyKind::Sprinter, Vec2::new(80.0, 100.0), &mut rng);
        for _ in 0..120 {
            e.update(1.0 / 60.0, Vec2::new(300.0, 100.0), &[wall]);
            assert!(e.pos.x <= 100.0 - e.radius + 0.02);
        }
    }

    #[test]
    fn test_hit_kills_at_zero() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut e = Enemy::spawn(EnemyKind::Chaser, Vec2::ZERO, &mut rng);
        assert!(!e.hit(1));
        assert!(e.alive);
        assert!(e.hit(1));
        assert!(!e.alive);
    }
}
