//! The player avatar: movement, firing cooldown, health, buffs, and scoring

use glam::Vec2;

use super::barrier::{Barrier, resolve_against_all};
use crate::arena_center;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, PLAYER_EDGE_MARGIN};

pub const PLAYER_RADIUS: f32 = 14.0;
pub const PLAYER_MAX_HP: i32 = 100;
pub const PLAYER_BASE_SPEED: f32 = 210.0;
/// Movement never drops below this
pub const PLAYER_MIN_SPEED: f32 = 120.0;
pub const RAPID_SPEED_BONUS: f32 = 120.0;
pub const SPREAD_SPEED_BONUS: f32 = 120.0;
pub const SHIELD_SPEED_PENALTY: f32 = 20.0;

pub const FIRE_COOLDOWN: f32 = 0.18;
pub const RAPID_COOLDOWN_FACTOR: f32 = 0.45;

/// Grace window after taking a hit
pub const HIT_INVULN: f32 = 0.2;
/// Grace window after the shield pops
pub const SHIELD_INVULN: f32 = 0.15;
/// Shield timer runs at this fraction of real time
pub const SHIELD_DECAY_RATE: f32 = 0.25;

/// Combo window after each kill, in seconds
pub const COMBO_WINDOW: f32 = 3.0;
/// Combo multiplier is tracked in tenths: 10 = x1.0, 50 = x5.0
const COMBO_TENTHS_MIN: u32 = 10;
const COMBO_TENTHS_MAX: u32 = 50;

/// Outcome of [`Player::damage`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Still inside the invulnerability window, nothing happened
    Ignored,
    /// Shield took the hit
    Shielded,
    /// Health was deducted
    Wounded,
}

impl DamageOutcome {
    /// Whether the hit registered (shield pops count)
    pub fn applied(self) -> bool {
        !matches!(self, DamageOutcome::Ignored)
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub speed: f32,
    pub base_speed: f32,
    pub radius: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub invuln_timer: f32,
    pub shield_timer: f32,
    combo_tenths: u32,
    pub combo_timer: f32,
    pub score: u64,
    pub high_score: u64,
    pub fire_cooldown: f32,
    pub fire_timer: f32,
    pub rapid_timer: f32,
    pub spread_timer: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(arena_center())
    }
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            speed: PLAYER_BASE_SPEED,
            base_speed: PLAYER_BASE_SPEED,
            radius: PLAYER_RADIUS,
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            invuln_timer: 0.0,
            shield_timer: 0.0,
            combo_tenths: COMBO_TENTHS_MIN,
            combo_timer: 0.0,
            score: 0,
            high_score: 0,
            fire_cooldown: FIRE_COOLDOWN,
            fire_timer: 0.0,
            rapid_timer: 0.0,
            spread_timer: 0.0,
        }
    }

    /// Current score multiplier, 1.0 to 5.0 in steps of 0.1
    pub fn combo(&self) -> f32 {
        self.combo_tenths as f32 / 10.0
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Movement speed with buffs applied.
    ///
    /// The buff bonuses only kick in while rapid-fire is running; otherwise the
    /// plain walking speed is used.
    pub fn effective_speed(&self) -> f32 {
        let chosen = if self.rapid_timer > 0.0 {
            let mut boosted = self.base_speed + RAPID_SPEED_BONUS;
            if self.spread_timer > 0.0 {
                boosted += SPREAD_SPEED_BONUS;
            }
            if self.shield_timer > 0.0 {
                boosted -= SHIELD_SPEED_PENALTY;
            }
            boosted
        } else {
            self.speed
        };
        chosen.max(PLAYER_MIN_SPEED)
    }

    /// Move along `intent`, stay in the arena, resolve barriers, decay timers
    pub fn update(&mut self, dt: f32, intent: Vec2, barriers: &[Barrier]) {
        let dir = intent.normalize_or_zero();
        self.vel = dir * self.effective_speed();
        self.pos += self.vel * dt;
        self.pos.x = self
            .pos
            .x
            .clamp(PLAYER_EDGE_MARGIN, ARENA_WIDTH - PLAYER_EDGE_MARGIN);
        self.pos.y = self
            .pos
            .y
            .clamp(PLAYER_EDGE_MARGIN, ARENA_HEIGHT - PLAYER_EDGE_MARGIN);
        resolve_against_all(&mut self.pos, self.radius, barriers);

        self.invuln_timer = (self.invuln_timer - dt).max(0.0);
        self.rapid_timer = (self.rapid_timer - dt).max(0.0);
        self.spread_timer = (self.spread_timer - dt).max(0.0);
        self.shield_timer = (self.shield_timer - dt * SHIELD_DECAY_RATE).max(0.0);
        self.tick_combo(dt);
    }

    fn tick_combo(&mut self, dt: f32) {
        if self.combo_timer > 0.0 {
            self.combo_timer = (self.combo_timer - dt).max(0.0);
            if self.combo_timer == 0.0 {
                self.combo_tenths = COMBO_TENTHS_MIN;
            }
        }
    }

    pub fn can_shoot(&self) -> bool {
        self.fire_timer <= 0.0
    }

    /// Start a new cooldown (shorter while rapid-fire is active)
    pub fn reset_cooldown(&mut self) {
        let mut cooldown = FIRE_COOLDOWN;
        if self.rapid_timer > 0.0 {
            cooldown *= RAPID_COOLDOWN_FACTOR;
        }
        self.fire_cooldown = cooldown;
        self.fire_timer = cooldown;
    }

    pub fn tick_cooldown(&mut self, dt: f32) {
        self.fire_timer = (self.fire_timer - dt).max(0.0);
    }

    /// Take a hit, honoring the invulnerability window and shield
    pub fn damage(&mut self, amount: i32) -> DamageOutcome {
        if self.invuln_timer > 0.0 {
            return DamageOutcome::Ignored;
        }
        if self.shield_timer > 0.0 {
            self.shield_timer = 0.0;
            self.invuln_timer = SHIELD_INVULN;
            return DamageOutcome::Shielded;
        }
        self.hp = (self.hp - amount).max(0);
        self.invuln_timer = HIT_INVULN;
        DamageOutcome::Wounded
    }

    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    /// Award kill points scaled by the combo, then bump the combo.
    ///
    /// Returns the points actually granted.
    pub fn add_score(&mut self, base: u64) -> u64 {
        let granted = base * self.combo_tenths as u64 / 10;
        self.score += granted;
        self.high_score = self.high_score.max(self.score);
        self.combo_tenths = (self.combo_tenths + 1).min(COMBO_TENTHS_MAX);
        self.combo_timer = COMBO_WINDOW;
        granted
    }

    pub fn grant_rapid(&mut self, secs: f32) {
        self.rapid_timer = self.rapid_timer.max(secs);
    }

    pub fn grant_spread(&mut self, secs: f32) {
        self.spread_timer = self.spread_timer.max(secs);
    }

    pub fn grant_shield(&mut self, secs: f32) {
        self.shield_timer = self.shield_timer.max(secs);
    }

    /// Back to the arena center, standing still
    pub fn reset_position(&mut self) {
        self.pos = arena_center();
        self.vel = Vec2::ZERO;
    }

    pub fn refill_hp(&mut self) {
        self.hp = self.max_hp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_combo_resets_after_quiet_period() {
        let mut p = Player::default();
        p.add_score(10);
        p.add_score(10);
        assert_eq!(p.combo(), 1.2);

        // 3.0s in exact binary steps
        for _ in 0..6 {
            p.update(0.5, Vec2::ZERO, &[]);
        }
        assert_eq!(p.combo(), 1.0);
        assert_eq!(p.add_score(10), 10);
    }

    #[test]
    fn test_combo_survives_inside_window() {
        let mut p = Player::default();
        p.add_score(10);
        p.update(2.5, Vec2::ZERO, &[]);
        assert_eq!(p.add_score(10), 11);
        assert_eq!(p.combo(), 1.2);
    }

    #[test]
    fn test_score_scaling_is_floored() {
        let mut p = Player::default();
        for _ in 0..3 {
            p.add_score(10);
        }
        // x1.3 on a tank
        assert_eq!(p.add_score(20), 26);
        // x1.4 on 5 points -> 7
        assert_eq!(p.add_score(5), 7);
        assert_eq!(p.score, 10 + 11 + 12 + 26 + 7);
        assert_eq!(p.high_score, p.score);
    }

    #[test]
    fn test_invulnerability_blocks_second_hit() {
        let mut p = Player::default();
        assert_eq!(p.damage(10), DamageOutcome::Wounded);
        assert_eq!(p.damage(10), DamageOutcome::Ignored);
        assert_eq!(p.hp, 90);

        p.update(0.1, Vec2::ZERO, &[]);
        assert_eq!(p.damage(10), DamageOutcome::Ignored);
        p.update(0.125, Vec2::ZERO, &[]);
        assert_eq!(p.damage(10), DamageOutcome::Wounded);
        assert_eq!(p.hp, 80);
    }

    #[test]
    fn test_shield_absorbs_exactly_one_hit() {
        let mut p = Player::default();
        p.grant_shield(10.0);

        let outcome = p.damage(16);
        assert_eq!(outcome, DamageOutcome::Shielded);
        assert!(outcome.applied());
        assert_eq!(p.hp, PLAYER_MAX_HP);
        assert_eq!(p.shield_timer, 0.0);
        assert_eq!(p.invuln_timer, SHIELD_INVULN);

        assert_eq!(p.damage(16), DamageOutcome::Ignored);
        p.update(0.25, Vec2::ZERO, &[]);
        assert_eq!(p.damage(16), DamageOutcome::Wounded);
        assert_eq!(p.hp, PLAYER_MAX_HP - 16);
    }

    #[test]
    fn test_hp_never_negative() {
        let mut p = Player::default();
        p.hp = 5;
        p.damage(16);
        assert_eq!(p.hp, 0);
        assert!(p.is_dead());
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut p = Player::default();
        p.hp = 50;
        p.heal(80);
        assert_eq!(p.hp, p.max_hp);
    }

    #[test]
    fn test_cooldown_cycle() {
        let mut p = Player::default();
        assert!(p.can_shoot());
        p.reset_cooldown();
        assert_eq!(p.fire_timer, FIRE_COOLDOWN);
        assert!(!p.can_shoot());
        p.tick_cooldown(1.0);
        assert_eq!(p.fire_timer, 0.0);
        assert!(p.can_shoot());

        p.grant_rapid(5.0);
        p.reset_cooldown();
        assert!((p.fire_cooldown - FIRE_COOLDOWN * RAPID_COOLDOWN_FACTOR).abs() < 1e-6);
    }

    #[test]
    fn test_effective_speed() {
        let mut p = Player::default();
        assert_eq!(p.effective_speed(), 210.0);

        // Spread alone doesn't change walking speed
        p.grant_spread(5.0);
        assert_eq!(p.effective_speed(), 210.0);

        p.grant_rapid(5.0);
        assert_eq!(p.effective_speed(), 450.0);

        p.grant_shield(5.0);
        assert_eq!(p.effective_speed(), 430.0);

        p.base_speed = 0.0;
        p.spread_timer = 0.0;
        assert_eq!(p.effective_speed(), PLAYER_MIN_SPEED);
    }

    #[test]
    fn test_diagonal_move_is_normalized() {
        let mut p = Player::default();
        let start = p.pos;
        p.update(0.1, Vec2::new(1.0, 1.0), &[]);
        assert!(((p.pos - start).length() - 21.0).abs() < 1e-3);
    }

    #[test]
    fn test_clamped_to_arena() {
        let mut p = Player::default();
        for _ in 0..100 {
            p.update(0.1, Vec2::new(-1.0, -1.0), &[]);
        }
        assert_eq!(p.pos, Vec2::new(PLAYER_EDGE_MARGIN, PLAYER_EDGE_MARGIN));
    }

    #[test]
    fn test_barrier_pushes_player() {
        let mut p = Player::default();
        let wall = Barrier::new(p.pos.x + 20.0, 0.0, 24.0, ARENA_HEIGHT);
        for _ in 0..60 {
            p.update(1.0 / 60.0, Vec2::X, &[wall]);
        }
        assert!(p.pos.x <= wall.rect.left() - PLAYER_RADIUS + 0.02);
    }

    proptest! {
        #[test]
        fn prop_combo_never_exceeds_five(gaps in proptest::collection::vec(0.0f32..2.9, 1..120)) {
            let mut p = Player::default();
            for gap in gaps {
                p.update(gap, Vec2::ZERO, &[]);
                p.add_score(10);
                prop_assert!(p.combo() <= 5.0);
                prop_assert!(p.combo() >= 1.0);
            }
        }
    }
}
