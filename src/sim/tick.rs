//! Per-tick simulation step and the game-mode state machine
//!
//! Commands are applied first, then the playing update runs (only while
//! `Playing`), in a fixed order: camera, level clock, player, firing,
//! spawning, enemies, bullets, hits, contacts, cleanup, flash, death check.

use glam::Vec2;

use super::bullet::{BULLET_SPEED, Bullet};
use super::state::{FLASH_PLAYER_HIT, GameMode, GameState, SHAKE_PLAYER_HIT};
use crate::{circles_touch, vec_from_angle};

/// Bullets in a spread volley
pub const SPREAD_SHOT_COUNT: u32 = 5;
/// Angle between neighbouring bullets in a spread volley (radians).
/// Applied per step on purpose, so five bullets fan out ±0.36 rad.
pub const SPREAD_STEP: f32 = 0.18;
/// Bullets appear this far beyond the player's rim
pub const MUZZLE_OFFSET: f32 = 6.0;

/// Discrete one-shot commands from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Confirm: start from the menu (also advances when cleared, restarts on game over)
    Start,
    TogglePause,
    /// Next level after a clear
    Advance,
    /// Replay the cleared level
    Retry,
    /// New session after game over
    Restart,
    Quit,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement intent (any length; normalized by the player)
    pub move_intent: Vec2,
    /// Aim target in arena coordinates
    pub aim: Vec2,
    /// Fire button held
    pub fire: bool,
    /// Commands received since the last tick, in order
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn with_command(command: Command) -> Self {
        Self {
            commands: vec![command],
            ..Default::default()
        }
    }
}

/// What drives a mode change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Command(Command),
    /// Level countdown reached zero
    LevelTimerExpired,
    /// Player hp dropped to zero
    PlayerDied,
}

/// Side effect that accompanies a mode change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionAction {
    None,
    AdvanceLevel,
    RetryLevel,
    RestartSession,
}

/// Whether the host should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Transition table. `None` means the trigger is ignored in this mode.
pub fn transition(mode: GameMode, trigger: Trigger) -> Option<(GameMode, TransitionAction)> {
    use Command::*;
    use GameMode::*;
    use TransitionAction as A;

    let next = match (mode, trigger) {
        (Menu, Trigger::Command(Start)) => (Playing, A::None),
        (Playing, Trigger::Command(TogglePause)) => (Paused, A::None),
        (Paused, Trigger::Command(TogglePause)) => (Playing, A::None),
        (Playing, Trigger::LevelTimerExpired) => (Cleared, A::None),
        (Playing, Trigger::PlayerDied) => (GameOver, A::None),
        (Cleared, Trigger::Command(Advance | Start)) => (Playing, A::AdvanceLevel),
        (Cleared, Trigger::Command(Retry)) => (Playing, A::RetryLevel),
        (GameOver, Trigger::Command(Restart | Start)) => (Menu, A::RestartSession),
        _ => return None,
    };
    Some(next)
}

/// Feed a trigger through the state machine, running its side effect
pub fn apply_trigger(state: &mut GameState, trigger: Trigger) -> bool {
    let Some((next, action)) = transition(state.mode, trigger) else {
        log::debug!("Ignoring {:?} in {}", trigger, state.mode.as_str());
        return false;
    };

    let prev = state.mode;
    match action {
        TransitionAction::None => {}
        TransitionAction::AdvanceLevel => state.advance_level(),
        TransitionAction::RetryLevel => state.retry_level(),
        TransitionAction::RestartSession => *state = state.restarted(),
    }

    log::info!(
        "{} -> {} ({:?}), level {}, score {}",
        prev.as_str(),
        next.as_str(),
        trigger,
        state.level.number,
        state.player.score
    );
    state.mode = next;
    true
}

/// Advance the game by one tick of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Flow {
    for &command in &input.commands {
        if command == Command::Quit {
            log::info!("Quit requested in {}", state.mode.as_str());
            return Flow::Quit;
        }
        apply_trigger(state, Trigger::Command(command));
    }

    state.aim = input.aim;

    if state.mode == GameMode::Playing {
        update_playing(state, input, dt);
    }
    Flow::Continue
}

fn update_playing(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    state.camera.update(dt, &mut state.rng);

    if state.level.tick_clock(dt) {
        apply_trigger(state, Trigger::LevelTimerExpired);
        return;
    }

    state.player.update(dt, input.move_intent, &state.barriers);
    state.player.tick_cooldown(dt);

    if input.fire && state.player.can_shoot() {
        fire(state, input.aim);
    }

    if state.level.tick_spawn(dt) {
        state.spawn_wave();
    }

    let player_pos = state.player.pos;
    for enemy in state.enemies.iter_mut() {
        enemy.update(dt, player_pos, &state.barriers);
    }

    for bullet in state.bullets.iter_mut() {
        bullet.update(dt);
    }

    resolve_bullet_hits(state);
    resolve_player_contacts(state);

    state.enemies.sweep();
    state.bullets.sweep();
    state.particles.retain_mut(|p| p.update(dt));

    state.flash = (state.flash - dt).max(0.0);

    if state.player.is_dead() {
        apply_trigger(state, Trigger::PlayerDied);
    }
}

/// Shoot toward `aim`: one bullet, or a fan while the spread buff is up
fn fire(state: &mut GameState, aim: Vec2) {
    let to_aim = aim - state.player.pos;
    if to_aim.length_squared() <= 1.0 {
        return;
    }
    let angle = to_aim.y.atan2(to_aim.x);

    let (count, step) = if state.player.spread_timer > 0.0 {
        (SPREAD_SHOT_COUNT, SPREAD_STEP)
    } else {
        (1, 0.0)
    };

    let muzzle = state.player.radius + MUZZLE_OFFSET;
    let center = (count - 1) as f32 / 2.0;
    for i in 0..count {
        let dir = vec_from_angle(angle + (i as f32 - center) * step);
        state
            .bullets
            .spawn(Bullet::new(state.player.pos + dir * muzzle, dir * BULLET_SPEED));
    }

    state.player.reset_cooldown();
    let flash_pos = state.player.pos + vec_from_angle(angle) * muzzle;
    state.add_muzzle(flash_pos, angle);
}

/// Each live bullet damages at most one enemy per tick (first in list order)
fn resolve_bullet_hits(state: &mut GameState) {
    let mut sparks = Vec::new();
    let mut kills = Vec::new();

    for bullet in state.bullets.iter_mut().filter(|b| b.alive) {
        for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
            if !circles_touch(enemy.pos, enemy.radius, bullet.pos, bullet.radius) {
                continue;
            }
            let killed = enemy.hit(bullet.damage);
            bullet.consume_pierce();
            sparks.push(bullet.pos);
            if killed {
                kills.push((enemy.pos, enemy.kind));
            }
            break;
        }
    }

    for pos in sparks {
        state.add_hit_spark(pos);
    }
    for (pos, kind) in kills {
        state.on_enemy_killed(pos, kind);
    }
}

/// Enemies touching the player deal contact damage and are destroyed either way
fn resolve_player_contacts(state: &mut GameState) {
    let mut blasts = Vec::new();

    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        if !circles_touch(enemy.pos, enemy.radius, state.player.pos, state.player.radius) {
            continue;
        }
        if state.player.damage(enemy.damage).applied() {
            state.camera.shake(SHAKE_PLAYER_HIT);
            state.flash = FLASH_PLAYER_HIT;
        }
        enemy.alive = false;
        blasts.push((enemy.pos, enemy.color));
    }

    for (pos, color) in blasts {
        state.add_explosion(pos, color);
    }
}
