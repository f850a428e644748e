//! Demo bot that plays the game through the normal input path
//!
//! Used by the headless binary and for soak-testing the simulation. It only
//! reads the state and returns a `TickInput`; it never mutates the game.

use glam::Vec2;

use crate::arena_center;
use crate::sim::{Command, GameMode, GameState, TickInput};

/// Enemies closer than this push the bot away
const FLEE_RADIUS: f32 = 180.0;
/// How strongly the bot circles its target instead of standing still
const STRAFE_WEIGHT: f32 = 0.6;
/// Distance from the arena edge where the bot starts drifting back inward
const EDGE_COMFORT: f32 = 90.0;

/// Simple kiting bot: shoot the nearest enemy, back away from anything close
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Circle clockwise (+1) or counter-clockwise (-1) around the target
    pub strafe_sign: f32,
    /// Also press retry instead of advance after a clear
    pub replay_levels: bool,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            strafe_sign: 1.0,
            replay_levels: false,
        }
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide the input for the next tick
    pub fn input(&self, state: &GameState) -> TickInput {
        match state.mode {
            GameMode::Menu => TickInput::with_command(Command::Start),
            GameMode::Paused => TickInput::with_command(Command::TogglePause),
            GameMode::GameOver => TickInput::with_command(Command::Restart),
            GameMode::Cleared => {
                let command = if self.replay_levels {
                    Command::Retry
                } else {
                    Command::Advance
                };
                TickInput::with_command(command)
            }
            GameMode::Playing => self.play(state),
        }
    }

    fn play(&self, state: &GameState) -> TickInput {
        let player = state.player.pos;

        // Most urgent target is simply the closest live enemy
        let target = state
            .enemies
            .iter()
            .filter(|e| e.alive)
            .min_by(|a, b| {
                a.pos
                    .distance_squared(player)
                    .partial_cmp(&b.pos.distance_squared(player))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let Some(target) = target else {
            // Nothing to shoot: wander back to the middle
            return TickInput {
                move_intent: arena_center() - player,
                aim: arena_center() + Vec2::X * 100.0,
                ..Default::default()
            };
        };

        let mut intent = Vec2::ZERO;
        for enemy in state.enemies.iter().filter(|e| e.alive) {
            let away = player - enemy.pos;
            let dist = away.length();
            if dist < FLEE_RADIUS && dist > 0.0 {
                // Closer enemies push harder
                intent += away / dist * (1.0 - dist / FLEE_RADIUS);
            }
        }

        let to_target = (target.pos - player).normalize_or_zero();
        intent += to_target.perp() * STRAFE_WEIGHT * self.strafe_sign;
        intent += edge_pull(player);

        TickInput {
            move_intent: intent,
            aim: target.pos,
            fire: true,
            commands: Vec::new(),
        }
    }
}

/// Inward nudge that grows as the bot approaches a wall
fn edge_pull(pos: Vec2) -> Vec2 {
    use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

    let mut pull = Vec2::ZERO;
    if pos.x < EDGE_COMFORT {
        pull.x += 1.0 - pos.x / EDGE_COMFORT;
    }
    if pos.x > ARENA_WIDTH - EDGE_COMFORT {
        pull.x -= 1.0 - (ARENA_WIDTH - pos.x) / EDGE_COMFORT;
    }
    if pos.y < EDGE_COMFORT {
        pull.y += 1.0 - pos.y / EDGE_COMFORT;
    }
    if pos.y > ARENA_HEIGHT - EDGE_COMFORT {
        pull.y -= 1.0 - (ARENA_HEIGHT - pos.y) / EDGE_COMFORT;
    }
    pull
}
