//! Input latching
//!
//! Held keys, the pointer and the fire button are sampled every tick.
//! Key presses that map to commands are queued once per press and handed to
//! the first tick of the next frame only, so a frame that runs several
//! substeps never applies the same command twice.

use glam::Vec2;

use crate::arena_center;
use crate::sim::{Command, TickInput};

/// Physical keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Start / confirm
    Enter,
    /// Pause toggle
    Escape,
    /// Next level (when cleared)
    N,
    /// Retry level (when cleared)
    R,
}

impl Key {
    /// Command sent when the key goes down, if any
    pub fn command(self) -> Option<Command> {
        match self {
            Key::Enter => Some(Command::Start),
            Key::Escape => Some(Command::TogglePause),
            Key::N => Some(Command::Advance),
            Key::R => Some(Command::Retry),
            Key::Up | Key::Down | Key::Left | Key::Right => None,
        }
    }
}

/// Accumulates raw input between frames
#[derive(Debug, Clone)]
pub struct InputLatch {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    fire: bool,
    aim: Vec2,
    pending: Vec<Command>,
}

impl Default for InputLatch {
    fn default() -> Self {
        Self {
            up: false,
            down: false,
            left: false,
            right: false,
            fire: false,
            aim: arena_center(),
            pending: Vec::new(),
        }
    }
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key down. OS auto-repeat should be filtered by the caller.
    pub fn key_down(&mut self, key: Key) {
        self.set_held(key, true);
        if let Some(command) = key.command() {
            self.pending.push(command);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.set_held(key, false);
    }

    /// Pointer position in arena coordinates
    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.aim = pos;
    }

    pub fn set_fire(&mut self, held: bool) {
        self.fire = held;
    }

    /// Window close or similar
    pub fn request_quit(&mut self) {
        self.pending.push(Command::Quit);
    }

    /// Raw directional intent from the held keys (not normalized)
    pub fn move_intent(&self) -> Vec2 {
        let mut intent = Vec2::ZERO;
        if self.up {
            intent.y -= 1.0;
        }
        if self.down {
            intent.y += 1.0;
        }
        if self.left {
            intent.x -= 1.0;
        }
        if self.right {
            intent.x += 1.0;
        }
        intent
    }

    /// Build the input for the next tick. Queued commands are drained, so
    /// only the first call after a key press sees them.
    pub fn next_tick(&mut self) -> TickInput {
        TickInput {
            move_intent: self.move_intent(),
            aim: self.aim,
            fire: self.fire,
            commands: std::mem::take(&mut self.pending),
        }
    }

    fn set_held(&mut self, key: Key, held: bool) {
        match key {
            Key::Up => self.up = held,
            Key::Down => self.down = held,
            Key::Left => self.left = held,
            Key::Right => self.right = held,
            Key::Enter | Key::Escape | Key::N | Key::R => {}
        }
    }
}
