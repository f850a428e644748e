//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order within each pool)
//! - No rendering or platform dependencies

pub mod barrier;
pub mod bullet;
pub mod camera;
pub mod enemy;
pub mod level;
pub mod particle;
pub mod player;
pub mod pool;
pub mod state;
pub mod tick;

pub use barrier::{Barrier, Rect, resolve_circle_rect};
pub use bullet::Bullet;
pub use camera::Camera;
pub use enemy::{Enemy, EnemyKind, EnemyStats};
pub use level::LevelState;
pub use particle::Particle;
pub use player::{DamageOutcome, Player};
pub use pool::{Lifecycle, Pool};
pub use state::{GameMode, GameState, MAX_PARTICLES};
pub use tick::{
    Command, Flow, TickInput, TransitionAction, Trigger, apply_trigger, tick, transition,
};
