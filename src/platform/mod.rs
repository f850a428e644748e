//! Platform abstraction layer
//!
//! Host-side pieces that sit between the OS/window and the simulation:
//! - Frame timing (fixed-step accumulator)
//! - Input events (held keys and one-shot commands)

pub mod input;
pub mod time;

pub use input::{InputLatch, Key};
pub use time::FrameClock;
