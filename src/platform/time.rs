//! Fixed-step frame clock

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Turns measured frame times into a whole number of `SIM_DT` ticks
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
    /// Total simulated time discarded by the substep cap
    dropped: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's wall-clock duration. Returns how many fixed ticks to run.
    ///
    /// The frame time is clamped to `MAX_FRAME_DT` and at most `MAX_SUBSTEPS`
    /// ticks are produced. Whatever is left over after hitting the cap is
    /// thrown away so a stall never turns into a catch-up spiral.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            self.dropped += self.accumulator;
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Fraction of a tick waiting in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }

    pub fn dropped(&self) -> f32 {
        self.dropped
    }
}
