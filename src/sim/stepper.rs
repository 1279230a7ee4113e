//! Fixed timestep accumulator
//!
//! Converts variable frame times into a whole number of fixed simulation
//! steps, carrying the remainder to the next frame.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    max_substeps: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    pub fn with_max_substeps(mut self, max_substeps: u32) -> Self {
        self.max_substeps = max_substeps;
        self
    }

    #[inline]
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Leftover time as a fraction of one step (for interpolation)
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// Feed `frame_dt` seconds and return how many fixed steps to run
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= self.dt && steps < self.max_substeps {
            self.accumulator -= self.dt;
            steps += 1;
        }
        if steps == self.max_substeps && self.accumulator >= self.dt {
            // Too far behind: drop the backlog instead of spiralling
            log::warn!("dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator %= self.dt;
        }
        steps
    }
}
