//! Arena Pong - simulation core for a 3D Pong game hosted by a scene editor
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (ball, mover, play area, round state machine)
//! - `platform`: Host binding contracts and event dispatch
//! - `audio`: Sound cue requests
//! - `input`: Key events and bindings
//! - `score`: Digit layout for the score display
//! - `settings`: Data-driven game tuning

pub mod audio;
pub mod error;
pub mod input;
pub mod platform;
pub mod score;
pub mod settings;
pub mod sim;

pub use error::SetupError;
pub use settings::{Settings, Variant};

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Host timer interval (30 Hz)
    pub const SIM_DT: f32 = 1.0 / 30.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the stepper will try to catch up on
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Arena dimensions (X, Y, Z); the mover defends the -Y end
    pub const ARENA_SIZE: Vec3 = Vec3::new(40.0, 60.0, 20.0);

    pub const INITIAL_BALL_SPEED: f32 = 8.0;
    pub const INITIAL_MOVER_SPEED: f32 = 10.0;
    pub const INITIAL_SCORE_FACTOR: u64 = 100_000_000;
    /// Score factor is divided by this at the start of every round
    pub const SCORE_FACTOR_DECAY: u64 = 10;

    /// Speed escalation applied after a round the mover survived
    pub const BALL_SPEED_STEP: f32 = 1.2;
    pub const MOVER_SPEED_STEP: f32 = 1.1;

    /// Mover scale multiplier on every hit
    pub const MOVER_SHRINK: f32 = 0.8;

    /// Glow durations (seconds)
    pub const AREA_GLOW_TIME: f32 = 0.15;
    pub const MOVER_GLOW_TIME: f32 = 0.15;
    pub const BALL_GLOW_TIME: f32 = 1.0;

    /// Spawn point and full jitter width (±half on X/Z)
    pub const SPAWN_BASE: Vec3 = Vec3::new(0.0, 20.0, 0.0);
    pub const SPAWN_JITTER: Vec3 = Vec3::new(3.0, 0.0, 3.0);
    /// Lateral direction magnitude used by diagonal spawns
    pub const SPAWN_DIAGONAL: f32 = 0.5;

    /// Mover slab depth as a fraction of ball speed
    pub const DEPTH_TOLERANCE: f32 = 0.2;
    /// How far below the mover the ball must fall to count as missed
    pub const MISS_MARGIN: f32 = 42.0;

    /// Per-axis mover speed multipliers (Y never moves)
    pub const MOVER_SPEED_AXES: Vec3 = Vec3::new(1.0, 0.0, 1.0);

    /// Digits on the score board
    pub const SCORE_DIGITS: usize = 9;

    /// Sound distance references
    pub const HIT_DISTANCE_REF: f32 = 10.0;
    pub const MOVER_HIT_DISTANCE_REF: f32 = 15.0;
    pub const SPAWN_DISTANCE_REF: f32 = 30.0;
}

/// A world axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Component of `v` along this axis
    #[inline]
    pub fn of(self, v: Vec3) -> f32 {
        v[self.index()]
    }

    /// Overwrite the component of `v` along this axis
    #[inline]
    pub fn set(self, v: &mut Vec3, value: f32) {
        v[self.index()] = value;
    }
}

/// Normalize `direction` and scale it to `magnitude`
///
/// Callers guarantee a non-zero direction (spawn directions always carry
/// a fixed Y component).
#[inline]
pub fn scaled_direction(direction: Vec3, magnitude: f32) -> Vec3 {
    debug_assert!(direction.length_squared() > 0.0, "zero direction");
    direction.normalize() * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_direction_has_requested_length() {
        let v = scaled_direction(Vec3::new(0.5, -1.0, -0.5), 8.0);
        assert!((v.length() - 8.0).abs() < 1e-4);
        assert!(v.y < 0.0);
    }

    #[test]
    fn test_axis_access() {
        let mut v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Axis::Z.of(v), 3.0);
        Axis::Y.set(&mut v, -4.0);
        assert_eq!(v, Vec3::new(1.0, -4.0, 3.0));
    }
}
