//! Tick-driven simulation module
//!
//! All gameplay logic lives here. This module must stay host-agnostic:
//! - Caller-supplied timestep, one update per host timer tick
//! - Seeded RNG only
//! - Fixed update order: mover, ball, play area
//! - Visual and audio effects leave only as `GameEvent`s

pub mod area;
pub mod ball;
pub mod collision;
pub mod events;
pub mod glow;
pub mod mover;
pub mod state;
pub mod stepper;
pub mod tick;

pub use area::{AxisRange, PlayArea};
pub use ball::{Ball, BallContact};
pub use collision::{Side, collide_wall, reflect_axis, within_cross_section};
pub use events::{GameEvent, SceneObject, VisibilityGroup};
pub use glow::GlowState;
pub use mover::{CommandSet, Mover, MoverCommand};
pub use state::{GamePhase, PongGame};
pub use stepper::FixedTimestep;
