//! Output events
//!
//! The core never touches the host scene. Every visual or audio consequence
//! of a tick is queued here and drained by the adapter.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::GamePhase;
use crate::audio::SoundRequest;

/// Logical scene objects the core drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneObject {
    Ball,
    Mover,
    PlayArea,
}

/// Objects shown or hidden together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisibilityGroup {
    /// The mover and its guide lasers
    Mover,
    /// Lasers marking the ball's spawn
    BallLasers,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Moved { object: SceneObject, position: Vec3 },
    Scaled { object: SceneObject, scale: Vec3 },
    /// Emissive strength in [0, 1]
    Glow { object: SceneObject, intensity: f32 },
    Visibility { group: VisibilityGroup, visible: bool },
    Sound(SoundRequest),
    ScoreChanged(u64),
    GameOverSignal(bool),
    PhaseChanged(GamePhase),
    RoundStarted {
        round: u32,
        ball_speed: f32,
        mover_speed: f32,
    },
}
