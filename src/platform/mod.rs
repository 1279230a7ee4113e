//! Host binding layer
//!
//! The adapter resolves its scene objects once, hands their positions and
//! extents to the core as a [`SceneBindings`] value, and later applies the
//! core's [`GameEvent`]s through a [`HostAdapter`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::audio::{self, AudioBackend};
use crate::error::SetupError;
use crate::score::{DigitSink, ScoreDisplay};
use crate::settings::Settings;
use crate::sim::{GameEvent, SceneObject, VisibilityGroup};

/// Initial placement and bounding extent of one scene object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectBinding {
    pub position: Vec3,
    pub extent: Vec3,
}

impl ObjectBinding {
    pub fn new(position: Vec3, extent: Vec3) -> Self {
        Self { position, extent }
    }
}

/// Everything the core needs from the host scene, assembled once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneBindings {
    pub play_area: ObjectBinding,
    pub mover: ObjectBinding,
    pub ball: ObjectBinding,
}

impl SceneBindings {
    pub fn builder() -> SceneBindingsBuilder {
        SceneBindingsBuilder::default()
    }

    /// Stock arena layout: mover two units above the -Y floor, ball at the
    /// spawn point
    pub fn from_settings(settings: &Settings) -> Self {
        let floor = -settings.arena_size.y / 2.0;
        Self {
            play_area: ObjectBinding::new(Vec3::ZERO, settings.arena_size),
            mover: ObjectBinding::new(Vec3::new(0.0, floor + 2.0, 0.0), Vec3::new(6.0, 0.0, 2.0)),
            ball: ObjectBinding::new(settings.spawn_base, Vec3::ONE),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SceneBindingsBuilder {
    play_area: Option<ObjectBinding>,
    mover: Option<ObjectBinding>,
    ball: Option<ObjectBinding>,
}

impl SceneBindingsBuilder {
    pub fn play_area(mut self, binding: ObjectBinding) -> Self {
        self.play_area = Some(binding);
        self
    }

    pub fn mover(mut self, binding: ObjectBinding) -> Self {
        self.mover = Some(binding);
        self
    }

    pub fn ball(mut self, binding: ObjectBinding) -> Self {
        self.ball = Some(binding);
        self
    }

    pub fn build(self) -> Result<SceneBindings, SetupError> {
        Ok(SceneBindings {
            play_area: self.play_area.ok_or(SetupError::MissingBinding("play_area"))?,
            mover: self.mover.ok_or(SetupError::MissingBinding("mover"))?,
            ball: self.ball.ok_or(SetupError::MissingBinding("ball"))?,
        })
    }
}

/// Host-side sink for everything the core produces
///
/// Score changes reach the host digit by digit through its [`DigitSink`],
/// laid out by the board returned from [`HostAdapter::score_display`].
pub trait HostAdapter: AudioBackend + DigitSink {
    fn set_position(&mut self, object: SceneObject, position: Vec3);
    fn set_scale(&mut self, object: SceneObject, scale: Vec3);
    fn set_glow(&mut self, object: SceneObject, intensity: f32);
    fn set_visible(&mut self, group: VisibilityGroup, visible: bool);
    fn score_display(&self) -> ScoreDisplay;
    fn set_game_over_signal(&mut self, on: bool);
}

/// Apply queued events to the host, in order
pub fn dispatch<'a, H, I>(events: I, host: &mut H)
where
    H: HostAdapter,
    I: IntoIterator<Item = &'a GameEvent>,
{
    for event in events {
        match event {
            GameEvent::Moved { object, position } => host.set_position(*object, *position),
            GameEvent::Scaled { object, scale } => host.set_scale(*object, *scale),
            GameEvent::Glow { object, intensity } => host.set_glow(*object, *intensity),
            GameEvent::Visibility { group, visible } => host.set_visible(*group, *visible),
            GameEvent::Sound(request) => audio::play(host, request),
            GameEvent::ScoreChanged(value) => {
                let board = host.score_display();
                board.display_value(*value, host);
            }
            GameEvent::GameOverSignal(on) => host.set_game_over_signal(*on),
            GameEvent::PhaseChanged(_) | GameEvent::RoundStarted { .. } => {}
        }
    }
}
