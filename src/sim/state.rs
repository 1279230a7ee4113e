//! Game state
//!
//! `PongGame` owns the arena, mover and ball plus the round/score fields, and
//! is the only thing that mutates them. Transitions live in `tick.rs`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::area::PlayArea;
use super::ball::Ball;
use super::events::GameEvent;
use super::mover::Mover;
use crate::error::SetupError;
use crate::platform::SceneBindings;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first game; only the restart key does anything
    WaitingToStart,
    /// Active gameplay
    Playing,
    /// Run ended; waiting for the restart key
    GameOver,
}

pub struct PongGame {
    pub(crate) settings: Settings,
    pub(crate) play_area: PlayArea,
    pub(crate) mover: Mover,
    pub(crate) ball: Ball,
    pub(crate) phase: GamePhase,
    pub(crate) round: u32,
    pub(crate) score: u64,
    pub(crate) score_factor: u64,
    pub(crate) has_mover_been_hit: bool,
    /// Simulation tick counter
    pub(crate) time_ticks: u64,
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
}

impl PongGame {
    /// Build a session from host bindings. The game waits for the restart
    /// key before the first serve.
    pub fn new(bindings: &SceneBindings, settings: Settings, seed: u64) -> Result<Self, SetupError> {
        settings.validate()?;
        if bindings.play_area.extent.cmple(glam::Vec3::ZERO).any() {
            return Err(SetupError::invalid("play_area", "extent must be positive on every axis"));
        }

        let mut events = Vec::new();
        let play_area = PlayArea::new(bindings.play_area.extent, settings.area_glow_time);

        let mut mover = Mover::new(&bindings.mover, &settings);
        mover.apply_movement_range_from_area(&play_area, &mut events);

        let mut ball = Ball::new(&bindings.ball, &settings);
        ball.apply_movement_range_from_area(&play_area);

        let mut game = Self {
            score_factor: settings.initial_score_factor,
            settings,
            play_area,
            mover,
            ball,
            phase: GamePhase::WaitingToStart,
            round: 0,
            score: 0,
            has_mover_been_hit: false,
            time_ticks: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            events,
        };

        game.set_score(0);
        game.mover.set_visible(false, &mut game.events);
        log::info!(
            "{} session ready (seed {seed}), waiting for restart key",
            game.settings.variant.as_str()
        );
        Ok(game)
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    #[inline]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn score_factor(&self) -> u64 {
        self.score_factor
    }

    #[inline]
    pub fn has_mover_been_hit(&self) -> bool {
        self.has_mover_been_hit
    }

    #[inline]
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn play_area(&self) -> &PlayArea {
        &self.play_area
    }

    pub fn mover(&self) -> &Mover {
        &self.mover
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    /// Direct access for adapters that reposition the ball (and for tests)
    pub fn ball_mut(&mut self) -> &mut Ball {
        &mut self.ball
    }

    /// Events queued since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn set_score(&mut self, value: u64) {
        self.score = value;
        self.events.push(GameEvent::ScoreChanged(value));
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::debug!("phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.events.push(GameEvent::PhaseChanged(phase));
        }
    }
}
