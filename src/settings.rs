//! Game tuning
//!
//! Everything the simulation treats as a constant lives here so the host can
//! ship different variants of the game from one core.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SetupError;
use crate::input::KeyBindings;

/// Game variant presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Round state machine, diagonal serves, lasers pulse with the ball glow
    #[default]
    Arcade,
    /// Reduced rules: a missed ball is simply served again
    Classic,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Arcade => "Arcade",
            Variant::Classic => "Classic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "arcade" | "rich" => Some(Variant::Arcade),
            "classic" | "simple" => Some(Variant::Classic),
            _ => None,
        }
    }
}

/// How lateral serve directions are picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnDirection {
    /// X and Z each ±[`SPAWN_DIAGONAL`], never grazing a wall
    Diagonal,
    /// X and Z uniform in [-SPAWN_DIAGONAL, SPAWN_DIAGONAL]
    Uniform,
}

/// What happens when the ball gets past the mover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissPolicy {
    /// Next round if the mover returned the ball this round, else game over
    RoundStateMachine,
    /// Serve again in place; no score or game-over consequence
    Respawn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub variant: Variant,

    // === Arena ===
    pub arena_size: Vec3,

    // === Speeds and scoring ===
    pub initial_ball_speed: f32,
    pub initial_mover_speed: f32,
    pub initial_score_factor: u64,
    pub score_factor_decay: u64,
    pub ball_speed_step: f32,
    pub mover_speed_step: f32,
    /// Per-axis multipliers on the mover speed
    pub mover_speed_axes: Vec3,
    pub mover_shrink: f32,

    // === Glow ===
    pub area_glow_time: f32,
    pub mover_glow_time: f32,
    pub ball_glow_time: f32,
    /// Show the ball's spawn lasers only while it glows
    pub lasers_follow_glow: bool,

    // === Ball ===
    pub spawn_base: Vec3,
    pub spawn_jitter: Vec3,
    pub spawn_direction: SpawnDirection,
    pub depth_tolerance: f32,
    pub miss_margin: f32,
    pub miss_policy: MissPolicy,

    // === Host ===
    pub score_digits: usize,
    /// Timer rate the host ticks at (Hz)
    pub tick_rate: f32,
    pub key_bindings: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::Arcade,

            arena_size: ARENA_SIZE,

            initial_ball_speed: INITIAL_BALL_SPEED,
            initial_mover_speed: INITIAL_MOVER_SPEED,
            initial_score_factor: INITIAL_SCORE_FACTOR,
            score_factor_decay: SCORE_FACTOR_DECAY,
            ball_speed_step: BALL_SPEED_STEP,
            mover_speed_step: MOVER_SPEED_STEP,
            mover_speed_axes: MOVER_SPEED_AXES,
            mover_shrink: MOVER_SHRINK,

            area_glow_time: AREA_GLOW_TIME,
            mover_glow_time: MOVER_GLOW_TIME,
            ball_glow_time: BALL_GLOW_TIME,
            lasers_follow_glow: true,

            spawn_base: SPAWN_BASE,
            spawn_jitter: SPAWN_JITTER,
            spawn_direction: SpawnDirection::Diagonal,
            depth_tolerance: DEPTH_TOLERANCE,
            miss_margin: MISS_MARGIN,
            miss_policy: MissPolicy::RoundStateMachine,

            score_digits: SCORE_DIGITS,
            tick_rate: 1.0 / SIM_DT,
            key_bindings: KeyBindings::default(),
        }
    }
}

impl Settings {
    /// Create settings from a variant (applies variant defaults)
    pub fn from_variant(variant: Variant) -> Self {
        let mut settings = Self::default();
        settings.apply_variant(variant);
        settings
    }

    /// Apply the rule set of a variant, leaving unrelated tuning alone
    pub fn apply_variant(&mut self, variant: Variant) {
        self.variant = variant;
        match variant {
            Variant::Arcade => {
                self.spawn_direction = SpawnDirection::Diagonal;
                self.miss_margin = MISS_MARGIN;
                self.lasers_follow_glow = true;
                self.miss_policy = MissPolicy::RoundStateMachine;
            }
            Variant::Classic => {
                self.spawn_direction = SpawnDirection::Uniform;
                self.miss_margin = 0.0;
                self.lasers_follow_glow = false;
                self.miss_policy = MissPolicy::Respawn;
            }
        }
    }

    /// Fixed step length the host timer delivers
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate
    }

    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate a JSON settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded {} settings from {}", settings.variant.as_str(), path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SetupError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject tuning the simulation cannot run with
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.arena_size.cmple(Vec3::ZERO).any() {
            return Err(SetupError::invalid("arena_size", "every axis must be positive"));
        }
        if self.initial_ball_speed <= 0.0 {
            return Err(SetupError::invalid("initial_ball_speed", "must be positive"));
        }
        if self.initial_mover_speed < 0.0 {
            return Err(SetupError::invalid("initial_mover_speed", "must not be negative"));
        }
        if self.score_factor_decay == 0 {
            return Err(SetupError::invalid("score_factor_decay", "must be at least 1"));
        }
        if self.ball_speed_step <= 0.0 || self.mover_speed_step <= 0.0 {
            return Err(SetupError::invalid("speed steps", "must be positive"));
        }
        if !(self.mover_shrink > 0.0 && self.mover_shrink <= 1.0) {
            return Err(SetupError::invalid("mover_shrink", "must be in (0, 1]"));
        }
        if self.area_glow_time < 0.0 || self.mover_glow_time < 0.0 || self.ball_glow_time < 0.0 {
            return Err(SetupError::invalid("glow times", "must not be negative"));
        }
        if self.depth_tolerance <= 0.0 {
            return Err(SetupError::invalid("depth_tolerance", "must be positive"));
        }
        if self.miss_margin < 0.0 {
            return Err(SetupError::invalid("miss_margin", "must not be negative"));
        }
        let half = self.arena_size / 2.0;
        if self.spawn_base.abs().cmpgt(half).any() {
            return Err(SetupError::invalid("spawn_base", "must lie inside the arena"));
        }
        if self.score_digits == 0 {
            return Err(SetupError::invalid("score_digits", "must be at least 1"));
        }
        if self.tick_rate <= 0.0 {
            return Err(SetupError::invalid("tick_rate", "must be positive"));
        }
        Ok(())
    }
}
