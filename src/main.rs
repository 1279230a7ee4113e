//! Arena Pong headless runner
//!
//! Drives the simulation core the way a host would: a fixed-rate timer,
//! key events between ticks, and an adapter applying the output events.
//! An autopilot holds the arrow keys to chase the ball.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec3;

use arena_pong::audio::{AudioBackend, AudioManager};
use arena_pong::input::{Key, KeyEvent};
use arena_pong::platform::{HostAdapter, SceneBindings, dispatch};
use arena_pong::score::{DigitSink, ScoreDisplay};
use arena_pong::sim::{FixedTimestep, GameEvent, GamePhase, PongGame, SceneObject, VisibilityGroup};
use arena_pong::{Settings, Variant};

#[derive(Parser, Debug)]
#[command(name = "arena-pong", about = "Run a headless Arena Pong session")]
struct Args {
    /// RNG seed
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Simulated seconds to run
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,
    /// Rule set: arcade or classic
    #[arg(long, default_value = "arcade")]
    variant: String,
    /// JSON settings file (overrides --variant)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Host frame rate feeding the fixed-step timer
    #[arg(long, default_value_t = 60.0)]
    fps: f32,
}

/// Counts cues instead of playing them
#[derive(Default)]
struct CueCounter {
    hits: u32,
    spawns: u32,
}

impl AudioBackend for CueCounter {
    fn play_hit_cue(&mut self, location: Vec3, distance_ref: f32) {
        log::trace!("hit cue at {location:?} (ref {distance_ref})");
        self.hits += 1;
    }

    fn play_spawn_cue(&mut self, location: Vec3, distance_ref: f32) {
        log::trace!("spawn cue at {location:?} (ref {distance_ref})");
        self.spawns += 1;
    }
}

/// Logging stand-in for a real scene
struct HeadlessHost {
    audio: AudioManager<CueCounter>,
    board: ScoreDisplay,
    /// Digits currently shown, least significant first
    shown: Vec<u8>,
    game_over_signal: bool,
}

impl AudioBackend for HeadlessHost {
    fn play_hit_cue(&mut self, location: Vec3, distance_ref: f32) {
        self.audio.play_hit_cue(location, distance_ref);
    }

    fn play_spawn_cue(&mut self, location: Vec3, distance_ref: f32) {
        self.audio.play_spawn_cue(location, distance_ref);
    }
}

impl HeadlessHost {
    fn board_text(&self) -> String {
        self.shown.iter().rev().map(|&d| char::from(b'0' + d)).collect()
    }
}

impl DigitSink for HeadlessHost {
    fn set_digit(&mut self, index: usize, digit: u8, offset: f32) {
        log::trace!("digit {index} = {digit} (offset {offset:.1})");
        if let Some(slot) = self.shown.get_mut(index) {
            *slot = digit;
        }
    }
}

impl HostAdapter for HeadlessHost {
    fn set_position(&mut self, object: SceneObject, position: Vec3) {
        log::trace!("{object:?} -> {position:?}");
    }

    fn set_scale(&mut self, object: SceneObject, scale: Vec3) {
        log::debug!("{object:?} scale {scale:?}");
    }

    fn set_glow(&mut self, object: SceneObject, intensity: f32) {
        log::trace!("{object:?} glow {intensity:.2}");
    }

    fn set_visible(&mut self, group: VisibilityGroup, visible: bool) {
        log::debug!("{group:?} visible={visible}");
    }

    fn score_display(&self) -> ScoreDisplay {
        self.board
    }

    fn set_game_over_signal(&mut self, on: bool) {
        self.game_over_signal = on;
    }
}

/// Holds arrow keys toward the ball's X/Z like a player would
#[derive(Default)]
struct Autopilot {
    held: Vec<Key>,
}

impl Autopilot {
    const DEAD_ZONE: f32 = 0.5;

    fn keys_for(game: &PongGame) -> Vec<Key> {
        let delta = game.ball().position - game.mover().position;
        let mut keys = Vec::new();
        if delta.x > Self::DEAD_ZONE {
            keys.push(Key::ArrowRight);
        } else if delta.x < -Self::DEAD_ZONE {
            keys.push(Key::ArrowLeft);
        }
        if delta.z > Self::DEAD_ZONE {
            keys.push(Key::ArrowUp);
        } else if delta.z < -Self::DEAD_ZONE {
            keys.push(Key::ArrowDown);
        }
        keys
    }

    /// Key transitions to send before the next tick
    fn steer(&mut self, game: &PongGame) -> Vec<KeyEvent> {
        if game.phase() != GamePhase::Playing {
            self.held.clear();
            return vec![KeyEvent::press(Key::ArrowUp), KeyEvent::release(Key::ArrowUp)];
        }

        let wanted = Self::keys_for(game);
        let mut events: Vec<KeyEvent> = self
            .held
            .iter()
            .filter(|key| !wanted.contains(key))
            .map(|&key| KeyEvent::release(key))
            .collect();
        events.extend(
            wanted
                .iter()
                .filter(|key| !self.held.contains(key))
                .map(|&key| KeyEvent::press(key)),
        );
        self.held = wanted;
        events
    }
}

fn load_settings(args: &Args) -> Result<Settings> {
    if let Some(path) = &args.config {
        return Settings::load(path).with_context(|| format!("loading {}", path.display()));
    }
    let variant = Variant::from_str(&args.variant)
        .with_context(|| format!("unknown variant `{}`", args.variant))?;
    Ok(Settings::from_variant(variant))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = load_settings(&args)?;
    let bindings = SceneBindings::from_settings(&settings);
    let mut stepper = FixedTimestep::new(settings.tick_dt());
    let mut host = HeadlessHost {
        audio: AudioManager::new(CueCounter::default()),
        board: ScoreDisplay::new(settings.score_digits),
        shown: vec![0; settings.score_digits],
        game_over_signal: false,
    };

    let mut game = PongGame::new(&bindings, settings, args.seed).context("setting up game")?;
    let mut autopilot = Autopilot::default();
    let mut games = 0u32;
    let mut best_round = 0u32;

    let frame_dt = 1.0 / args.fps;
    let frames = (args.seconds * args.fps).ceil() as u32;
    log::info!("Running {frames} frames at {} fps", args.fps);

    for _ in 0..frames {
        for _ in 0..stepper.advance(frame_dt) {
            for key_event in autopilot.steer(&game) {
                game.set_event(key_event);
            }
            game.update(stepper.dt());

            let events = game.drain_events();
            for event in &events {
                if let GameEvent::RoundStarted { round, .. } = event {
                    best_round = best_round.max(*round);
                    if *round == 1 {
                        games += 1;
                    }
                }
            }
            dispatch(&events, &mut host);
            if events.iter().any(|e| matches!(e, GameEvent::ScoreChanged(_))) {
                log::info!("score board [{}]", host.board_text());
            }
        }
    }

    let cues = host.audio.backend();
    println!(
        "Arena Pong ({}, seed {})",
        game.settings().variant.as_str(),
        game.seed()
    );
    println!("  games started : {games}");
    println!("  best round    : {best_round}");
    println!("  final score   : [{}]", host.board_text());
    println!("  phase         : {:?}", game.phase());
    println!("  game over lit : {}", host.game_over_signal);
    println!("  cues          : {} hit, {} spawn", cues.hits, cues.spawns);
    Ok(())
}
