//! Per-tick update, input handling and round/game transitions

use super::ball::BallContact;
use super::events::GameEvent;
use super::state::{GamePhase, PongGame};
use crate::input::{GameInput, KeyEvent};
use crate::settings::MissPolicy;

impl PongGame {
    /// Advance the simulation by `dt` seconds
    ///
    /// Mover first, then ball (so it collides with this tick's mover
    /// position), then the arena. Does nothing unless a game is running.
    pub fn update(&mut self, dt: f32) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.time_ticks += 1;

        self.mover.update(dt, &mut self.events);
        let contacts = self.ball.update(dt, &self.mover, &mut self.events);
        for contact in contacts {
            self.on_ball_contact(contact);
        }
        self.play_area.update(dt, &mut self.events);
    }

    fn on_ball_contact(&mut self, contact: BallContact) {
        match contact {
            BallContact::Wall { axis, side } => {
                log::trace!("ball hit {axis:?} {side:?} wall");
                self.play_area.on_hit(&mut self.events);
            }
            BallContact::Goal => self.goal_hit(),
            BallContact::Mover => self.mover.on_hit(&mut self.events),
            BallContact::Missed => self.mover_missed(),
        }
    }

    /// Route a host key event according to the current phase
    pub fn set_event(&mut self, event: KeyEvent) {
        let bindings = &self.settings.key_bindings;
        let input = match self.phase {
            GamePhase::Playing => bindings.playing_input(event),
            GamePhase::WaitingToStart | GamePhase::GameOver => bindings.idle_input(event),
        };
        if let Some(input) = input {
            self.apply_input(input);
        }
    }

    /// Apply an already-interpreted input
    pub fn apply_input(&mut self, input: GameInput) {
        match (self.phase, input) {
            (GamePhase::Playing, GameInput::StartCommand(cmd)) => self.mover.start_command(cmd),
            (GamePhase::Playing, GameInput::StopCommand(cmd)) => self.mover.stop_command(cmd),
            (GamePhase::WaitingToStart | GamePhase::GameOver, GameInput::Restart) => self.new_game(),
            _ => {}
        }
    }

    /// Reset score, speeds and mover, then serve the first round
    pub fn new_game(&mut self) {
        log::info!("New game");
        self.set_phase(GamePhase::Playing);
        self.events.push(GameEvent::GameOverSignal(false));

        self.round = 0;
        self.score_factor = self.settings.initial_score_factor;
        self.ball.speed = self.settings.initial_ball_speed;
        self.mover.set_speed(self.settings.initial_mover_speed);
        self.mover.clear_commands();
        self.mover.set_visible(true, &mut self.events);
        self.set_score(0);

        self.new_round(1.0, 1.0);
    }

    /// Serve a new ball, scaling ball and mover speeds by the given factors
    pub(crate) fn new_round(&mut self, ball_speed_factor: f32, mover_speed_factor: f32) {
        self.has_mover_been_hit = false;
        self.round += 1;
        self.score_factor /= self.settings.score_factor_decay;

        let ball_speed = self.ball.speed * ball_speed_factor;
        self.ball.spawn(ball_speed, &mut self.rng, &mut self.events);

        self.mover.trigger_glow(&mut self.events);
        let mover_speed = self.mover.speed() * mover_speed_factor;
        self.mover.set_speed(mover_speed);
        self.mover.set_size(1.0, &mut self.events);

        log::info!(
            "Round {}: ball speed {:.2}, mover speed {:.2}, score factor {}",
            self.round,
            ball_speed,
            mover_speed,
            self.score_factor
        );
        self.events.push(GameEvent::RoundStarted {
            round: self.round,
            ball_speed,
            mover_speed,
        });
    }

    /// The ball made it back to the goal wall after a mover return
    ///
    /// Ignored unless a game is running.
    pub fn goal_hit(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.has_mover_been_hit = true;
        let score = self.score.saturating_add(self.score_factor);
        self.set_score(score);
        log::debug!("goal, score {}", self.score);
    }

    /// The ball got past the mover
    pub fn mover_missed(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        match self.settings.miss_policy {
            MissPolicy::Respawn => {
                log::debug!("ball missed, serving again");
                let speed = self.ball.speed;
                self.ball.spawn(speed, &mut self.rng, &mut self.events);
            }
            MissPolicy::RoundStateMachine => {
                if self.has_mover_been_hit {
                    let ball_step = self.settings.ball_speed_step;
                    let mover_step = self.settings.mover_speed_step;
                    self.new_round(ball_step, mover_step);
                } else {
                    self.game_over();
                }
            }
        }
    }

    /// End the run: hide the mover and raise the game-over signal
    pub fn game_over(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        log::info!("Game over after {} rounds, score {}", self.round, self.score);
        self.set_phase(GamePhase::GameOver);
        self.mover.set_visible(false, &mut self.events);
        self.events.push(GameEvent::GameOverSignal(true));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::platform::SceneBindings;
    use crate::settings::Settings;
    use crate::sim::MoverCommand;
    use crate::{Axis, consts::SIM_DT};

    fn new_game(settings: Settings) -> PongGame {
        let bindings = SceneBindings::from_settings(&settings);
        PongGame::new(&bindings, settings, 12345).unwrap()
    }

    fn started(settings: Settings) -> PongGame {
        let mut game = new_game(settings);
        game.set_event(KeyEvent::press(Key::ArrowUp));
        game
    }

    #[test]
    fn test_waits_for_restart_key() {
        let mut game = new_game(Settings::default());
        assert_eq!(game.phase(), GamePhase::WaitingToStart);
        assert_eq!(game.seed(), 12345);
        assert!(!game.mover().is_visible());

        let before = game.ball().position;
        game.update(SIM_DT);
        assert_eq!(game.ball().position, before);

        game.set_event(KeyEvent::press(Key::ArrowLeft));
        assert_eq!(game.phase(), GamePhase::WaitingToStart);

        game.set_event(KeyEvent::press(Key::ArrowUp));
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.round(), 1);
        assert_eq!(game.score(), 0);
        assert_eq!(game.score_factor(), 10_000_000);
        assert!(game.mover().is_visible());
    }

    #[test]
    fn test_playing_keys_drive_mover() {
        let mut game = started(Settings::default());
        game.set_event(KeyEvent::press(Key::ArrowRight));
        assert!(game.mover().commands().contains(MoverCommand::Right));
        game.update(SIM_DT);
        assert!(game.mover().position.x > 0.0);

        game.set_event(KeyEvent::release(Key::ArrowRight));
        game.set_event(KeyEvent::release(Key::ArrowRight));
        assert!(game.mover().commands().is_empty());
    }

    #[test]
    fn test_goal_adds_score_factor() {
        let mut game = started(Settings::default());
        game.goal_hit();
        game.goal_hit();
        assert!(game.has_mover_been_hit());
        assert_eq!(game.score(), 20_000_000);
    }

    #[test]
    fn test_miss_without_hit_ends_game() {
        let mut game = started(Settings::default());
        game.mover_missed();
        assert!(game.is_game_over());
        assert!(!game.mover().is_visible());
        assert!(game.events().contains(&GameEvent::GameOverSignal(true)));

        let ball = game.ball().position;
        let ticks = game.time_ticks();
        game.update(SIM_DT);
        assert_eq!(game.ball().position, ball);
        assert_eq!(game.time_ticks(), ticks);
    }

    #[test]
    fn test_miss_after_hit_escalates() {
        let mut game = started(Settings::default());
        game.goal_hit();
        game.mover_missed();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.round(), 2);
        assert!(!game.has_mover_been_hit());
        assert_eq!(game.score_factor(), 1_000_000);
        assert!((game.ball().speed - 8.0 * 1.2).abs() < 1e-4);
        assert!((game.mover().speed() - 10.0 * 1.1).abs() < 1e-4);
        assert!((game.ball().velocity.length() - game.ball().speed).abs() < 1e-3);
    }

    #[test]
    fn test_new_round_restores_mover_size() {
        let mut game = started(Settings::default());
        game.mover.on_hit(&mut game.events);
        assert!(game.mover().size() < 1.0);
        game.goal_hit();
        game.mover_missed();
        assert_eq!(game.mover().size(), 1.0);
    }

    #[test]
    fn test_classic_miss_respawns_without_consequence() {
        let mut game = started(Settings::from_variant(crate::Variant::Classic));
        game.mover_missed();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.round(), 1);
        assert_eq!(game.score(), 0);
        assert_eq!(game.ball().position.y, 20.0);
    }

    #[test]
    fn test_restart_clears_held_commands() {
        let mut game = started(Settings::default());
        game.set_event(KeyEvent::press(Key::ArrowLeft));
        game.mover_missed();
        // Release is ignored while the game is over
        game.set_event(KeyEvent::release(Key::ArrowLeft));
        game.set_event(KeyEvent::press(Key::ArrowUp));
        assert!(game.mover().commands().is_empty());
    }

    #[test]
    fn test_mover_bounce_shrinks_mover_and_flashes() {
        let mut game = started(Settings::default());
        let mover_y = game.mover().position.y;
        {
            let ball = game.ball_mut();
            ball.position = glam::Vec3::new(0.0, mover_y - 0.5, 0.0);
            ball.velocity = glam::Vec3::new(0.0, -8.0, 0.0);
        }
        game.drain_events();
        game.update(SIM_DT);

        assert!(game.ball().velocity.y > 0.0);
        assert!((game.mover().size() - 0.8).abs() < 1e-6);
        assert!(game.mover().glow().active);
        assert!(game.mover().range(Axis::X).max > 17.0);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_round_calls_ignored_outside_play() {
        let mut game = new_game(Settings::default());
        game.goal_hit();
        game.mover_missed();
        assert_eq!(game.phase(), GamePhase::WaitingToStart);
        assert_eq!(game.score(), 0);
        assert_eq!(game.round(), 0);

        game.set_event(KeyEvent::press(Key::ArrowUp));
        game.goal_hit();
        game.mover_missed();
        game.mover_missed();
        assert!(game.is_game_over());
        let score = game.score();
        let round = game.round();
        game.drain_events();

        game.goal_hit();
        game.mover_missed();
        game.game_over();
        assert_eq!(game.score(), score);
        assert_eq!(game.round(), round);
        assert!(!game.has_mover_been_hit());
        assert!(game.events().is_empty());
    }
}
