//! Key events and bindings
//!
//! The host adapter converts its own key codes into [`Key`] values; the
//! game decides what a key means based on its current phase.

use serde::{Deserialize, Serialize};

use crate::sim::MoverCommand;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Escape,
    /// Any other host key code
    Other(u32),
}

/// Press or release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyState {
    Press,
    Release,
}

/// A discrete key transition delivered between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    pub state: KeyState,
}

impl KeyEvent {
    pub fn press(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Press,
        }
    }

    pub fn release(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Release,
        }
    }
}

/// What a key event means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    StartCommand(MoverCommand),
    StopCommand(MoverCommand),
    Restart,
}

/// Key to command mapping plus the restart trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub commands: Vec<(Key, MoverCommand)>,
    pub restart: KeyEvent,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            commands: vec![
                (Key::ArrowLeft, MoverCommand::Left),
                (Key::ArrowRight, MoverCommand::Right),
                (Key::ArrowUp, MoverCommand::Up),
                (Key::ArrowDown, MoverCommand::Down),
            ],
            restart: KeyEvent::press(Key::ArrowUp),
        }
    }
}

impl KeyBindings {
    /// Command bound to `key`, if any
    pub fn command_for(&self, key: Key) -> Option<MoverCommand> {
        self.commands
            .iter()
            .find(|(bound, _)| *bound == key)
            .map(|&(_, cmd)| cmd)
    }

    /// Interpret `event` while a game is running
    pub fn playing_input(&self, event: KeyEvent) -> Option<GameInput> {
        let cmd = self.command_for(event.key)?;
        Some(match event.state {
            KeyState::Press => GameInput::StartCommand(cmd),
            KeyState::Release => GameInput::StopCommand(cmd),
        })
    }

    /// Interpret `event` while waiting for a (re)start; movement is ignored
    pub fn idle_input(&self, event: KeyEvent) -> Option<GameInput> {
        (event == self.restart).then_some(GameInput::Restart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playing_maps_press_and_release() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.playing_input(KeyEvent::press(Key::ArrowLeft)),
            Some(GameInput::StartCommand(MoverCommand::Left))
        );
        assert_eq!(
            bindings.playing_input(KeyEvent::release(Key::ArrowDown)),
            Some(GameInput::StopCommand(MoverCommand::Down))
        );
        assert_eq!(bindings.playing_input(KeyEvent::press(Key::Space)), None);
    }

    #[test]
    fn test_idle_only_accepts_restart() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.idle_input(KeyEvent::press(Key::ArrowUp)),
            Some(GameInput::Restart)
        );
        assert_eq!(bindings.idle_input(KeyEvent::release(Key::ArrowUp)), None);
        assert_eq!(bindings.idle_input(KeyEvent::press(Key::ArrowLeft)), None);
    }
}
