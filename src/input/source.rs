//! Input capability consumed by the game loop
//!
//! The loop samples an [`InputSource`] once per tick, so the simulation never
//! depends on a particular input backend.

use crossterm::event::KeyEvent;

use super::handler::{InputHandler, KeyAction};
use crate::game::Direction;

pub trait InputSource {
    /// Direction requested since the last poll, if any
    fn poll_direction(&mut self) -> Option<Direction>;

    /// Whether the player asked to leave
    fn poll_quit(&mut self) -> bool;
}

/// Keyboard-backed source
///
/// Key presses are collected between polls. When several directions were
/// pressed in one cycle the first in [`Direction::PRIORITY`] wins.
pub struct KeyboardInput {
    handler: InputHandler,
    pressed: [bool; 4],
    quit: bool,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self {
            handler: InputHandler::new(),
            pressed: [false; 4],
            quit: false,
        }
    }

    /// Record a key press. Returns the mapped action so the caller can act
    /// on keys outside the direction/quit pair.
    pub fn record(&mut self, key: KeyEvent) -> KeyAction {
        let action = self.handler.handle_key_event(key);
        match action {
            KeyAction::Move(direction) => self.pressed[slot(direction)] = true,
            KeyAction::Quit => self.quit = true,
            _ => {}
        }
        action
    }
}

fn slot(direction: Direction) -> usize {
    match direction {
        Direction::Right => 0,
        Direction::Left => 1,
        Direction::Up => 2,
        Direction::Down => 3,
    }
}

impl InputSource for KeyboardInput {
    fn poll_direction(&mut self) -> Option<Direction> {
        let chosen = Direction::PRIORITY
            .into_iter()
            .find(|&direction| self.pressed[slot(direction)]);
        self.pressed = [false; 4];
        chosen
    }

    fn poll_quit(&mut self) -> bool {
        self.quit
    }
}

impl Default for KeyboardInput {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_no_input() {
        let mut input = KeyboardInput::new();
        assert_eq!(input.poll_direction(), None);
        assert!(!input.poll_quit());
    }

    #[test]
    fn test_single_direction_is_consumed() {
        let mut input = KeyboardInput::new();
        input.record(key(KeyCode::Up));
        assert_eq!(input.poll_direction(), Some(Direction::Up));
        assert_eq!(input.poll_direction(), None);
    }

    #[test]
    fn test_priority_between_directions() {
        let mut input = KeyboardInput::new();
        input.record(key(KeyCode::Down));
        input.record(key(KeyCode::Up));
        input.record(key(KeyCode::Left));
        assert_eq!(input.poll_direction(), Some(Direction::Left));

        input.record(key(KeyCode::Down));
        input.record(key(KeyCode::Right));
        assert_eq!(input.poll_direction(), Some(Direction::Right));

        input.record(key(KeyCode::Down));
        input.record(key(KeyCode::Up));
        assert_eq!(input.poll_direction(), Some(Direction::Up));
    }

    #[test]
    fn test_quit_sticks() {
        let mut input = KeyboardInput::new();
        assert_eq!(input.record(key(KeyCode::Esc)), KeyAction::Quit);
        assert!(input.poll_quit());
        assert!(input.poll_quit());
    }

    #[test]
    fn test_other_actions_pass_through() {
        let mut input = KeyboardInput::new();
        assert_eq!(input.record(key(KeyCode::Char('r'))), KeyAction::Restart);
        assert_eq!(input.record(key(KeyCode::Char('b'))), KeyAction::ToggleDebug);
        assert_eq!(input.poll_direction(), None);
        assert!(!input.poll_quit());
    }
}
