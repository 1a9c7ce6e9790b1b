//! Key mapping from terminal events to game commands.

use crate::types::{Direction, GameCommand};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game commands.
///
/// Ctrl-C quits; every other control chord is ignored.
pub fn handle_key_event(key: KeyEvent) -> Option<GameCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(GameCommand::Quit),
            _ => None,
        };
    }

    match key.code {
        // Movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(GameCommand::Move(Direction::Left)),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(GameCommand::Move(Direction::Right)),
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(GameCommand::Move(Direction::Up)),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(GameCommand::Move(Direction::Down)),

        // Maintenance
        KeyCode::Char('u') | KeyCode::Char('U') | KeyCode::Backspace => Some(GameCommand::Undo),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(GameCommand::Continue),
        KeyCode::Char('v') | KeyCode::Char('V') => Some(GameCommand::Revive),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(GameCommand::RemoveMode),

        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameCommand::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(GameCommand::Quit),

        _ => None,
    }
}

/// Digit key as a board coordinate, used while picking a tile to remove.
pub fn coordinate_from_key(key: KeyEvent, size: usize) -> Option<usize> {
    match key.code {
        KeyCode::Char(c) => c
            .to_digit(10)
            .map(|d| d as usize)
            .filter(|&d| d < size),
        _ => None,
    }
}
