//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the driver to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Game(GameAction),
    Quit,
}

/// Map a key event. Releases are ignored.
pub fn map_key(key: KeyEvent) -> Option<KeyCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(KeyCommand::Quit);
    }

    let action = match key.code {
        KeyCode::Left => GameAction::MoveLeft,
        KeyCode::Right => GameAction::MoveRight,
        KeyCode::Down => GameAction::SoftDrop,
        KeyCode::Up => GameAction::Rotate,
        KeyCode::Char(' ') => GameAction::HardDrop,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'h' | 'a' => GameAction::MoveLeft,
            'l' | 'd' => GameAction::MoveRight,
            'j' | 's' => GameAction::SoftDrop,
            'k' | 'w' | 'x' => GameAction::Rotate,
            'c' => GameAction::Hold,
            'p' => GameAction::Pause,
            'r' => GameAction::Restart,
            'q' => return Some(KeyCommand::Quit),
            _ => return None,
        },
        KeyCode::Esc => return Some(KeyCommand::Quit),
        _ => return None,
    };
    Some(KeyCommand::Game(action))
}

/// Map keyboard input to a game action.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match map_key(key)? {
        KeyCommand::Game(action) => Some(action),
        KeyCommand::Quit => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    map_key(key) == Some(KeyCommand::Quit)
}
