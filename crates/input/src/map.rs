//! Key mapping from terminal events to game keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::Action;

/// Logical game keys
///
/// Left, right and soft drop are *held* keys sampled every frame; the rest
/// produce one queued [`Action`] per press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    SoftDrop,
    RotateCw,
    RotateCcw,
    Pause,
    Start,
    Reset,
}

impl Key {
    /// Queued action for a press of this key; `None` for held keys
    pub fn action(self) -> Option<Action> {
        match self {
            Key::RotateCw => Some(Action::RotateCw),
            Key::RotateCcw => Some(Action::RotateCcw),
            Key::Pause => Some(Action::Pause),
            Key::Start => Some(Action::Start),
            Key::Reset => Some(Action::Reset),
            Key::Left | Key::Right | Key::SoftDrop => None,
        }
    }

    pub fn is_held(self) -> bool {
        self.action().is_none()
    }
}

/// Map a terminal key code to a game key.
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Key::Left)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Key::Right)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Key::SoftDrop)
        }

        KeyCode::Up
        | KeyCode::Char('x')
        | KeyCode::Char('X')
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Key::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('Z') | KeyCode::Char('y') | KeyCode::Char('Y') => Some(Key::RotateCcw),

        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(Key::Pause),
        KeyCode::Enter => Some(Key::Start),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Key::Reset),

        _ => None,
    }
}

/// Check if key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
