//! Key bindings.

use crossterm::event::KeyCode;

/// Something the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the cursor one column left.
    Left,
    /// Move the cursor one column right.
    Right,
    /// Play the cursor column.
    Play,
    /// Take back the last move (or round against the computer).
    Undo,
    /// Ask the advisor for a move.
    Hint,
    /// Start a new game with the same settings.
    Restart,
    /// Leave the program.
    Quit,
}

/// Maps a key to an action.
pub fn action_for(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Left | KeyCode::Char('a') => Some(Action::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Action::Right),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Play),
        KeyCode::Char('u') => Some(Action::Undo),
        KeyCode::Char('h') => Some(Action::Hint),
        KeyCode::Char('r') => Some(Action::Restart),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_move_cursor() {
        assert_eq!(action_for(KeyCode::Left), Some(Action::Left));
        assert_eq!(action_for(KeyCode::Right), Some(Action::Right));
    }

    #[test]
    fn test_unbound_key() {
        assert_eq!(action_for(KeyCode::Char('z')), None);
    }
}
