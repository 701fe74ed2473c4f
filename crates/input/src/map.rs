//! Key mapping from terminal events to UI actions.

use crate::types::{Dir, UiAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to UI actions.
pub fn handle_key_event(key: KeyEvent) -> Option<UiAction> {
    match key.code {
        // Cursor movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(UiAction::Move(Dir::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(UiAction::Move(Dir::Right))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(UiAction::Move(Dir::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(UiAction::Move(Dir::Down))
        }

        // Select / swap
        KeyCode::Enter | KeyCode::Char(' ') => Some(UiAction::Select),

        // Helpers
        KeyCode::Char('x') | KeyCode::Char('X') => Some(UiAction::Hint),

        // Modes
        KeyCode::Char('r') | KeyCode::Char('R') => Some(UiAction::Restart),
        KeyCode::Char('g') | KeyCode::Char('G') => Some(UiAction::Daily),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(UiAction::ToggleChill),
        KeyCode::Char('b') | KeyCode::Char('B') => Some(UiAction::ToggleColorBlind),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_cursor_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(UiAction::Move(Dir::Left))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Right)),
            Some(UiAction::Move(Dir::Right))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(UiAction::Move(Dir::Up))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Down)),
            Some(UiAction::Move(Dir::Down))
        );

        // vi keys and WASD, either case
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('h'))),
            Some(UiAction::Move(Dir::Left))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('K'))),
            Some(UiAction::Move(Dir::Up))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('s'))),
            Some(UiAction::Move(Dir::Down))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('D'))),
            Some(UiAction::Move(Dir::Right))
        );
    }

    #[test]
    fn test_select_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Enter)),
            Some(UiAction::Select)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(UiAction::Select)
        );
    }

    #[test]
    fn test_mode_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('x'))),
            Some(UiAction::Hint)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('r'))),
            Some(UiAction::Restart)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('g'))),
            Some(UiAction::Daily)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('M'))),
            Some(UiAction::ToggleChill)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('b'))),
            Some(UiAction::ToggleColorBlind)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Tab)), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
