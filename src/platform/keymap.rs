//! Raw key to logical action mapping

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::Action;

/// Map a key press to an action. Releases and unbound keys map to `None`.
pub fn map_key(key: KeyEvent) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('a' | 'A') => Action::MoveLeft,
        KeyCode::Right | KeyCode::Char('d' | 'D') => Action::MoveRight,
        KeyCode::Char(' ') => Action::ActivateNitro,
        KeyCode::Char('p' | 'P') => Action::TogglePause,
        KeyCode::Enter | KeyCode::Char('\n' | '\r') => Action::Confirm,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_bindings() {
        assert_eq!(map_key(press(KeyCode::Left)), Action::MoveLeft);
        assert_eq!(map_key(press(KeyCode::Char('A'))), Action::MoveLeft);
        assert_eq!(map_key(press(KeyCode::Right)), Action::MoveRight);
        assert_eq!(map_key(press(KeyCode::Char('d'))), Action::MoveRight);
        assert_eq!(map_key(press(KeyCode::Char(' '))), Action::ActivateNitro);
        assert_eq!(map_key(press(KeyCode::Char('P'))), Action::TogglePause);
        assert_eq!(map_key(press(KeyCode::Enter)), Action::Confirm);
        assert_eq!(map_key(press(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(map_key(press(KeyCode::Esc)), Action::Quit);
        assert_eq!(map_key(press(KeyCode::Char('x'))), Action::None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), Action::Quit);
        assert_eq!(map_key(press(KeyCode::Char('c'))), Action::None);
    }

    #[test]
    fn test_release_is_ignored() {
        let key = KeyEvent::new_with_kind(KeyCode::Left, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(map_key(key), Action::None);
    }
}
