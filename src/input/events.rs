use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::keys::{Key, KeyInput, Modifiers};

/// Translate a terminal key event into a track list key press.
///
/// Returns `None` for key releases, which the list never reacts to.
pub fn key_input(event: KeyEvent) -> Option<KeyInput> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let modifiers = Modifiers {
        shift: event.modifiers.contains(KeyModifiers::SHIFT),
        meta_or_ctrl: event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER | KeyModifiers::META),
    };

    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Delete => Key::Delete,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        _ => Key::Other,
    };
    Some(KeyInput::new(key, modifiers))
}
