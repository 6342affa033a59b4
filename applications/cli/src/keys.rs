//! Terminal key events to player key chords

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use verse_playback::{Key, KeyChord, Modifiers};

/// Translate a crossterm key event
///
/// Returns `None` for keys the player has no use for (function keys,
/// Enter, Tab, ...).
pub fn to_chord(event: KeyEvent) -> Option<KeyChord> {
    let key = match event.code {
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Esc => Key::Escape,
        _ => return None,
    };

    let modifiers = Modifiers {
        shift: event.modifiers.contains(KeyModifiers::SHIFT),
        ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
        alt: event.modifiers.contains(KeyModifiers::ALT),
        meta: event
            .modifiers
            .intersects(KeyModifiers::SUPER | KeyModifiers::META),
    };

    Some(KeyChord::new(key, modifiers))
}

/// Ctrl+C, which raw mode no longer turns into a signal
pub fn is_interrupt(event: &KeyEvent) -> bool {
    event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL)
}
