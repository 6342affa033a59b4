//! Keyboard shortcuts for the player view
//!
//! | Key                   | Command                    |
//! |-----------------------|----------------------------|
//! | Space                 | toggle play                |
//! | ← / →                 | seek back / forward        |
//! | Shift + ← / →         | previous / next track      |
//! | ↑ / ↓                 | volume up / down           |
//! | m, M                  | toggle mute                |
//! | l, L                  | toggle loop                |
//! | r, R (without Ctrl)   | toggle random              |
//! | Escape                | exit the session           |
//!
//! Ctrl+R is left unhandled for the host's global "play random" shortcut.
//! Nothing fires while focus is in a text field.

use serde::{Deserialize, Serialize};

/// Logical key, independent of the terminal or windowing backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Space,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Escape,
    Char(char),
}

/// Modifier keys held with a key press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers held
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Shift only
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl only
    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };
}

/// A key press with its modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyChord {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyChord {
    /// Create a chord
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A key pressed without modifiers
    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }
}

/// Where keyboard focus is when a key arrives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputFocus {
    /// A text input or text area has focus
    TextEntry,

    /// Anything else
    #[default]
    Other,
}

/// Player command triggered by a shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    TogglePlay,
    SeekBackward,
    SeekForward,
    PreviousTrack,
    NextTrack,
    VolumeUp,
    VolumeDown,
    ToggleMute,
    ToggleLoop,
    ToggleRandom,
    Exit,
}

impl Command {
    /// Map a chord to its command, if any
    pub fn from_chord(chord: KeyChord) -> Option<Self> {
        let shift = chord.modifiers.shift;

        match chord.key {
            Key::Space => Some(Self::TogglePlay),
            Key::ArrowLeft if shift => Some(Self::PreviousTrack),
            Key::ArrowLeft => Some(Self::SeekBackward),
            Key::ArrowRight if shift => Some(Self::NextTrack),
            Key::ArrowRight => Some(Self::SeekForward),
            Key::ArrowUp => Some(Self::VolumeUp),
            Key::ArrowDown => Some(Self::VolumeDown),
            Key::Escape => Some(Self::Exit),
            Key::Char('m' | 'M') => Some(Self::ToggleMute),
            Key::Char('l' | 'L') => Some(Self::ToggleLoop),
            Key::Char('r' | 'R') if !chord.modifiers.ctrl => Some(Self::ToggleRandom),
            Key::Char(_) => None,
        }
    }
}

/// Result of offering a key press to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Command that was run
    pub command: Option<Command>,

    /// Whether the host should suppress the key's default action
    pub prevent_default: bool,
}

impl KeyOutcome {
    /// The key was not handled
    pub const IGNORED: Self = Self {
        command: None,
        prevent_default: false,
    };

    /// Resolve a chord under the given focus
    pub fn resolve(chord: KeyChord, focus: InputFocus) -> Self {
        if focus == InputFocus::TextEntry {
            return Self::IGNORED;
        }

        match Command::from_chord(chord) {
            Some(command) => Self {
                command: Some(command),
                prevent_default: true,
            },
            None => Self::IGNORED,
        }
    }
}
