use std::str::FromStr;

use anyhow::{Error, anyhow};

/// Modifier state of a click or key press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    /// Cmd on macOS, Ctrl elsewhere
    pub meta_or_ctrl: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, meta_or_ctrl: false };
    pub const SHIFT: Modifiers = Modifiers { shift: true, meta_or_ctrl: false };
    pub const META: Modifiers = Modifiers { shift: false, meta_or_ctrl: true };
    pub const SHIFT_META: Modifiers = Modifiers { shift: true, meta_or_ctrl: true };

    pub fn is_empty(self) -> bool {
        !self.shift && !self.meta_or_ctrl
    }
}

/// Keys the track list reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Delete,
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Whether this is the `A` key, in either case
    pub fn is_select_all(self) -> bool {
        matches!(self, Key::Char(c) if c.eq_ignore_ascii_case(&'a'))
    }
}

/// Accepts DOM key codes (`KeyA`, `ArrowDown`), short names (`down`, `del`) or a single character
impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Ok(Key::Char(ch));
        }

        if let Some(letter) = s.strip_prefix("Key")
            && letter.len() == 1
        {
            return Ok(Key::Char(letter.to_ascii_lowercase().chars().next().unwrap_or('a')));
        }

        match s.to_lowercase().as_str() {
            "enter" | "return" => Ok(Key::Enter),
            "delete" | "del" => Ok(Key::Delete),
            "backspace" => Ok(Key::Backspace),
            "arrowup" | "up" => Ok(Key::ArrowUp),
            "arrowdown" | "down" => Ok(Key::ArrowDown),
            "arrowleft" | "left" => Ok(Key::ArrowLeft),
            "arrowright" | "right" => Ok(Key::ArrowRight),
            "space" => Ok(Key::Char(' ')),
            _ => Err(anyhow!("Unknown key: '{}'", s)),
        }
    }
}

/// A key together with its modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// Parses chords such as `ctrl+a`, `shift+down`, `cmd+shift+KeyA` or `enter`
impl FromStr for KeyInput {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (prefix, key) = match s.rfind('+') {
            // a trailing '+' is the plus key itself
            Some(pos) if pos + 1 == s.len() => (s[..pos].strip_suffix('+').unwrap_or(""), "+"),
            Some(pos) => (&s[..pos], &s[pos + 1..]),
            None => ("", s),
        };

        let mut modifiers = Modifiers::NONE;
        for part in prefix.split('+').filter(|p| !p.is_empty()) {
            match part.to_lowercase().as_str() {
                "shift" => modifiers.shift = true,
                "ctrl" | "control" | "cmd" | "meta" | "super" => modifiers.meta_or_ctrl = true,
                other => return Err(anyhow!("Unknown modifier: '{}' in '{}'", other, s)),
            }
        }

        Ok(KeyInput { key: key.parse()?, modifiers })
    }
}
