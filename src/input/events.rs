//! Generic input event types for cross-backend compatibility.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Generic key representation for cross-backend compatibility.
///
/// Backend implementations map their native key codes to these generic
/// key values for unified input handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    Escape,
    Return,
    Backspace,
    Tab,
    Space,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    LShift,
    RShift,
    LControl,
    RControl,
    LAlt,
    RAlt,
    /// Left platform key (Super / Windows / Command)
    LWin,
    /// Right platform key
    RWin,
    /// Function key F1-F24
    F(u8),
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Whether this key is one of the control/alt/shift/platform modifiers.
    ///
    /// Modifiers never take part in key repeat.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Key::LControl
                | Key::RControl
                | Key::LAlt
                | Key::RAlt
                | Key::LShift
                | Key::RShift
                | Key::LWin
                | Key::RWin
        )
    }
}

/// Error returned when a key name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown key name '{0}'")]
pub struct ParseKeyError(pub String);

impl FromStr for Key {
    type Err = ParseKeyError;

    /// Parses names such as `"a"`, `"Escape"`, `"lshift"` or `"F5"` (case-insensitive
    /// for named keys, case-preserving for single characters).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // A lone character is taken verbatim, whitespace included.
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(if c == ' ' { Key::Space } else { Key::Char(c) });
        }

        let trimmed = s.trim();
        let lower = trimmed.to_lowercase();
        let key = match lower.as_str() {
            "escape" | "esc" => Key::Escape,
            "return" | "enter" => Key::Return,
            "backspace" => Key::Backspace,
            "tab" => Key::Tab,
            "space" => Key::Space,
            "delete" | "del" => Key::Delete,
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "home" => Key::Home,
            "end" => Key::End,
            "pageup" => Key::PageUp,
            "pagedown" => Key::PageDown,
            "lshift" => Key::LShift,
            "rshift" => Key::RShift,
            "lctrl" | "lcontrol" => Key::LControl,
            "rctrl" | "rcontrol" => Key::RControl,
            "lalt" => Key::LAlt,
            "ralt" => Key::RAlt,
            "lwin" | "lsuper" | "lcmd" => Key::LWin,
            "rwin" | "rsuper" | "rcmd" => Key::RWin,
            "unknown" => Key::Unknown,
            other => match other.strip_prefix('f').map(str::parse::<u8>) {
                Some(Ok(n)) if (1..=24).contains(&n) => Key::F(n),
                _ => return Err(ParseKeyError(trimmed.to_string())),
            },
        };
        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Key::Char(c) => return write!(f, "{c}"),
            Key::F(n) => return write!(f, "F{n}"),
            Key::Escape => "Escape",
            Key::Return => "Return",
            Key::Backspace => "Backspace",
            Key::Tab => "Tab",
            Key::Space => "Space",
            Key::Delete => "Delete",
            Key::Up => "Up",
            Key::Down => "Down",
            Key::Left => "Left",
            Key::Right => "Right",
            Key::Home => "Home",
            Key::End => "End",
            Key::PageUp => "PageUp",
            Key::PageDown => "PageDown",
            Key::LShift => "LShift",
            Key::RShift => "RShift",
            Key::LControl => "LControl",
            Key::RControl => "RControl",
            Key::LAlt => "LAlt",
            Key::RAlt => "RAlt",
            Key::LWin => "LWin",
            Key::RWin => "RWin",
            Key::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

impl TryFrom<String> for Key {
    type Error = ParseKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

/// Mouse button identification.
///
/// The discriminant is the button's bit index inside `MouseState`; state
/// expansion walks buttons in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    /// Primary button; the only one that produces clicks
    Left = 0,
    Middle = 1,
    Right = 2,
    /// Side button (browser back)
    Back = 3,
    /// Side button (browser forward)
    Forward = 4,
}

impl MouseButton {
    /// All buttons in index order.
    pub const ALL: [MouseButton; 5] = [
        MouseButton::Left,
        MouseButton::Middle,
        MouseButton::Right,
        MouseButton::Back,
        MouseButton::Forward,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Payload of a mouse-down notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseDownArgs {
    pub button: MouseButton,
}

/// Payload of a mouse-up notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseUpArgs {
    pub button: MouseButton,
}

/// Payload of a key-down notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDownArgs {
    pub key: Key,
    /// True when generated by key repeat rather than a fresh press
    pub repeat: bool,
}

/// Payload of a key-up notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyUpArgs {
    pub key: Key,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_and_character_keys() {
        assert_eq!("a".parse::<Key>(), Ok(Key::Char('a')));
        assert_eq!("A".parse::<Key>(), Ok(Key::Char('A')));
        assert_eq!("escape".parse::<Key>(), Ok(Key::Escape));
        assert_eq!("Esc".parse::<Key>(), Ok(Key::Escape));
        assert_eq!("LCtrl".parse::<Key>(), Ok(Key::LControl));
        assert_eq!("f12".parse::<Key>(), Ok(Key::F(12)));
        assert!("f25".parse::<Key>().is_err());
        assert!("bogus".parse::<Key>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for key in [Key::Char('x'), Key::PageDown, Key::RWin, Key::F(3)] {
            assert_eq!(key.to_string().parse::<Key>(), Ok(key));
        }
    }

    #[test]
    fn whitespace_characters_survive_serde() {
        for key in [Key::Char('\t'), Key::Char('\n')] {
            assert_eq!(key.to_string().parse::<Key>(), Ok(key));
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(serde_json::from_str::<Key>(&json).unwrap(), key);
        }
        assert_eq!(" space ".parse::<Key>(), Ok(Key::Space));
    }

    #[test]
    fn modifier_classification() {
        assert!(Key::LShift.is_modifier());
        assert!(Key::RWin.is_modifier());
        assert!(!Key::Escape.is_modifier());
        assert!(!Key::Char('a').is_modifier());
    }
}
