//! Keyboard modifier state tracking.

use super::events::Key;

/// Keyboard modifier state.
///
/// Tracks which modifier keys (Shift, Ctrl, Alt, platform) are currently
/// pressed, regardless of side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key pressed
    pub shift: bool,
    /// Ctrl key pressed
    pub ctrl: bool,
    /// Alt key pressed
    pub alt: bool,
    /// Platform key (Super/Windows/Command) pressed
    pub platform: bool,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::new()
    }
}

impl Modifiers {
    /// Creates a new Modifiers instance with all keys released.
    pub fn new() -> Self {
        Self {
            shift: false,
            ctrl: false,
            alt: false,
            platform: false,
        }
    }

    /// Derives modifier state from a set of held keys.
    pub fn from_keys<'a>(keys: impl IntoIterator<Item = &'a Key>) -> Self {
        let mut modifiers = Self::new();
        for key in keys {
            match key {
                Key::LShift | Key::RShift => modifiers.shift = true,
                Key::LControl | Key::RControl => modifiers.ctrl = true,
                Key::LAlt | Key::RAlt => modifiers.alt = true,
                Key::LWin | Key::RWin => modifiers.platform = true,
                _ => {}
            }
        }
        modifiers
    }

    /// Returns true if any modifier is held.
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.platform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn either_side_sets_the_modifier() {
        let keys = [Key::RControl, Key::Char('z'), Key::LShift];
        let modifiers = Modifiers::from_keys(&keys);
        assert!(modifiers.ctrl);
        assert!(modifiers.shift);
        assert!(!modifiers.alt);
        assert!(!modifiers.platform);
        assert!(modifiers.any());
        assert!(!Modifiers::from_keys(&[Key::Char('a')]).any());
    }
}
