//! Reconciled device state snapshots.

mod keyboard;
mod mouse;

pub use keyboard::KeyboardState;
pub use mouse::{MouseState, PointerKind};

/// One snapshot of every input device.
///
/// A sub-state is `None` when the snapshot carries no new data for that device.
/// The router fills missing sub-states from the previous snapshot, so the
/// current state it exposes always has both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    pub mouse: Option<MouseState>,
    pub keyboard: Option<KeyboardState>,
    last: Option<Box<InputState>>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mouse(mut self, mouse: MouseState) -> Self {
        self.mouse = Some(mouse);
        self
    }

    pub fn with_keyboard(mut self, keyboard: KeyboardState) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    /// The state that was current before this one.
    pub fn last(&self) -> Option<&InputState> {
        self.last.as_deref()
    }

    /// Links `previous` as the predecessor, first cutting its own link so
    /// history never grows past one step.
    pub(crate) fn set_last(&mut self, mut previous: InputState) {
        previous.last = None;
        self.last = Some(Box::new(previous));
    }

    /// A copy of the device data without the predecessor link.
    pub fn snapshot(&self) -> InputState {
        InputState {
            mouse: self.mouse.clone(),
            keyboard: self.keyboard.clone(),
            last: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::events::Key;

    #[test]
    fn history_is_one_level_deep() {
        let first = InputState::new().with_keyboard(KeyboardState::from_keys([Key::Char('a')]));
        let mut second = InputState::new();
        second.set_last(first);
        let mut third = InputState::new();
        third.set_last(second);

        let last = third.last().unwrap();
        assert!(last.last().is_none());
        assert!(third.snapshot().last().is_none());
    }
}
