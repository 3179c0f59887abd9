use crate::input::events::MouseButton;
use crate::util::Point;

/// Which kind of device produced a mouse state.
///
/// Deltas are only computed between states of the same kind; an absolute
/// tablet position compared against a relative mouse position is meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerKind {
    /// Relative pointing device
    #[default]
    Mouse,
    /// Absolute tablet or pen
    Pen,
    /// Touch surface
    Touch,
}

/// Snapshot of a pointing device.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MouseState {
    /// Cursor position in screen space
    pub position: Point,
    /// Wheel movement since the previous snapshot
    pub wheel_delta: f64,
    /// Where the cursor was when the current press began, if a button is held
    pub position_mouse_down: Option<Point>,
    pub kind: PointerKind,
    buttons: u8,
    last: Option<Box<MouseState>>,
}

impl MouseState {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Convenience constructor used by sources and tests.
    pub fn at(x: f64, y: f64) -> Self {
        Self::new(Point::new(x, y))
    }

    /// Builder variant of `set_pressed(button, true)`.
    pub fn with_pressed(mut self, button: MouseButton) -> Self {
        self.set_pressed(button, true);
        self
    }

    pub fn with_wheel(mut self, delta: f64) -> Self {
        self.wheel_delta = delta;
        self
    }

    pub fn with_kind(mut self, kind: PointerKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.buttons & (1 << button.index()) != 0
    }

    pub fn set_pressed(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.buttons |= 1 << button.index();
        } else {
            self.buttons &= !(1 << button.index());
        }
    }

    pub fn has_any_button_pressed(&self) -> bool {
        self.buttons != 0
    }

    /// Held buttons in index order.
    pub fn pressed_buttons(&self) -> impl Iterator<Item = MouseButton> + '_ {
        MouseButton::ALL.into_iter().filter(|b| self.is_pressed(*b))
    }

    /// Copies the pressed/released state of every button from `other`.
    pub fn copy_buttons_from(&mut self, other: Option<&MouseState>) {
        self.buttons = other.map_or(0, |m| m.buttons);
    }

    /// The previous snapshot from the same kind of device, if known.
    pub fn last(&self) -> Option<&MouseState> {
        self.last.as_deref()
    }

    /// Links `previous` as this state's predecessor when both come from the
    /// same kind of device. The predecessor's own history is not retained.
    pub fn link_last(&mut self, previous: &MouseState) {
        self.last = if previous.kind == self.kind {
            let mut copy = previous.clone();
            copy.last = None;
            Some(Box::new(copy))
        } else {
            None
        };
    }

    /// Movement since the same-kind predecessor.
    pub fn delta(&self) -> Option<Point> {
        self.last().map(|last| self.position.offset_from(last.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_bits_are_independent() {
        let mut state = MouseState::at(0.0, 0.0);
        state.set_pressed(MouseButton::Right, true);
        state.set_pressed(MouseButton::Back, true);
        assert!(state.is_pressed(MouseButton::Right));
        assert!(!state.is_pressed(MouseButton::Left));
        assert_eq!(
            state.pressed_buttons().collect::<Vec<_>>(),
            vec![MouseButton::Right, MouseButton::Back]
        );
        state.set_pressed(MouseButton::Right, false);
        state.set_pressed(MouseButton::Back, false);
        assert!(!state.has_any_button_pressed());
    }

    #[test]
    fn delta_only_against_same_kind() {
        let previous = MouseState::at(10.0, 10.0);
        let mut current = MouseState::at(15.0, 7.0);
        current.link_last(&previous);
        assert_eq!(current.delta(), Some(Point::new(5.0, -3.0)));

        let mut pen = MouseState::at(15.0, 7.0).with_kind(PointerKind::Pen);
        pen.link_last(&previous);
        assert_eq!(pen.delta(), None);
    }

    #[test]
    fn linking_does_not_chain() {
        let first = MouseState::at(0.0, 0.0);
        let mut second = MouseState::at(1.0, 0.0);
        second.link_last(&first);
        let mut third = MouseState::at(2.0, 0.0);
        third.link_last(&second);
        assert!(third.last().unwrap().last().is_none());
    }
}
