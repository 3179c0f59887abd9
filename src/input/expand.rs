//! Splitting coalesced device snapshots into single-transition steps.
//!
//! A backend may report several button or key changes in one snapshot. Handlers
//! that track press/release pairs (click, drag) must observe each change on its
//! own, so every raw snapshot is replayed as:
//!
//! 1. the snapshot with buttons and keys rolled back to the previously known
//!    values (position and wheel intact),
//! 2. one state per toggled button, in `MouseButton` index order,
//! 3. one state per released key, then one per pressed key.

use super::events::MouseButton;
use super::state::{InputState, KeyboardState, MouseState};

/// Expands `pending` so that consecutive states differ by at most one button or key.
///
/// `current` is the state the router last processed; it provides the button and
/// key values the first snapshot is rolled back to.
pub fn expand_states(current: &InputState, pending: Vec<InputState>) -> Vec<InputState> {
    let mut expanded = Vec::with_capacity(pending.len());
    let mut known_mouse: Option<MouseState> = current.mouse.clone();
    let mut known_keys: KeyboardState = current.keyboard.clone().unwrap_or_default();

    for raw in pending {
        let raw = raw.snapshot();
        let mut step = raw.clone();

        if let Some(mouse) = step.mouse.as_mut() {
            mouse.copy_buttons_from(known_mouse.as_ref());
        }
        if let Some(keyboard) = step.keyboard.as_mut() {
            *keyboard = known_keys.clone();
        }
        expanded.push(step.clone());

        // Wheel movement belongs to the rolled-back state only.
        if let Some(mouse) = step.mouse.as_mut() {
            mouse.wheel_delta = 0.0;
        }

        if let (Some(target), Some(mouse)) = (raw.mouse.as_ref(), step.mouse.as_mut()) {
            for button in MouseButton::ALL {
                let pressed = target.is_pressed(button);
                if mouse.is_pressed(button) != pressed {
                    mouse.set_pressed(button, pressed);
                    expanded.push(InputState::new().with_mouse(mouse.clone()).with_keyboard_opt(
                        step.keyboard.clone(),
                    ));
                }
            }
            known_mouse = Some(mouse.clone());
        }

        if let (Some(target), Some(keyboard)) = (raw.keyboard.as_ref(), step.keyboard.as_mut()) {
            let released: Vec<_> = known_keys.keys_not_in(target).collect();
            let pressed: Vec<_> = target.keys_not_in(&known_keys).collect();

            for key in released {
                keyboard.release(key);
                expanded.push(
                    InputState::new()
                        .with_keyboard(keyboard.clone())
                        .with_mouse_opt(step.mouse.clone()),
                );
            }
            for key in pressed {
                keyboard.press(key);
                expanded.push(
                    InputState::new()
                        .with_keyboard(keyboard.clone())
                        .with_mouse_opt(step.mouse.clone()),
                );
            }
            known_keys = keyboard.clone();
        }
    }

    expanded
}

impl InputState {
    fn with_mouse_opt(mut self, mouse: Option<MouseState>) -> Self {
        self.mouse = mouse;
        self
    }

    fn with_keyboard_opt(mut self, keyboard: Option<KeyboardState>) -> Self {
        self.keyboard = keyboard;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::events::Key;

    fn transitions(a: &InputState, b: &InputState) -> usize {
        let mut count = 0;
        if let (Some(ma), Some(mb)) = (&a.mouse, &b.mouse) {
            count += MouseButton::ALL
                .iter()
                .filter(|btn| ma.is_pressed(**btn) != mb.is_pressed(**btn))
                .count();
        }
        if let (Some(ka), Some(kb)) = (&a.keyboard, &b.keyboard) {
            count += ka.keys_not_in(kb).count() + kb.keys_not_in(ka).count();
        }
        count
    }

    fn base() -> InputState {
        InputState::new()
            .with_mouse(MouseState::at(0.0, 0.0))
            .with_keyboard(KeyboardState::new())
    }

    #[test]
    fn coalesced_snapshot_becomes_single_steps() {
        let current = base().with_keyboard(KeyboardState::from_keys([Key::Char('q')]));
        let raw = InputState::new()
            .with_mouse(
                MouseState::at(5.0, 5.0)
                    .with_pressed(MouseButton::Right)
                    .with_pressed(MouseButton::Left),
            )
            .with_keyboard(KeyboardState::from_keys([Key::Char('a'), Key::LShift]));

        let expanded = expand_states(&current, vec![raw]);

        // rolled back + 2 buttons + 1 release + 2 presses
        assert_eq!(expanded.len(), 6);
        let mut previous = &current;
        for state in &expanded {
            assert!(transitions(previous, state) <= 1);
            previous = state;
        }

        // Rolled-back copy keeps the new position but old buttons/keys.
        let first = &expanded[0];
        assert_eq!(first.mouse.as_ref().unwrap().position.x, 5.0);
        assert!(!first.mouse.as_ref().unwrap().has_any_button_pressed());
        assert_eq!(first.keyboard.as_ref().unwrap().keys(), &[Key::Char('q')]);

        // Buttons toggle in index order: Left before Right.
        assert!(expanded[1].mouse.as_ref().unwrap().is_pressed(MouseButton::Left));
        assert!(!expanded[1].mouse.as_ref().unwrap().is_pressed(MouseButton::Right));

        // Release before presses, presses in source order.
        assert!(expanded[3].keyboard.as_ref().unwrap().is_empty());
        assert_eq!(expanded[4].keyboard.as_ref().unwrap().keys(), &[Key::Char('a')]);
        assert_eq!(
            expanded[5].keyboard.as_ref().unwrap().keys(),
            &[Key::Char('a'), Key::LShift]
        );
    }

    #[test]
    fn unchanged_snapshot_yields_one_state() {
        let current = base();
        let raw = InputState::new().with_mouse(MouseState::at(3.0, 4.0));
        let expanded = expand_states(&current, vec![raw]);
        assert_eq!(expanded.len(), 1);
        assert!(expanded[0].keyboard.is_none());
    }

    #[test]
    fn wheel_is_not_repeated_on_intermediate_states() {
        let current = base();
        let raw = InputState::new().with_mouse(
            MouseState::at(0.0, 0.0)
                .with_pressed(MouseButton::Left)
                .with_wheel(2.0),
        );
        let expanded = expand_states(&current, vec![raw]);
        assert_eq!(expanded.len(), 2);
        assert_eq!(expanded[0].mouse.as_ref().unwrap().wheel_delta, 2.0);
        assert_eq!(expanded[1].mouse.as_ref().unwrap().wheel_delta, 0.0);
    }

    #[test]
    fn keyboard_only_snapshot_keeps_known_buttons() {
        let current = base();
        let press = InputState::new().with_mouse(MouseState::at(1.0, 1.0).with_pressed(MouseButton::Left));
        let typing = InputState::new().with_keyboard(KeyboardState::from_keys([Key::Char('x')]));
        let still_held =
            InputState::new().with_mouse(MouseState::at(2.0, 1.0).with_pressed(MouseButton::Left));

        let expanded = expand_states(&current, vec![press, typing, still_held]);

        // press: rolled + 1, typing: rolled + 1, still_held: rolled only
        assert_eq!(expanded.len(), 5);
        let last = expanded.last().unwrap();
        assert!(last.mouse.as_ref().unwrap().is_pressed(MouseButton::Left));
        assert!(last.keyboard.is_none());
    }

    #[test]
    fn multiple_snapshots_chain_from_each_other() {
        let current = base();
        let down = InputState::new().with_mouse(MouseState::at(0.0, 0.0).with_pressed(MouseButton::Left));
        let up = InputState::new().with_mouse(MouseState::at(0.0, 0.0));
        let expanded = expand_states(&current, vec![down, up]);
        let pressed: Vec<bool> = expanded
            .iter()
            .map(|s| s.mouse.as_ref().unwrap().is_pressed(MouseButton::Left))
            .collect();
        assert_eq!(pressed, vec![false, true, true, false]);
    }
}
