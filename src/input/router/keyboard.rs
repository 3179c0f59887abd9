//! Key down/up delivery and key repeat.

use super::RouterSettings;
use super::dispatch::Dispatcher;
use crate::input::error::InputError;
use crate::input::events::{Key, KeyDownArgs, KeyUpArgs};
use crate::scene::NodeId;
use log::debug;

/// Countdown until the next repeated key-down, in milliseconds.
#[derive(Debug, Default)]
pub(crate) struct KeyRepeat {
    repeat_time: f64,
}

impl KeyRepeat {
    /// Counts the repeat timer down by a frame's elapsed time.
    pub fn elapse(&mut self, elapsed_ms: f64) {
        self.repeat_time -= elapsed_ms;
    }

    /// Dispatches key-up for released keys and key-down for held keys.
    pub fn update(
        &mut self,
        d: &mut Dispatcher<'_>,
        keyboard_queue: &[NodeId],
        settings: &RouterSettings,
        now: f64,
        last_action_time: &mut f64,
    ) -> Result<(), InputError> {
        let Some(keyboard) = d.state.keyboard.clone() else {
            return Ok(());
        };

        if keyboard.is_empty() {
            self.repeat_time = 0.0;
        }

        let Some(last) = d.state.last().and_then(|l| l.keyboard.clone()) else {
            return Ok(());
        };

        for key in last.keys_not_in(&keyboard) {
            key_up(d, keyboard_queue, key)?;
        }

        for &key in keyboard.keys() {
            *last_action_time = now;
            let is_repetition = last.is_pressed(key);

            if key.is_modifier() {
                // Modifiers never repeat and do not touch the repeat timer.
                if !is_repetition {
                    key_down(d, keyboard_queue, key, false)?;
                }
                continue;
            }

            if is_repetition {
                if self.repeat_time <= 0.0 {
                    self.repeat_time += settings.repeat_tick_rate;
                    key_down(d, keyboard_queue, key, true)?;
                }
            } else {
                self.repeat_time = settings.repeat_initial_delay;
                key_down(d, keyboard_queue, key, false)?;
            }
        }

        Ok(())
    }
}

fn key_down(
    d: &mut Dispatcher<'_>,
    keyboard_queue: &[NodeId],
    key: Key,
    repeat: bool,
) -> Result<bool, InputError> {
    let args = KeyDownArgs { key, repeat };

    if !d.focus.unfocus_if_invalid(d.scene, d.state)? {
        if key == Key::Escape {
            debug!("Escape cleared focus");
            d.focus.change_focus(d.scene, None, d.state)?;
            return Ok(true);
        }
        if let Some(focused) = d.focus.focused() {
            if d.trigger(focused, |handler, cx| handler.on_key_down(cx, args))? {
                return Ok(true);
            }
        }
    }

    let handled = d.first_handling(keyboard_queue, |handler, cx| handler.on_key_down(cx, args))?;
    Ok(handled.is_some())
}

fn key_up(d: &mut Dispatcher<'_>, keyboard_queue: &[NodeId], key: Key) -> Result<bool, InputError> {
    let args = KeyUpArgs { key };

    if !d.focus.unfocus_if_invalid(d.scene, d.state)? {
        if let Some(focused) = d.focus.focused() {
            if d.trigger(focused, |handler, cx| handler.on_key_up(cx, args))? {
                return Ok(true);
            }
        }
    }

    let handled = d.first_handling(keyboard_queue, |handler, cx| handler.on_key_up(cx, args))?;
    Ok(handled.is_some())
}
