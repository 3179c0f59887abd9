//! Click, double-click and drag state machine.

use super::RouterSettings;
use super::dispatch::Dispatcher;
use crate::input::error::InputError;
use crate::input::events::{MouseButton, MouseDownArgs, MouseUpArgs};
use crate::input::state::MouseState;
use crate::scene::{NodeId, Scene};
use crate::util::Point;
use log::debug;

/// Per-gesture pointer state.
#[derive(Debug, Default)]
pub(crate) struct PointerTracker {
    /// Mouse queue frozen when a button went down
    mouse_down_queue: Option<Vec<NodeId>>,
    is_dragging: bool,
    drag_owner: Option<NodeId>,
    is_valid_click: bool,
    last_click_time: Option<f64>,
}

impl PointerTracker {
    pub fn drag_owner(&self) -> Option<NodeId> {
        self.drag_owner
    }

    /// Dispatches mouse events for the state in `d` against its predecessor.
    pub fn update(
        &mut self,
        d: &mut Dispatcher<'_>,
        mouse_queue: &[NodeId],
        settings: &RouterSettings,
        now: f64,
        last_action_time: &mut f64,
    ) -> Result<(), InputError> {
        let Some(mouse) = d.state.mouse.clone() else {
            return Ok(());
        };
        let Some(last) = d.state.last().and_then(|l| l.mouse.clone()) else {
            return Ok(());
        };

        if mouse.position != last.position {
            d.first_handling(mouse_queue, |handler, cx| handler.on_mouse_move(cx))?;
            if self.is_dragging {
                if let Some(owner) = self.drag_owner {
                    d.trigger(owner, |handler, cx| handler.on_drag(cx))?;
                }
            }
        }

        for button in MouseButton::ALL {
            let was_pressed = last.is_pressed(button);
            if was_pressed == mouse.is_pressed(button) {
                continue;
            }
            if was_pressed {
                self.mouse_up(d, button)?;
            } else {
                self.mouse_down(d, mouse_queue, button)?;
            }
        }

        if mouse.wheel_delta != 0.0 {
            d.first_handling(mouse_queue, |handler, cx| handler.on_wheel(cx))?;
        }

        if mouse.has_any_button_pressed() {
            let mut press_position = mouse.position_mouse_down;

            if !last.has_any_button_pressed() {
                press_position = Some(mouse.position);
                set_press_position(d, press_position);
                *last_action_time = now;

                if mouse.is_pressed(MouseButton::Left) {
                    self.primary_press(d, mouse_queue, settings, now)?;
                }
            }

            let origin = press_position.unwrap_or(mouse.position);
            if !self.is_dragging && origin.distance(mouse.position) > settings.drag_start_distance {
                self.is_dragging = true;
                self.start_drag(d)?;
            }
        } else if last.has_any_button_pressed() {
            self.release(d, mouse_queue, &mouse, settings)?;
        }

        Ok(())
    }

    fn primary_press(
        &mut self,
        d: &mut Dispatcher<'_>,
        mouse_queue: &[NodeId],
        settings: &RouterSettings,
        now: f64,
    ) -> Result<(), InputError> {
        self.is_valid_click = true;

        let within_double_click = self
            .last_click_time
            .is_some_and(|last_click| now - last_click < settings.double_click_time);

        if within_double_click {
            let handled =
                d.first_handling(mouse_queue, |handler, cx| handler.on_double_click(cx))?;
            if let Some(node) = handled {
                debug!("Double click handled by {node}; suppressing click");
                // A handled double click blocks the normal click and cannot chain.
                self.is_valid_click = false;
                self.last_click_time = None;
                return Ok(());
            }
        }

        self.last_click_time = Some(now);
        Ok(())
    }

    fn release(
        &mut self,
        d: &mut Dispatcher<'_>,
        mouse_queue: &[NodeId],
        mouse: &MouseState,
        settings: &RouterSettings,
    ) -> Result<(), InputError> {
        let origin = mouse.position_mouse_down.unwrap_or(mouse.position);
        let small_drag = origin.distance(mouse.position) < settings.click_drag_distance;

        if self.is_valid_click && (self.drag_owner.is_none() || small_drag) {
            self.click(d, mouse_queue, mouse.position)?;
        }

        self.mouse_down_queue = None;
        set_press_position(d, None);
        self.is_valid_click = false;

        if self.is_dragging {
            self.is_dragging = false;
            self.end_drag(d)?;
        }
        Ok(())
    }

    fn mouse_down(
        &mut self,
        d: &mut Dispatcher<'_>,
        mouse_queue: &[NodeId],
        button: MouseButton,
    ) -> Result<bool, InputError> {
        self.mouse_down_queue = Some(mouse_queue.to_vec());
        let args = MouseDownArgs { button };
        let handled = d.first_handling(mouse_queue, |handler, cx| handler.on_mouse_down(cx, args))?;
        Ok(handled.is_some())
    }

    fn mouse_up(&mut self, d: &mut Dispatcher<'_>, button: MouseButton) -> Result<bool, InputError> {
        let Some(queue) = self.mouse_down_queue.clone() else {
            return Ok(false);
        };
        let args = MouseUpArgs { button };

        // The press-time queue may be stale.
        for node in queue {
            if !is_receivable(d.scene, node) {
                continue;
            }
            if d.trigger(node, |handler, cx| handler.on_mouse_up(cx, args))? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn click(
        &mut self,
        d: &mut Dispatcher<'_>,
        mouse_queue: &[NodeId],
        position: Point,
    ) -> Result<bool, InputError> {
        let Some(down_queue) = self.mouse_down_queue.as_ref() else {
            return Ok(false);
        };
        let candidates: Vec<NodeId> = mouse_queue
            .iter()
            .copied()
            .filter(|node| down_queue.contains(node))
            .collect();

        let mut clicked = None;
        for node in candidates {
            if !is_receivable(d.scene, node) || !d.scene.receives_mouse_input_at(node, position) {
                continue;
            }
            if d.trigger(node, |handler, cx| handler.on_click(cx))? {
                clicked = Some(node);
                break;
            }
        }

        let focus_target =
            clicked.and_then(|node| focus_target_for_click(d.scene, node, d.focus.focused()));
        d.focus.change_focus(d.scene, focus_target, d.state)?;

        Ok(clicked.is_some())
    }

    fn start_drag(&mut self, d: &mut Dispatcher<'_>) -> Result<(), InputError> {
        debug_assert!(self.drag_owner.is_none(), "drag owner was not cleared by end_drag");

        let Some(queue) = self.mouse_down_queue.clone() else {
            return Ok(());
        };
        for node in queue {
            if !d.scene.is_alive(node) {
                continue;
            }
            if d.trigger(node, |handler, cx| handler.on_drag_start(cx))? {
                debug!("Drag started on {node}");
                d.scene.set_dragged(node, true);
                self.drag_owner = Some(node);
                break;
            }
        }
        Ok(())
    }

    fn end_drag(&mut self, d: &mut Dispatcher<'_>) -> Result<(), InputError> {
        let Some(owner) = self.drag_owner.take() else {
            return Ok(());
        };
        if d.scene.is_alive(owner) {
            d.trigger(owner, |handler, cx| handler.on_drag_end(cx))?;
        } else {
            debug!("Drag owner {owner} died before drag end");
        }
        d.scene.set_dragged(owner, false);
        Ok(())
    }
}

fn set_press_position(d: &mut Dispatcher<'_>, position: Option<Point>) {
    if let Some(mouse) = d.state.mouse.as_mut() {
        mouse.position_mouse_down = position;
    }
}

fn is_receivable(scene: &Scene, node: NodeId) -> bool {
    scene.is_alive(node) && scene.is_present(node)
}

/// Picks the node that should hold focus after `clicked` handled a click.
///
/// A node that does not accept focus defers to its nearest accepting ancestor,
/// unless that ancestor already contains the previously focused node, in which
/// case focus stays where it was.
fn focus_target_for_click(
    scene: &Scene,
    clicked: NodeId,
    previous: Option<NodeId>,
) -> Option<NodeId> {
    if scene.accepts_focus(clicked) {
        return Some(clicked);
    }

    let target = scene.ancestors(clicked).find(|node| scene.accepts_focus(*node))?;

    if let Some(previous) = previous {
        if previous == target || scene.ancestors(previous).any(|node| node == target) {
            return Some(previous);
        }
    }
    Some(target)
}
