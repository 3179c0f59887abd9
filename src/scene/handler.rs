//! Capability surface a node exposes to the input router.

use super::{NodeId, NodeLayout};
use crate::input::events::{KeyDownArgs, KeyUpArgs, MouseDownArgs, MouseUpArgs};
use crate::input::state::{InputState, KeyboardState, MouseState};
use crate::util::Point;

/// A focus change requested by a handler while it processes an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusRequest {
    /// Move focus to the given node
    Focus(NodeId),
    /// Drop focus entirely
    Clear,
}

/// Context handed to every event callback.
pub struct EventContext<'a> {
    state: &'a InputState,
    node: NodeId,
    focus_request: Option<FocusRequest>,
}

impl<'a> EventContext<'a> {
    pub(crate) fn new(state: &'a InputState, node: NodeId) -> Self {
        Self {
            state,
            node,
            focus_request: None,
        }
    }

    /// The reconciled state being dispatched.
    pub fn state(&self) -> &InputState {
        self.state
    }

    pub fn mouse(&self) -> Option<&MouseState> {
        self.state.mouse.as_ref()
    }

    pub fn keyboard(&self) -> Option<&KeyboardState> {
        self.state.keyboard.as_ref()
    }

    /// The node receiving this event.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Asks the router to focus `target` once this callback returns.
    pub fn request_focus(&mut self, target: NodeId) {
        self.focus_request = Some(FocusRequest::Focus(target));
    }

    /// Asks the router to drop focus once this callback returns.
    pub fn release_focus(&mut self) {
        self.focus_request = Some(FocusRequest::Clear);
    }

    pub(crate) fn take_focus_request(&mut self) -> Option<FocusRequest> {
        self.focus_request.take()
    }
}

/// Input callbacks of a scene node.
///
/// Every `on_*` method returning `bool` reports whether the node handled the
/// event; handled events stop propagating down the queue. All methods default
/// to "not interested", so a node only overrides what it reacts to.
#[allow(unused_variables)]
pub trait InputHandler {
    /// Cursor entered the node. Returning true stops hover from reaching nodes behind it.
    fn on_hover(&mut self, cx: &mut EventContext<'_>) -> bool {
        false
    }

    fn on_hover_lost(&mut self, cx: &mut EventContext<'_>) {}

    fn on_mouse_down(&mut self, cx: &mut EventContext<'_>, args: MouseDownArgs) -> bool {
        false
    }

    fn on_mouse_up(&mut self, cx: &mut EventContext<'_>, args: MouseUpArgs) -> bool {
        false
    }

    fn on_mouse_move(&mut self, cx: &mut EventContext<'_>) -> bool {
        false
    }

    fn on_click(&mut self, cx: &mut EventContext<'_>) -> bool {
        false
    }

    fn on_double_click(&mut self, cx: &mut EventContext<'_>) -> bool {
        false
    }

    /// Returning true makes this node the drag owner until all buttons are released.
    fn on_drag_start(&mut self, cx: &mut EventContext<'_>) -> bool {
        false
    }

    fn on_drag(&mut self, cx: &mut EventContext<'_>) -> bool {
        false
    }

    fn on_drag_end(&mut self, cx: &mut EventContext<'_>) -> bool {
        false
    }

    fn on_wheel(&mut self, cx: &mut EventContext<'_>) -> bool {
        false
    }

    fn on_key_down(&mut self, cx: &mut EventContext<'_>, args: KeyDownArgs) -> bool {
        false
    }

    fn on_key_up(&mut self, cx: &mut EventContext<'_>, args: KeyUpArgs) -> bool {
        false
    }

    fn on_focus(&mut self, cx: &mut EventContext<'_>) {}

    /// Must not request a focus change; doing so is a fatal routing error.
    fn on_focus_lost(&mut self, cx: &mut EventContext<'_>) {}

    fn accepts_focus(&self) -> bool {
        false
    }

    /// Whether this node wants focus whenever nothing else holds it.
    fn requests_focus(&self) -> bool {
        false
    }

    /// Whether this node receives an extra move at the end of every frame.
    fn requires_high_frequency_mouse_position(&self) -> bool {
        false
    }

    fn receives_mouse_input_at(&self, layout: &NodeLayout, position: Point) -> bool {
        layout.bounds.contains(position)
    }

    /// Appends this node to the keyboard queue. Returning false skips the children.
    fn build_keyboard_queue(&self, id: NodeId, queue: &mut Vec<NodeId>) -> bool {
        queue.push(id);
        true
    }

    /// Appends this node to the mouse queue if it is under `position`.
    /// Returning false skips the children.
    fn build_mouse_queue(
        &self,
        id: NodeId,
        layout: &NodeLayout,
        position: Point,
        queue: &mut Vec<NodeId>,
    ) -> bool {
        let inside = self.receives_mouse_input_at(layout, position);
        if inside {
            queue.push(id);
        }
        inside || !layout.clips_children
    }
}

/// Handler of the scene root. The root never takes part in dispatch.
#[derive(Debug, Default)]
pub struct RootHandler;

impl InputHandler for RootHandler {}
