use super::focus::FocusController;
use crate::input::error::InputError;
use crate::input::state::InputState;
use crate::scene::{EventContext, InputHandler, NodeId, Scene};

/// Borrowed view of everything a single event delivery touches.
pub(crate) struct Dispatcher<'a> {
    pub scene: &'a mut Scene,
    pub focus: &'a mut FocusController,
    pub state: &'a mut InputState,
}

impl Dispatcher<'_> {
    /// Delivers one event to `node` and applies any focus change it requested.
    ///
    /// Unknown nodes report "not handled".
    pub fn trigger<F>(&mut self, node: NodeId, event: F) -> Result<bool, InputError>
    where
        F: FnOnce(&mut dyn InputHandler, &mut EventContext<'_>) -> bool,
    {
        let Some(handler) = self.scene.handler_mut(node) else {
            return Ok(false);
        };
        let mut cx = EventContext::new(self.state, node);
        let handled = event(handler, &mut cx);

        if let Some(request) = cx.take_focus_request() {
            self.focus.apply_request(self.scene, request, self.state)?;
        }
        Ok(handled)
    }

    /// Delivers an event along `queue` until a node handles it.
    pub fn first_handling<F>(
        &mut self,
        queue: &[NodeId],
        mut event: F,
    ) -> Result<Option<NodeId>, InputError>
    where
        F: FnMut(&mut dyn InputHandler, &mut EventContext<'_>) -> bool,
    {
        for &node in queue {
            if self.trigger(node, &mut event)? {
                return Ok(Some(node));
            }
        }
        Ok(None)
    }
}
