use crate::input::error::InputError;
use crate::input::state::InputState;
use crate::scene::{EventContext, FocusRequest, NodeId, Scene};
use log::{debug, warn};

/// Owner of the single focused node.
#[derive(Debug, Default)]
pub(crate) struct FocusController {
    focused: Option<NodeId>,
}

impl FocusController {
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Moves focus to `target` (or clears it for `None`).
    ///
    /// Returns `Ok(false)` without side effects when `target` cannot take focus,
    /// and `Ok(true)` when `target` is focused afterwards, including the no-op
    /// case where it already was.
    pub fn change_focus(
        &mut self,
        scene: &mut Scene,
        target: Option<NodeId>,
        state: &InputState,
    ) -> Result<bool, InputError> {
        if target == self.focused {
            return Ok(true);
        }

        if let Some(node) = target {
            if !scene.is_present(node) || !scene.accepts_focus(node) {
                return Ok(false);
            }
        }

        let previous = self.focused.take();

        if let Some(node) = previous {
            scene.set_has_focus(node, false);
            if let Some(handler) = scene.handler_mut(node) {
                let mut cx = EventContext::new(state, node);
                handler.on_focus_lost(&mut cx);
                if let Some(request) = cx.take_focus_request() {
                    warn!("Node {node} requested {request:?} while losing focus");
                    return Err(InputError::FocusChangedDuringFocusLost { node, request });
                }
            }
        }

        self.focused = target;
        debug!("Focus changed: {previous:?} -> {target:?}");

        if let Some(node) = target {
            scene.set_has_focus(node, true);
            let request = scene.handler_mut(node).and_then(|handler| {
                let mut cx = EventContext::new(state, node);
                handler.on_focus(&mut cx);
                cx.take_focus_request()
            });
            if let Some(request) = request {
                self.apply_request(scene, request, state)?;
            }
        }

        Ok(true)
    }

    /// Applies a focus request issued by a handler.
    pub fn apply_request(
        &mut self,
        scene: &mut Scene,
        request: FocusRequest,
        state: &InputState,
    ) -> Result<bool, InputError> {
        match request {
            FocusRequest::Focus(node) => self.change_focus(scene, Some(node), state),
            FocusRequest::Clear => self.change_focus(scene, None, state),
        }
    }

    /// Drops focus if the focused node can no longer hold it.
    ///
    /// Returns true when nothing is focused afterwards.
    pub fn unfocus_if_invalid(
        &mut self,
        scene: &mut Scene,
        state: &InputState,
    ) -> Result<bool, InputError> {
        let Some(node) = self.focused else {
            return Ok(true);
        };

        if is_focus_still_valid(scene, node) {
            return Ok(false);
        }

        debug!("Focused node {node} is no longer valid");
        self.change_focus(scene, None, state)?;
        Ok(true)
    }

    /// Clears focus unless the input root itself holds it, letting the
    /// top-most requesting node claim focus on the next update.
    pub fn trigger_contention(
        &mut self,
        scene: &mut Scene,
        state: &InputState,
    ) -> Result<(), InputError> {
        if self.focused != Some(scene.root()) {
            self.change_focus(scene, None, state)?;
        }
        Ok(())
    }
}

/// A focused node must be present, attached, and every ancestor present.
fn is_focus_still_valid(scene: &Scene, node: NodeId) -> bool {
    scene.is_present(node)
        && scene.parent(node).is_some()
        && scene.ancestors(node).all(|ancestor| scene.is_present(ancestor))
}
