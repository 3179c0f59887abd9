use super::dispatch::Dispatcher;
use crate::input::error::InputError;
use crate::scene::NodeId;

/// Tracks which nodes are under the cursor and which one consumed hover.
#[derive(Debug, Default)]
pub(crate) struct HoverTracker {
    /// Hovered nodes front-most first, up to and including `handled_by`
    hovered: Vec<NodeId>,
    last_hovered: Vec<NodeId>,
    handled_by: Option<NodeId>,
}

impl HoverTracker {
    pub fn hovered(&self) -> &[NodeId] {
        &self.hovered
    }

    pub fn handled_by(&self) -> Option<NodeId> {
        self.handled_by
    }

    /// Recomputes hover from the current mouse queue.
    pub fn update(&mut self, d: &mut Dispatcher<'_>, mouse_queue: &[NodeId]) -> Result<(), InputError> {
        let last_handled_by = self.handled_by.take();

        std::mem::swap(&mut self.last_hovered, &mut self.hovered);
        self.hovered.clear();

        for &node in mouse_queue {
            self.hovered.push(node);

            if d.scene.flags(node).is_hovered() {
                // Assume the previous handler would handle hover again.
                if Some(node) == last_handled_by {
                    self.handled_by = last_handled_by;
                    break;
                }
                continue;
            }

            d.scene.set_hovered(node, true);
            if d.trigger(node, |handler, cx| handler.on_hover(cx))? {
                self.handled_by = Some(node);
                break;
            }
        }

        for &node in &self.last_hovered {
            if self.hovered.contains(&node) {
                continue;
            }
            d.scene.set_hovered(node, false);
            d.trigger(node, |handler, cx| {
                handler.on_hover_lost(cx);
                false
            })?;
        }

        Ok(())
    }
}
