use crate::input::state::InputState;
use crate::scene::{NodeId, Scene};
use crate::util::Point;

/// Dispatch order for the current state, front-most node first.
#[derive(Debug, Default)]
pub(crate) struct InputQueues {
    pub keyboard: Vec<NodeId>,
    pub mouse: Vec<NodeId>,
}

impl InputQueues {
    /// Rebuilds both queues from scratch by walking the root's live subtree.
    pub fn rebuild(&mut self, scene: &Scene, state: &InputState) {
        self.keyboard.clear();
        self.mouse.clear();

        let root = scene.root();

        if state.keyboard.is_some() {
            for &child in scene.children(root) {
                build_keyboard_queue(scene, child, &mut self.keyboard);
            }
        }

        if let Some(mouse) = &state.mouse {
            for &child in scene.children(root) {
                build_mouse_queue(scene, child, mouse.position, &mut self.mouse);
            }
        }

        // Traversal produced back-to-front order; input reaches the front first.
        self.keyboard.reverse();
        self.mouse.reverse();
    }
}

fn is_live(scene: &Scene, node: NodeId) -> bool {
    scene.is_alive(node) && scene.is_present(node)
}

fn build_keyboard_queue(scene: &Scene, node: NodeId, queue: &mut Vec<NodeId>) -> bool {
    if !is_live(scene, node) {
        return false;
    }
    let Some((handler, _)) = scene.handler(node) else {
        return false;
    };
    if !handler.build_keyboard_queue(node, queue) {
        return false;
    }
    for &child in scene.children(node) {
        build_keyboard_queue(scene, child, queue);
    }
    true
}

fn build_mouse_queue(scene: &Scene, node: NodeId, position: Point, queue: &mut Vec<NodeId>) -> bool {
    if !is_live(scene, node) {
        return false;
    }
    let Some((handler, layout)) = scene.handler(node) else {
        return false;
    };
    if !handler.build_mouse_queue(node, layout, position, queue) {
        return false;
    }
    for &child in scene.children(node) {
        build_mouse_queue(scene, child, position, queue);
    }
    true
}
