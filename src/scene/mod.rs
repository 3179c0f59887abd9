//! Minimal node arena the router walks.
//!
//! Nodes live in a flat `Vec` and refer to each other by `NodeId`. Parents are
//! plain indices, so the tree owns no cycles. Ids are never recycled: a removed
//! node leaves an empty slot, which lets stale press-time queues refer to it
//! safely.

mod handler;

pub use handler::{EventContext, FocusRequest, InputHandler, RootHandler};

use crate::util::{Point, Rect};
use std::fmt;
use thiserror::Error;

/// Handle of a node inside a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Geometry the default hit-test uses.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NodeLayout {
    /// Screen-space bounds
    pub bounds: Rect,
    /// Children outside `bounds` cannot be hit
    pub clips_children: bool,
}

impl NodeLayout {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            clips_children: false,
        }
    }

    pub fn clipped(bounds: Rect) -> Self {
        Self {
            bounds,
            clips_children: true,
        }
    }
}

/// Interaction flags maintained by the router.
///
/// Readable by anyone; only the router writes them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionFlags {
    is_hovered: bool,
    is_dragged: bool,
    has_focus: bool,
}

impl InteractionFlags {
    pub fn is_hovered(&self) -> bool {
        self.is_hovered
    }

    pub fn is_dragged(&self) -> bool {
        self.is_dragged
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }
}

/// Errors raised by tree mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("the root node cannot be detached or removed")]
    RootImmutable,

    #[error("attaching {child} below {parent} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
}

struct NodeData {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    present: bool,
    alive: bool,
    layout: NodeLayout,
    flags: InteractionFlags,
    handler: Box<dyn InputHandler>,
}

/// Arena of input-capable nodes rooted at a single input root.
pub struct Scene {
    nodes: Vec<Option<NodeData>>,
    root: NodeId,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates a scene containing only the root.
    pub fn new() -> Self {
        let root = NodeData {
            parent: None,
            children: Vec::new(),
            present: true,
            alive: true,
            layout: NodeLayout::default(),
            flags: InteractionFlags::default(),
            handler: Box::new(RootHandler),
        };
        Self {
            nodes: vec![Some(root)],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Adds a node as the last (front-most) child of `parent`.
    pub fn add(
        &mut self,
        parent: NodeId,
        layout: NodeLayout,
        handler: impl InputHandler + 'static,
    ) -> Result<NodeId, SceneError> {
        let id = NodeId(self.nodes.len());
        self.node_mut(parent)?.children.push(id);
        self.nodes.push(Some(NodeData {
            parent: Some(parent),
            children: Vec::new(),
            present: true,
            alive: true,
            layout,
            flags: InteractionFlags::default(),
            handler: Box::new(handler),
        }));
        Ok(id)
    }

    /// Whether `id` still refers to a node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Children in draw order (back-most first).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Parents of `id`, nearest first, ending at the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    pub fn is_present(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.present)
    }

    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.alive)
    }

    pub fn set_present(&mut self, id: NodeId, present: bool) -> Result<(), SceneError> {
        self.node_mut(id)?.present = present;
        Ok(())
    }

    /// Marks a node dead. Dead nodes stay attached but are skipped by queue
    /// construction and by dispatch through stale queues.
    pub fn set_alive(&mut self, id: NodeId, alive: bool) -> Result<(), SceneError> {
        self.node_mut(id)?.alive = alive;
        Ok(())
    }

    pub fn layout(&self, id: NodeId) -> Option<&NodeLayout> {
        self.node(id).map(|n| &n.layout)
    }

    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) -> Result<(), SceneError> {
        self.node_mut(id)?.layout.bounds = bounds;
        Ok(())
    }

    /// Router-maintained flags; default flags for unknown ids.
    pub fn flags(&self, id: NodeId) -> InteractionFlags {
        self.node(id).map(|n| n.flags).unwrap_or_default()
    }

    /// Unlinks `id` from its parent. The node keeps its subtree and id.
    pub fn detach(&mut self, id: NodeId) -> Result<(), SceneError> {
        if id == self.root {
            return Err(SceneError::RootImmutable);
        }
        let parent = self.node_mut(id)?.parent.take();
        if let Some(parent) = parent {
            if let Ok(parent) = self.node_mut(parent) {
                parent.children.retain(|c| *c != id);
            }
        }
        Ok(())
    }

    /// Re-parents a detached or attached node as the front-most child of `parent`.
    pub fn attach(&mut self, parent: NodeId, id: NodeId) -> Result<(), SceneError> {
        if id == self.root {
            return Err(SceneError::RootImmutable);
        }
        self.node(parent).ok_or(SceneError::UnknownNode(parent))?;
        if parent == id || self.ancestors(parent).any(|a| a == id) {
            return Err(SceneError::Cycle { parent, child: id });
        }
        self.detach(id)?;
        self.node_mut(id)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(id);
        Ok(())
    }

    /// Detaches `id` and drops it together with its subtree.
    pub fn remove(&mut self, id: NodeId) -> Result<(), SceneError> {
        self.detach(id)?;
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(slot) = self.nodes.get_mut(current.0) {
                if let Some(node) = slot.take() {
                    pending.extend(node.children);
                }
            }
        }
        Ok(())
    }

    pub fn accepts_focus(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.handler.accepts_focus())
    }

    pub fn requests_focus(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.handler.requests_focus())
    }

    pub fn requires_high_frequency_mouse_position(&self, id: NodeId) -> bool {
        self.node(id)
            .is_some_and(|n| n.handler.requires_high_frequency_mouse_position())
    }

    pub fn receives_mouse_input_at(&self, id: NodeId, position: Point) -> bool {
        self.node(id)
            .is_some_and(|n| n.handler.receives_mouse_input_at(&n.layout, position))
    }

    pub(crate) fn handler(&self, id: NodeId) -> Option<(&dyn InputHandler, &NodeLayout)> {
        self.node(id).map(|n| (n.handler.as_ref(), &n.layout))
    }

    pub(crate) fn handler_mut(&mut self, id: NodeId) -> Option<&mut (dyn InputHandler + 'static)> {
        match self.nodes.get_mut(id.0) {
            Some(Some(node)) => Some(node.handler.as_mut()),
            _ => None,
        }
    }

    pub(crate) fn set_hovered(&mut self, id: NodeId, hovered: bool) {
        if let Ok(node) = self.node_mut(id) {
            node.flags.is_hovered = hovered;
        }
    }

    pub(crate) fn set_dragged(&mut self, id: NodeId, dragged: bool) {
        if let Ok(node) = self.node_mut(id) {
            node.flags.is_dragged = dragged;
        }
    }

    pub(crate) fn set_has_focus(&mut self, id: NodeId, focused: bool) {
        if let Ok(node) = self.node_mut(id) {
            node.flags.has_focus = focused;
        }
    }

    fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData, SceneError> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(SceneError::UnknownNode(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;
    impl InputHandler for Plain {}

    fn layout() -> NodeLayout {
        NodeLayout::new(Rect::new(0.0, 0.0, 10.0, 10.0).unwrap())
    }

    #[test]
    fn ancestors_walk_to_root() {
        let mut scene = Scene::new();
        let a = scene.add(scene.root(), layout(), Plain).unwrap();
        let b = scene.add(a, layout(), Plain).unwrap();
        assert_eq!(scene.ancestors(b).collect::<Vec<_>>(), vec![a, scene.root()]);
        assert_eq!(scene.children(scene.root()), &[a]);
    }

    #[test]
    fn remove_drops_subtree_but_keeps_ids_unique() {
        let mut scene = Scene::new();
        let a = scene.add(scene.root(), layout(), Plain).unwrap();
        let b = scene.add(a, layout(), Plain).unwrap();
        scene.remove(a).unwrap();
        assert!(!scene.contains(a));
        assert!(!scene.contains(b));
        assert!(!scene.is_present(b));
        let c = scene.add(scene.root(), layout(), Plain).unwrap();
        assert_ne!(c, a);
        assert_eq!(scene.set_present(a, true), Err(SceneError::UnknownNode(a)));
    }

    #[test]
    fn detach_keeps_node_but_clears_parent() {
        let mut scene = Scene::new();
        let a = scene.add(scene.root(), layout(), Plain).unwrap();
        scene.detach(a).unwrap();
        assert!(scene.contains(a));
        assert_eq!(scene.parent(a), None);
        assert!(scene.children(scene.root()).is_empty());
        assert_eq!(scene.detach(scene.root()), Err(SceneError::RootImmutable));
    }

    #[test]
    fn attach_rejects_cycles() {
        let mut scene = Scene::new();
        let a = scene.add(scene.root(), layout(), Plain).unwrap();
        let b = scene.add(a, layout(), Plain).unwrap();
        assert_eq!(
            scene.attach(b, a),
            Err(SceneError::Cycle { parent: b, child: a })
        );
        scene.attach(scene.root(), b).unwrap();
        assert_eq!(scene.children(scene.root()), &[a, b]);
    }
}
