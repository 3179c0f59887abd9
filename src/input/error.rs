use crate::scene::{FocusRequest, NodeId};
use thiserror::Error;

/// Errors that abort input routing.
///
/// Routing outcomes such as "no node handled the event" are not errors; this
/// type only covers collaborators breaking the router's invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// A node asked for a focus change from inside its `on_focus_lost` callback.
    #[error("focus cannot be changed inside on_focus_lost (node {node} requested {request:?})")]
    FocusChangedDuringFocusLost { node: NodeId, request: FocusRequest },
}
