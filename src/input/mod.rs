//! Input state, sources and routing.
//!
//! Backends produce [`InputState`] snapshots through an [`InputSource`]. The
//! [`InputRouter`] turns them into per-node notifications (hover, click, drag,
//! key presses, focus) against a [`Scene`](crate::scene::Scene).

pub mod error;
pub mod events;
pub mod expand;
pub mod modifiers;
pub mod router;
pub mod source;
pub mod state;

// Re-export commonly used types at module level
pub use error::InputError;
pub use events::{Key, KeyDownArgs, KeyUpArgs, MouseButton, MouseDownArgs, MouseUpArgs, ParseKeyError};
pub use modifiers::Modifiers;
pub use router::{InputRouter, RouterSettings};
pub use source::{InputSource, QueuedSource, collect_pending_states};
pub use state::{InputState, KeyboardState, MouseState, PointerKind};
