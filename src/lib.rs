//! Input routing for a retained scene graph.
//!
//! Raw device snapshots are reconciled into a current [`InputState`], split
//! into single transitions, and dispatched to the nodes of a [`Scene`] as hover,
//! click, drag, wheel, key and focus notifications.
//!
//! The [`replay`] module drives the router from scripted TOML traces; the
//! `scene-input` binary exposes it on the command line.

pub mod config;
pub mod input;
pub mod replay;
pub mod scene;
pub mod util;

pub use config::Config;
pub use input::{InputError, InputRouter, InputState, RouterSettings};
pub use scene::{EventContext, InputHandler, NodeId, NodeLayout, Scene};
