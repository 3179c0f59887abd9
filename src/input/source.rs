//! Device polling collaborators.
//!
//! Backends hand the router already-materialised snapshots once per tick.

use super::state::InputState;
use std::collections::VecDeque;

/// A polled input device.
pub trait InputSource {
    /// Whether the device is currently producing input (e.g. window focused).
    fn is_active(&self) -> bool {
        true
    }

    /// Whether the user has enabled this device.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Drains the snapshots gathered since the previous call.
    fn take_pending_states(&mut self) -> Vec<InputState>;
}

/// Gathers pending snapshots from every source, in source order.
///
/// Inactive or disabled sources are still drained so stale snapshots do not
/// surface once they come back; their states are dropped.
pub fn collect_pending_states(sources: &mut [Box<dyn InputSource>]) -> Vec<InputState> {
    let mut pending = Vec::new();
    for source in sources.iter_mut() {
        let states = source.take_pending_states();
        if source.is_active() && source.is_enabled() {
            pending.extend(states);
        } else if !states.is_empty() {
            log::trace!("Discarding {} states from inactive source", states.len());
        }
    }
    pending
}

/// In-memory source fed by the caller. Used for replay and tests.
#[derive(Debug)]
pub struct QueuedSource {
    queue: VecDeque<InputState>,
    active: bool,
    enabled: bool,
}

impl Default for QueuedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl QueuedSource {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            active: true,
            enabled: true,
        }
    }

    pub fn push(&mut self, state: InputState) {
        self.queue.push_back(state);
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl InputSource for QueuedSource {
    fn is_active(&self) -> bool {
        self.active
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn take_pending_states(&mut self) -> Vec<InputState> {
        self.queue.drain(..).collect()
    }
}
