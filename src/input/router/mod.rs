//! Per-frame input routing.
//!
//! `InputRouter::update` runs once per tick. It expands the tick's raw device
//! snapshots into single-transition states and, for each of them, rebuilds the
//! dispatch queues, recomputes hover, then delivers mouse and keyboard events.
//! Focus, hover and drag flags on scene nodes are written only from here.

mod dispatch;
mod focus;
mod hover;
mod keyboard;
mod pointer;
mod queue;

use self::dispatch::Dispatcher;
use self::focus::FocusController;
use self::hover::HoverTracker;
use self::keyboard::KeyRepeat;
use self::pointer::PointerTracker;
use self::queue::InputQueues;
use super::error::InputError;
use super::expand::expand_states;
use super::source::{InputSource, collect_pending_states};
use super::state::{InputState, KeyboardState, MouseState};
use crate::config::Config;
use crate::scene::{NodeId, Scene};
use log::trace;

/// Runtime timing and distance thresholds.
///
/// Times are in milliseconds, distances in screen units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouterSettings {
    /// Delay between a key press and its first repeat
    pub repeat_initial_delay: f64,
    /// Delay between subsequent repeats
    pub repeat_tick_rate: f64,
    /// Maximum gap between two primary presses forming a double click
    pub double_click_time: f64,
    /// Cursor travel from the press position that starts a drag
    pub drag_start_distance: f64,
    /// Cursor travel after which a drag no longer counts as a click
    pub click_drag_distance: f64,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            repeat_initial_delay: 250.0,
            repeat_tick_rate: 70.0,
            double_click_time: 250.0,
            drag_start_distance: 0.0,
            click_drag_distance: 40.0,
        }
    }
}

impl From<&Config> for RouterSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            repeat_initial_delay: cfg.keyboard.repeat_initial_delay_ms as f64,
            repeat_tick_rate: cfg.keyboard.repeat_tick_rate_ms as f64,
            double_click_time: cfg.mouse.double_click_time_ms as f64,
            drag_start_distance: cfg.mouse.drag_start_distance,
            click_drag_distance: cfg.mouse.click_drag_distance,
        }
    }
}

type StateTransform = Box<dyn FnMut(&mut InputState, &InputState)>;

/// Routes reconciled device state to scene nodes, one tick at a time.
pub struct InputRouter {
    settings: RouterSettings,
    current: InputState,
    queues: InputQueues,
    hover: HoverTracker,
    pointer: PointerTracker,
    key_repeat: KeyRepeat,
    focus: FocusController,
    transform: Option<StateTransform>,
    /// Milliseconds since the router was created
    clock: f64,
    last_action_time: f64,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new(RouterSettings::default())
    }
}

impl InputRouter {
    pub fn new(settings: RouterSettings) -> Self {
        Self {
            settings,
            current: InputState::new()
                .with_mouse(MouseState::default())
                .with_keyboard(KeyboardState::new()),
            queues: InputQueues::default(),
            hover: HoverTracker::default(),
            pointer: PointerTracker::default(),
            key_repeat: KeyRepeat::default(),
            focus: FocusController::default(),
            transform: None,
            clock: 0.0,
            last_action_time: 0.0,
        }
    }

    pub fn settings(&self) -> &RouterSettings {
        &self.settings
    }

    /// Installs a hook that may correct every state (e.g. for display scaling)
    /// before it is routed.
    ///
    /// The hook sees only the device data the state brought; the second
    /// argument is the previous complete state, for sub-states that will be
    /// carried forward unchanged.
    pub fn set_state_transform(
        &mut self,
        transform: impl FnMut(&mut InputState, &InputState) + 'static,
    ) {
        self.transform = Some(Box::new(transform));
    }

    /// Runs one tick with the snapshots gathered from `sources`.
    pub fn update_from_sources(
        &mut self,
        scene: &mut Scene,
        sources: &mut [Box<dyn InputSource>],
        elapsed_ms: f64,
    ) -> Result<(), InputError> {
        let pending = collect_pending_states(sources);
        self.update(scene, pending, elapsed_ms)
    }

    /// Runs one tick.
    ///
    /// `pending` holds the raw snapshots produced since the previous tick, in
    /// order; `elapsed_ms` is the frame time.
    pub fn update(
        &mut self,
        scene: &mut Scene,
        pending: Vec<InputState>,
        elapsed_ms: f64,
    ) -> Result<(), InputError> {
        self.clock += elapsed_ms;

        let mut states = expand_states(&self.current, pending);
        // Hover and key repeat must run even on frames without new input.
        if states.is_empty() {
            states.push(InputState::new());
        }

        for state in states {
            self.process_state(scene, state)?;
        }

        if self.current.mouse.is_some() {
            let mut d = Dispatcher {
                scene: &mut *scene,
                focus: &mut self.focus,
                state: &mut self.current,
            };
            for &node in &self.queues.mouse {
                if !d.scene.requires_high_frequency_mouse_position(node) {
                    continue;
                }
                if d.trigger(node, |handler, cx| handler.on_mouse_move(cx))? {
                    break;
                }
            }
        }

        self.key_repeat.elapse(elapsed_ms);

        if self.focus.focused().is_none() {
            let requesting = self
                .queues
                .keyboard
                .iter()
                .copied()
                .find(|node| scene.requests_focus(*node));
            if requesting.is_some() {
                self.focus.change_focus(scene, requesting, &self.current)?;
            }
        }

        Ok(())
    }

    fn process_state(&mut self, scene: &mut Scene, mut state: InputState) -> Result<(), InputError> {
        self.focus.unfocus_if_invalid(scene, &self.current)?;

        let has_new_mouse = state.mouse.is_some();
        let has_new_keyboard = state.keyboard.is_some();
        trace!("Processing state (mouse: {has_new_mouse}, keyboard: {has_new_keyboard})");

        // Carried-over sub-states were transformed when they arrived.
        if let Some(transform) = self.transform.as_mut() {
            transform(&mut state, &self.current);
        }

        let previous = std::mem::take(&mut self.current);
        if state.keyboard.is_none() {
            state.keyboard = Some(previous.keyboard.clone().unwrap_or_default());
        }
        if state.mouse.is_none() {
            state.mouse = Some(previous.mouse.clone().unwrap_or_default());
        }
        let previous_mouse = previous.mouse.clone();
        state.set_last(previous);

        self.queues.rebuild(scene, &state);

        if has_new_mouse {
            if let (Some(mouse), Some(last)) = (state.mouse.as_mut(), previous_mouse.as_ref()) {
                mouse.link_last(last);
                if last.has_any_button_pressed() {
                    mouse.position_mouse_down = last.position_mouse_down;
                }
            }
        }

        self.current = state;

        let mut d = Dispatcher {
            scene,
            focus: &mut self.focus,
            state: &mut self.current,
        };

        // Hover may change without mouse movement because the tree can change.
        self.hover.update(&mut d, &self.queues.mouse)?;

        if has_new_mouse {
            self.pointer.update(
                &mut d,
                &self.queues.mouse,
                &self.settings,
                self.clock,
                &mut self.last_action_time,
            )?;
        }

        let any_key_down = d.state.keyboard.as_ref().is_some_and(|k| !k.is_empty());
        if has_new_keyboard || any_key_down {
            self.key_repeat.update(
                &mut d,
                &self.queues.keyboard,
                &self.settings,
                self.clock,
                &mut self.last_action_time,
            )?;
        }

        Ok(())
    }

    /// The most recently processed state.
    pub fn current_state(&self) -> &InputState {
        &self.current
    }

    /// Hovered nodes, front-most first, up to and including the hover handler.
    pub fn hovered_nodes(&self) -> &[NodeId] {
        self.hover.hovered()
    }

    /// The node that consumed hover, if any.
    pub fn hover_handler(&self) -> Option<NodeId> {
        self.hover.handled_by()
    }

    /// Nodes under the cursor, front-most first, regardless of hover handling.
    pub fn mouse_queue(&self) -> &[NodeId] {
        &self.queues.mouse
    }

    pub fn keyboard_queue(&self) -> &[NodeId] {
        &self.queues.keyboard
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focus.focused()
    }

    /// The node currently receiving drag events.
    pub fn dragged(&self) -> Option<NodeId> {
        self.pointer.drag_owner()
    }

    /// Clock time (ms) of the last key press or initial button press.
    pub fn last_action_time(&self) -> f64 {
        self.last_action_time
    }

    /// Milliseconds accumulated over all updates.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Changes the focused node. See [`InputRouter`] docs for the rules.
    ///
    /// Returns `Ok(false)` if `target` is not present or does not accept focus.
    pub fn change_focus(
        &mut self,
        scene: &mut Scene,
        target: Option<NodeId>,
    ) -> Result<bool, InputError> {
        self.focus.change_focus(scene, target, &self.current)
    }

    /// Drops focus (unless the root holds it) so the top-most node requesting
    /// focus claims it on the next update.
    pub fn trigger_focus_contention(&mut self, scene: &mut Scene) -> Result<(), InputError> {
        self.focus.trigger_contention(scene, &self.current)
    }
}
