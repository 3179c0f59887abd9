//! Handler that records every callback it receives.

use crate::input::events::{KeyDownArgs, KeyUpArgs, MouseButton, MouseDownArgs, MouseUpArgs};
use crate::scene::{EventContext, InputHandler};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// Kinds of notification a node can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Hover,
    HoverLost,
    MouseDown,
    MouseUp,
    MouseMove,
    Click,
    DoubleClick,
    DragStart,
    Drag,
    DragEnd,
    Wheel,
    KeyDown,
    KeyUp,
    Focus,
    FocusLost,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Hover => "hover",
            EventKind::HoverLost => "hover_lost",
            EventKind::MouseDown => "mouse_down",
            EventKind::MouseUp => "mouse_up",
            EventKind::MouseMove => "mouse_move",
            EventKind::Click => "click",
            EventKind::DoubleClick => "double_click",
            EventKind::DragStart => "drag_start",
            EventKind::Drag => "drag",
            EventKind::DragEnd => "drag_end",
            EventKind::Wheel => "wheel",
            EventKind::KeyDown => "key_down",
            EventKind::KeyUp => "key_up",
            EventKind::Focus => "focus",
            EventKind::FocusLost => "focus_lost",
        };
        f.write_str(name)
    }
}

/// One delivered notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dispatched {
    /// Index of the frame during which the event was delivered
    pub frame: usize,
    pub node: String,
    pub event: EventKind,
    /// Button or key involved, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// What the handler returned; always false for notifications without a result
    pub handled: bool,
}

impl fmt::Display for Dispatched {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} {}", self.frame, self.node, self.event)?;
        if let Some(detail) = &self.detail {
            write!(f, " {detail}")?;
        }
        if self.handled {
            f.write_str(" (handled)")?;
        }
        Ok(())
    }
}

/// Shared, append-only list of dispatched events.
///
/// Cloning yields another handle onto the same log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Rc<RefCell<Vec<Dispatched>>>,
    frame: Rc<Cell<usize>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the frame index stamped on subsequent entries.
    pub fn set_frame(&self, frame: usize) {
        self.frame.set(frame);
    }

    fn record(&self, node: &str, event: EventKind, detail: Option<String>, handled: bool) {
        self.entries.borrow_mut().push(Dispatched {
            frame: self.frame.get(),
            node: node.to_string(),
            event,
            detail,
            handled,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Copy of every entry recorded so far.
    pub fn entries(&self) -> Vec<Dispatched> {
        self.entries.borrow().clone()
    }
}

/// Static answers a recording node gives to the router.
#[derive(Debug, Clone, Default)]
pub struct Behavior {
    /// Events this node reports as handled
    pub handles: HashSet<EventKind>,
    pub accepts_focus: bool,
    pub requests_focus: bool,
    pub high_frequency: bool,
}

/// Scene node handler that logs every callback under its name.
pub struct RecordingHandler {
    name: String,
    behavior: Behavior,
    log: EventLog,
}

impl RecordingHandler {
    pub fn new(name: impl Into<String>, behavior: Behavior, log: EventLog) -> Self {
        Self {
            name: name.into(),
            behavior,
            log,
        }
    }

    fn record(&self, event: EventKind, detail: Option<String>) -> bool {
        let handled = self.behavior.handles.contains(&event);
        self.log.record(&self.name, event, detail, handled);
        handled
    }
}

fn button_name(button: MouseButton) -> String {
    format!("{button:?}").to_lowercase()
}

impl InputHandler for RecordingHandler {
    fn on_hover(&mut self, _cx: &mut EventContext<'_>) -> bool {
        self.record(EventKind::Hover, None)
    }

    fn on_hover_lost(&mut self, _cx: &mut EventContext<'_>) {
        self.log.record(&self.name, EventKind::HoverLost, None, false);
    }

    fn on_mouse_down(&mut self, _cx: &mut EventContext<'_>, args: MouseDownArgs) -> bool {
        self.record(EventKind::MouseDown, Some(button_name(args.button)))
    }

    fn on_mouse_up(&mut self, _cx: &mut EventContext<'_>, args: MouseUpArgs) -> bool {
        self.record(EventKind::MouseUp, Some(button_name(args.button)))
    }

    fn on_mouse_move(&mut self, cx: &mut EventContext<'_>) -> bool {
        let position = cx.mouse().map(|m| m.position.to_string());
        self.record(EventKind::MouseMove, position)
    }

    fn on_click(&mut self, _cx: &mut EventContext<'_>) -> bool {
        self.record(EventKind::Click, None)
    }

    fn on_double_click(&mut self, _cx: &mut EventContext<'_>) -> bool {
        self.record(EventKind::DoubleClick, None)
    }

    fn on_drag_start(&mut self, _cx: &mut EventContext<'_>) -> bool {
        self.record(EventKind::DragStart, None)
    }

    fn on_drag(&mut self, cx: &mut EventContext<'_>) -> bool {
        let delta = cx.mouse().and_then(|m| m.delta()).map(|d| d.to_string());
        self.record(EventKind::Drag, delta)
    }

    fn on_drag_end(&mut self, _cx: &mut EventContext<'_>) -> bool {
        self.record(EventKind::DragEnd, None)
    }

    fn on_wheel(&mut self, cx: &mut EventContext<'_>) -> bool {
        let delta = cx.mouse().map(|m| m.wheel_delta.to_string());
        self.record(EventKind::Wheel, delta)
    }

    fn on_key_down(&mut self, _cx: &mut EventContext<'_>, args: KeyDownArgs) -> bool {
        let detail = if args.repeat {
            format!("{} (repeat)", args.key)
        } else {
            args.key.to_string()
        };
        self.record(EventKind::KeyDown, Some(detail))
    }

    fn on_key_up(&mut self, _cx: &mut EventContext<'_>, args: KeyUpArgs) -> bool {
        self.record(EventKind::KeyUp, Some(args.key.to_string()))
    }

    fn on_focus(&mut self, _cx: &mut EventContext<'_>) {
        self.log.record(&self.name, EventKind::Focus, None, false);
    }

    fn on_focus_lost(&mut self, _cx: &mut EventContext<'_>) {
        self.log.record(&self.name, EventKind::FocusLost, None, false);
    }

    fn accepts_focus(&self) -> bool {
        self.behavior.accepts_focus
    }

    fn requests_focus(&self) -> bool {
        self.behavior.requests_focus
    }

    fn requires_high_frequency_mouse_position(&self) -> bool {
        self.behavior.high_frequency
    }
}
