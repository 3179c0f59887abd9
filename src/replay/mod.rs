//! Scripted input traces.
//!
//! A trace is a TOML document describing a scene and a sequence of frames.
//! Replaying it drives an [`InputRouter`] and records every notification the
//! scene's nodes receive.
//!
//! ```toml
//! [[nodes]]
//! name = "button"
//! bounds = [0.0, 0.0, 100.0, 40.0]
//! handles = ["click"]
//!
//! [[frames]]
//! states = [{ mouse = { x = 10.0, y = 10.0, buttons = ["left"] } }]
//!
//! [[frames]]
//! states = [{ mouse = { x = 10.0, y = 10.0 } }]
//! ```

mod recorder;

pub use recorder::{Behavior, Dispatched, EventKind, EventLog, RecordingHandler};

use crate::input::{
    InputError, InputRouter, InputState, Key, KeyboardState, MouseButton, MouseState,
    RouterSettings,
};
use crate::scene::{NodeId, NodeLayout, Scene, SceneError};
use crate::util::Rect;
use log::{debug, info};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while loading or replaying a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid trace: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("node '{0}' is defined more than once")]
    DuplicateNode(String),

    #[error("unknown node '{0}'")]
    UnknownNode(String),

    #[error("node '{name}' has invalid bounds {bounds:?}")]
    InvalidBounds { name: String, bounds: [f64; 4] },

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("routing failed in frame {frame}: {source}")]
    Routing {
        frame: usize,
        #[source]
        source: InputError,
    },
}

/// A scene plus the frames to play against it.
#[derive(Debug, Clone, Deserialize)]
pub struct Trace {
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub frames: Vec<FrameSpec>,
}

/// One scene node. Nodes must be listed after their parent.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeSpec {
    pub name: String,
    /// Parent node name; the input root when omitted
    #[serde(default)]
    pub parent: Option<String>,
    /// `[x, y, width, height]`
    pub bounds: [f64; 4],
    /// Whether children outside `bounds` are unreachable
    #[serde(default)]
    pub clip: bool,
    #[serde(default = "default_true")]
    pub present: bool,
    #[serde(default)]
    pub accepts_focus: bool,
    #[serde(default)]
    pub requests_focus: bool,
    #[serde(default)]
    pub high_frequency: bool,
    /// Events this node reports as handled
    #[serde(default)]
    pub handles: Vec<EventKind>,
}

/// One router tick.
#[derive(Debug, Clone, Deserialize)]
pub struct FrameSpec {
    #[serde(default = "default_elapsed")]
    pub elapsed_ms: f64,
    /// Scene changes applied before the frame is routed
    #[serde(default)]
    pub mutations: Vec<Mutation>,
    /// Raw device snapshots produced during the frame
    #[serde(default)]
    pub states: Vec<StateSpec>,
}

/// A raw snapshot; omitted devices carry no new data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StateSpec {
    #[serde(default)]
    pub mouse: Option<MouseSpec>,
    /// Every key held at the time of the snapshot
    #[serde(default)]
    pub keys: Option<Vec<Key>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MouseSpec {
    pub x: f64,
    pub y: f64,
    /// Every button held at the time of the snapshot
    #[serde(default)]
    pub buttons: Vec<MouseButton>,
    #[serde(default)]
    pub wheel: f64,
}

/// Scene change applied at the start of a frame.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Mutation {
    Hide { node: String },
    Show { node: String },
    Detach { node: String },
    Kill { node: String },
    Move { node: String, bounds: [f64; 4] },
}

impl Mutation {
    /// Name of the node this mutation targets.
    pub fn node(&self) -> &str {
        match self {
            Mutation::Hide { node }
            | Mutation::Show { node }
            | Mutation::Detach { node }
            | Mutation::Kill { node }
            | Mutation::Move { node, .. } => node,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_elapsed() -> f64 {
    16.0
}

impl FromStr for Trace {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

impl StateSpec {
    pub fn to_state(&self) -> InputState {
        let mut state = InputState::new();
        if let Some(mouse) = &self.mouse {
            let mut snapshot = MouseState::at(mouse.x, mouse.y).with_wheel(mouse.wheel);
            for button in &mouse.buttons {
                snapshot.set_pressed(*button, true);
            }
            state.mouse = Some(snapshot);
        }
        if let Some(keys) = &self.keys {
            state.keyboard = Some(KeyboardState::from_keys(keys.iter().copied()));
        }
        state
    }
}

/// Reads and parses the trace at `path`.
pub fn load(path: &Path) -> Result<Trace, TraceError> {
    let contents = fs::read_to_string(path).map_err(|source| TraceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let trace = contents.parse()?;
    debug!("Loaded trace from {}", path.display());
    Ok(trace)
}

/// Result of replaying a trace.
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    /// Every notification, in delivery order
    pub events: Vec<Dispatched>,
    /// Name of the node holding focus after the last frame
    pub focused: Option<String>,
    /// Names of the hovered nodes after the last frame, front-most first
    pub hovered: Vec<String>,
}

/// Scene built from a trace, with names resolved to node ids.
struct ReplayScene {
    scene: Scene,
    ids: HashMap<String, NodeId>,
    names: HashMap<NodeId, String>,
}

impl ReplayScene {
    fn build(nodes: &[NodeSpec], log: &EventLog) -> Result<Self, TraceError> {
        let mut built = Self {
            scene: Scene::new(),
            ids: HashMap::new(),
            names: HashMap::new(),
        };

        for spec in nodes {
            if built.ids.contains_key(&spec.name) {
                return Err(TraceError::DuplicateNode(spec.name.clone()));
            }
            let parent = match &spec.parent {
                Some(parent) => built.id(parent)?,
                None => built.scene.root(),
            };
            let rect = to_rect(&spec.name, spec.bounds)?;
            let layout = if spec.clip {
                NodeLayout::clipped(rect)
            } else {
                NodeLayout::new(rect)
            };
            let behavior = Behavior {
                handles: spec.handles.iter().copied().collect(),
                accepts_focus: spec.accepts_focus,
                requests_focus: spec.requests_focus,
                high_frequency: spec.high_frequency,
            };
            let handler = RecordingHandler::new(spec.name.clone(), behavior, log.clone());
            let id = built.scene.add(parent, layout, handler)?;
            built.scene.set_present(id, spec.present)?;
            built.ids.insert(spec.name.clone(), id);
            built.names.insert(id, spec.name.clone());
        }

        Ok(built)
    }

    fn id(&self, name: &str) -> Result<NodeId, TraceError> {
        self.ids
            .get(name)
            .copied()
            .ok_or_else(|| TraceError::UnknownNode(name.to_string()))
    }

    fn name(&self, id: NodeId) -> Option<String> {
        self.names.get(&id).cloned()
    }

    fn apply(&mut self, mutation: &Mutation) -> Result<(), TraceError> {
        debug!("Applying {mutation:?}");
        let id = self.id(mutation.node())?;
        match mutation {
            Mutation::Hide { .. } => self.scene.set_present(id, false)?,
            Mutation::Show { .. } => self.scene.set_present(id, true)?,
            Mutation::Detach { .. } => self.scene.detach(id)?,
            Mutation::Kill { .. } => self.scene.set_alive(id, false)?,
            Mutation::Move { node, bounds } => self.scene.set_bounds(id, to_rect(node, *bounds)?)?,
        }
        Ok(())
    }
}

fn to_rect(name: &str, bounds: [f64; 4]) -> Result<Rect, TraceError> {
    Rect::new(bounds[0], bounds[1], bounds[2], bounds[3]).ok_or_else(|| {
        TraceError::InvalidBounds {
            name: name.to_string(),
            bounds,
        }
    })
}

/// Replays `trace` against a fresh router.
pub fn run(trace: &Trace, settings: RouterSettings) -> Result<ReplayOutcome, TraceError> {
    let log = EventLog::new();
    let mut replay = ReplayScene::build(&trace.nodes, &log)?;
    let mut router = InputRouter::new(settings);

    for (frame, spec) in trace.frames.iter().enumerate() {
        log.set_frame(frame);
        for mutation in &spec.mutations {
            replay.apply(mutation)?;
        }
        let pending = spec.states.iter().map(StateSpec::to_state).collect();
        router
            .update(&mut replay.scene, pending, spec.elapsed_ms)
            .map_err(|source| TraceError::Routing { frame, source })?;
    }

    info!(
        "Replayed {} frames, {} events dispatched",
        trace.frames.len(),
        log.len()
    );

    Ok(ReplayOutcome {
        events: log.entries(),
        focused: router.focused().and_then(|id| replay.name(id)),
        hovered: router
            .hovered_nodes()
            .iter()
            .filter_map(|id| replay.name(*id))
            .collect(),
    })
}
