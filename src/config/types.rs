//! Configuration type definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Keyboard timing.
///
/// Controls how held keys repeat. Modifier keys never repeat regardless of
/// these values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeyboardConfig {
    /// Delay before a held key repeats for the first time, in milliseconds
    /// (valid range: 0 - 5000)
    #[serde(default = "default_repeat_initial_delay")]
    pub repeat_initial_delay_ms: u64,

    /// Interval between subsequent repeats, in milliseconds (valid range: 1 - 1000)
    #[serde(default = "default_repeat_tick_rate")]
    pub repeat_tick_rate_ms: u64,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            repeat_initial_delay_ms: default_repeat_initial_delay(),
            repeat_tick_rate_ms: default_repeat_tick_rate(),
        }
    }
}

/// Mouse gesture thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MouseConfig {
    /// Maximum time between two primary presses that still counts as a double
    /// click, in milliseconds (valid range: 0 - 2000)
    #[serde(default = "default_double_click_time")]
    pub double_click_time_ms: u64,

    /// Cursor travel from the press position that starts a drag
    /// (valid range: 0.0 - 100.0)
    #[serde(default = "default_drag_start_distance")]
    pub drag_start_distance: f64,

    /// Cursor travel after which releasing a drag no longer clicks
    /// (must be at least `drag_start_distance`, at most 1000.0)
    #[serde(default = "default_click_drag_distance")]
    pub click_drag_distance: f64,
}

impl Default for MouseConfig {
    fn default() -> Self {
        Self {
            double_click_time_ms: default_double_click_time(),
            drag_start_distance: default_drag_start_distance(),
            click_drag_distance: default_click_drag_distance(),
        }
    }
}

fn default_repeat_initial_delay() -> u64 {
    250
}

fn default_repeat_tick_rate() -> u64 {
    70
}

fn default_double_click_time() -> u64 {
    250
}

fn default_drag_start_distance() -> f64 {
    0.0
}

fn default_click_drag_distance() -> f64 {
    40.0
}
