//! Configuration file support.
//!
//! Settings are read from `$SCENE_INPUT_CONFIG` when set, otherwise from
//! `~/.config/scene-input/config.toml`. A missing file means defaults.

pub mod types;

pub use types::{KeyboardConfig, MouseConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "SCENE_INPUT_CONFIG";

/// Root configuration.
///
/// # Example TOML
/// ```toml
/// [keyboard]
/// repeat_initial_delay_ms = 250
/// repeat_tick_rate_ms = 70
///
/// [mouse]
/// double_click_time_ms = 250
/// drag_start_distance = 0.0
/// click_drag_distance = 40.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Key repeat timing
    #[serde(default)]
    pub keyboard: KeyboardConfig,

    /// Click, double-click and drag thresholds
    #[serde(default)]
    pub mouse: MouseConfig,
}

impl Config {
    /// Clamps every value to its valid range, logging a warning per change.
    ///
    /// Validated ranges:
    /// - `repeat_initial_delay_ms`: 0 - 5000
    /// - `repeat_tick_rate_ms`: 1 - 1000
    /// - `double_click_time_ms`: 0 - 2000
    /// - `drag_start_distance`: 0.0 - 100.0
    /// - `click_drag_distance`: `drag_start_distance` - 1000.0
    pub fn validate_and_clamp(&mut self) {
        if self.keyboard.repeat_initial_delay_ms > 5000 {
            log::warn!(
                "Invalid repeat_initial_delay_ms {}, clamping to 0-5000 range",
                self.keyboard.repeat_initial_delay_ms
            );
            self.keyboard.repeat_initial_delay_ms = 5000;
        }

        // A zero tick rate would repeat on every frame.
        if !(1..=1000).contains(&self.keyboard.repeat_tick_rate_ms) {
            log::warn!(
                "Invalid repeat_tick_rate_ms {}, clamping to 1-1000 range",
                self.keyboard.repeat_tick_rate_ms
            );
            self.keyboard.repeat_tick_rate_ms = self.keyboard.repeat_tick_rate_ms.clamp(1, 1000);
        }

        if self.mouse.double_click_time_ms > 2000 {
            log::warn!(
                "Invalid double_click_time_ms {}, clamping to 0-2000 range",
                self.mouse.double_click_time_ms
            );
            self.mouse.double_click_time_ms = 2000;
        }

        if !(0.0..=100.0).contains(&self.mouse.drag_start_distance) {
            log::warn!(
                "Invalid drag_start_distance {:.1}, clamping to 0.0-100.0 range",
                self.mouse.drag_start_distance
            );
            self.mouse.drag_start_distance = if self.mouse.drag_start_distance.is_nan() {
                MouseConfig::default().drag_start_distance
            } else {
                self.mouse.drag_start_distance.clamp(0.0, 100.0)
            };
        }

        let min_click_drag = self.mouse.drag_start_distance;
        if !(min_click_drag..=1000.0).contains(&self.mouse.click_drag_distance) {
            log::warn!(
                "Invalid click_drag_distance {:.1}, clamping to {:.1}-1000.0 range",
                self.mouse.click_drag_distance,
                min_click_drag
            );
            self.mouse.click_drag_distance = if self.mouse.click_drag_distance.is_nan() {
                MouseConfig::default().click_drag_distance.max(min_click_drag)
            } else {
                self.mouse.click_drag_distance.clamp(min_click_drag, 1000.0)
            };
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// `$SCENE_INPUT_CONFIG` wins over `~/.config/scene-input/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("scene-input");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if
    /// the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates the configuration at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Writes the configuration to the default location, creating the parent
    /// directory if needed.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the config cannot
    /// be serialized, or the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    /// Writes the configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, config_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Creates a configuration file holding the defaults.
    ///
    /// # Errors
    /// Returns an error if a config file already exists at the target path or
    /// it cannot be written.
    pub fn create_default_file() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        Self::default().save_to(&config_path)?;

        info!("Created default config at {}", config_path.display());
        Ok(config_path)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests;
