//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/narytree/narytree.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `NARYTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::traversal::Order;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config error: {message}")]
    Config { message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

fn config_err(e: impl std::fmt::Display) -> ConfigError {
    ConfigError::Config {
        message: e.to_string(),
    }
}

/// Settings for reading and presenting trees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Spaces per outline level (default: 2)
    pub indent_width: usize,
    /// Traversal order used by `walk` when none is given (default: breadth)
    pub order: Order,
    /// Colored terminal output (default: true)
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            indent_width: 2,
            order: Order::BreadthFirst,
            color: true,
        }
    }
}

/// Raw settings for intermediate parsing (fields are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub indent_width: Option<usize>,
    pub order: Option<Order>,
    pub color: Option<bool>,
}

/// Get the XDG config directory for narytree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "narytree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("narytree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> ConfigResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            indent_width: overlay.indent_width.unwrap_or(self.indent_width),
            order: overlay.order.unwrap_or(self.order),
            color: overlay.color.unwrap_or(self.color),
        }
    }

    /// Load settings with layered precedence from the standard locations.
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        Self::load_from(global_config_path().as_deref(), explicit)
    }

    /// Load settings from the given global and explicit files plus the
    /// process environment.
    ///
    /// A missing global file is skipped; a missing explicit file is an error.
    #[instrument(level = "debug")]
    pub fn load_from(global: Option<&Path>, explicit: Option<&Path>) -> ConfigResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        if let Some(path) = explicit {
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = current.apply_env_overrides(Self::environment())?;

        debug!(?current, "loaded settings");
        Ok(current)
    }

    fn environment() -> Environment {
        Environment::with_prefix("NARYTREE")
            .prefix_separator("_")
            .separator("__")
    }

    /// Apply NARYTREE_* environment variables as explicit overrides.
    pub(crate) fn apply_env_overrides(mut self, env: Environment) -> ConfigResult<Self> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_int("indent_width") {
            self.indent_width = usize::try_from(val).map_err(|_| ConfigError::Config {
                message: format!("indent_width must not be negative: {val}"),
            })?;
        }
        if let Ok(val) = config.get_string("order") {
            self.order = val.parse().map_err(|message| ConfigError::Config { message })?;
        }
        if let Ok(val) = config.get_bool("color") {
            self.color = val;
        }

        Ok(self)
    }

    /// Render as TOML, e.g. for `narytree config`.
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(config_err)
    }
}
