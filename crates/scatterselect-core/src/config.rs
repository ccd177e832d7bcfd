//! Selector configuration, stored as JSON.

use crate::style::SelectionStyle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// What a release does when no drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleasePolicy {
    /// A release without a matching press is ignored.
    #[default]
    IgnoreWhenIdle,
    /// A release without a matching press reports the last box again.
    ReplayLastBox,
}

/// Everything a [`RectangleSelector`](crate::selector::RectangleSelector) can be configured with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Indicator style.
    pub style: SelectionStyle,
    /// Handling of a release while idle.
    pub release_policy: ReleasePolicy,
    /// Finish an active drag when the host reports the pointer was lost.
    pub end_on_abandon: bool,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            style: SelectionStyle::default(),
            release_policy: ReleasePolicy::default(),
            end_on_abandon: true,
        }
    }
}

impl SelectorConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            ConfigError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded selector config from {}", path.display());
        Ok(config)
    }

    /// Write the configuration to a file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let json = self.to_json()?;
        fs::write(path, json)
            .map_err(|e| ConfigError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }

    /// Check the configuration for out-of-range values.
    pub fn validate(&self) -> ConfigResult<()> {
        self.style.validate().map_err(ConfigError::Invalid)
    }
}
