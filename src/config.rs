//! Engine configuration: the interaction distances of the routing and
//! gesture layers
//!
//! Hosts can tune these in code through the builder methods, or load them
//! from a TOML fragment alongside whatever theming files they already ship.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Tunable distances of the engine, all in document units
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Clearance a routed path extends perpendicular from a junction before
    /// its first turn
    pub standoff: f64,

    /// Minimum axis delta before a drafting path gets its L-bend; smaller
    /// drags stay a single segment
    pub bend_epsilon: f64,

    /// Maximum displacement between pointer-down and pointer-up for a draft
    /// to be discarded as an accidental click
    pub click_slop: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            standoff: 20.0,
            bend_epsilon: 8.0,
            click_slop: 30.0,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the junction standoff distance
    pub fn with_standoff(mut self, standoff: f64) -> Self {
        self.standoff = standoff;
        self
    }

    /// Set the drafting bend epsilon
    pub fn with_bend_epsilon(mut self, bend_epsilon: f64) -> Self {
        self.bend_epsilon = bend_epsilon;
        self
    }

    /// Set the accidental-click slop radius
    pub fn with_click_slop(mut self, click_slop: f64) -> Self {
        self.click_slop = click_slop;
        self
    }

    /// Parse a configuration from TOML source; missing keys keep their
    /// defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load a configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.standoff, 20.0);
        assert_eq!(config.bend_epsilon, 8.0);
        assert_eq!(config.click_slop, 30.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::new().with_standoff(32.0).with_click_slop(12.0);
        assert_eq!(config.standoff, 32.0);
        assert_eq!(config.click_slop, 12.0);
        assert_eq!(config.bend_epsilon, 8.0);
    }

    #[test]
    fn test_from_toml_partial_keys() {
        let config = EngineConfig::from_toml_str("standoff = 10.0").unwrap();
        assert_eq!(config.standoff, 10.0);
        assert_eq!(config.bend_epsilon, 8.0);
        assert_eq!(config.click_slop, 30.0);
    }

    #[test]
    fn test_from_toml_rejects_bad_source() {
        assert!(matches!(
            EngineConfig::from_toml_str("standoff = \"wide\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
