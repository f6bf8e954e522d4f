use lexicon_search::{DEFAULT_MAX_DISTANCE, MatcherConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Repository configuration, persisted as config.toml.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub matcher: MatcherConfig,
}

impl RepositoryConfig {
    /// Loads config from a TOML file. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates config values and returns list of validation errors.
    /// Returns empty vec if config is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.matcher.max_distance == 0 {
            errors.push("max_distance must be at least 1".to_string());
        }

        errors
    }

    /// Returns a validated config, replacing invalid values with defaults.
    pub fn with_defaults_for_invalid(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            matcher: MatcherConfig {
                max_distance: if self.matcher.max_distance == 0 {
                    DEFAULT_MAX_DISTANCE
                } else {
                    self.matcher.max_distance
                },
                normalize: self.matcher.normalize,
            },
        }
    }
}

/// Capability settings for repositories built from this config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(default = "default_true")]
    pub can_query: bool,
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self { can_query: true }
    }
}

fn default_true() -> bool {
    true
}

/// Errors that can occur when loading or saving config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
