//! Configuration parsing and validation for switchyard.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::router::{RouteKind, DEFAULT_LONG_CONTEXT_THRESHOLD};

/// Root configuration structure. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub router: RouterConfig,
    /// Model overrides keyed by route kind (e.g. `code = "..."`).
    #[serde(default)]
    pub models: BTreeMap<RouteKind, String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Router tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct RouterConfig {
    /// Context sizes strictly greater than this force the long-context model
    #[serde(default = "default_long_context_threshold")]
    pub long_context_threshold: i64,
}

fn default_long_context_threshold() -> i64 {
    DEFAULT_LONG_CONTEXT_THRESHOLD
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            long_context_threshold: default_long_context_threshold(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level, used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Thresholds above this are almost certainly a typo.
const SUSPICIOUS_THRESHOLD: i64 = 1_000;

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            source: e,
        })?;

        Self::parse_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading configuration");
                Ok(Self::from_file(path)?)
            }
            None => Ok(Self::default()),
        }
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.router.long_context_threshold;
        if threshold < 0 {
            return Err(ConfigError::Validation(format!(
                "long_context_threshold must be non-negative, got {}",
                threshold
            )));
        }
        if threshold > SUSPICIOUS_THRESHOLD {
            tracing::warn!(
                threshold,
                "Very high long_context_threshold - long-context routing will rarely trigger"
            );
        }

        for (kind, model) in &self.models {
            if model.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "Model override for '{}' is empty",
                    kind
                )));
            }
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}
