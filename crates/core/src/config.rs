//! Engine configuration
//!
//! Hosts build an [`EngineConfig`] directly with the builder methods or load
//! one from TOML:
//!
//! ```toml
//! load_prelude = true
//! max_depth = 500
//! ```
//!
//! Missing keys take their defaults; unknown keys are rejected so typos do
//! not pass silently.

use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Default limit on nested quotation evaluation
pub const DEFAULT_MAX_DEPTH: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Load the embedded prelude when a session starts
    pub load_prelude: bool,

    /// Maximum nesting of user words and combinator bodies.
    ///
    /// Exceeding it fails with `RecursionLimit` instead of overflowing the
    /// native stack on runaway recursion.
    pub max_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            load_prelude: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prelude(mut self, load_prelude: bool) -> Self {
        self.load_prelude = load_prelude;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(toml_str).map_err(ConfigError::Parse)?;
        if config.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    /// Read and parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_toml(&content)
    }
}

/// Error loading an [`EngineConfig`]
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read
    Io(std::io::Error),
    /// The TOML was malformed or had unknown keys
    Parse(toml::de::Error),
    /// The values parsed but make no sense
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}
