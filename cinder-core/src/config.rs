//! Physics settings, read once when the orchestrator is built.

use cinder_utils::random::{RandomKind, RandomSource};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The text is not valid JSON5 or does not match the schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json5::Error),
    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// Settings for [`Physics`](crate::physics::Physics).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Whether physics runs from the first tick.
    pub enabled: bool,
    /// Seed for the random ticker. Drawn from entropy when absent.
    pub seed: Option<u64>,
    /// Which generator backs the random ticker.
    pub random: RandomKind,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            seed: None,
            random: RandomKind::default(),
        }
    }
}

impl PhysicsConfig {
    /// Parses a JSON5 document. Missing keys take their defaults.
    pub fn from_json5(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json5::from_str(text)?)
    }

    /// Builds the configured random source.
    #[must_use]
    pub fn random_source(&self) -> RandomSource {
        match self.seed {
            Some(seed) => self.random.with_seed(seed),
            None => self.random.from_entropy(),
        }
    }
}
