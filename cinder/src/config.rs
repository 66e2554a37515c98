//! Driver configuration, read from `cinder_config.json5`.

use std::fs;
use std::path::Path;

use anyhow::Context;
use cinder_core::{ConfigError, PackedEntry, PhysicsConfig};
use cinder_utils::Dimensions;
use serde::Deserialize;

const DEFAULT_CONFIG: &str = include_str!("../../package-content/cinder_config.json5");

/// Settings for the simulation driver.
#[derive(Debug, Clone, Deserialize)]
pub struct CinderConfig {
    /// Physics ticks per second.
    pub tick_rate: u32,
    /// Stop after this many ticks. Runs until interrupted when absent.
    #[serde(default)]
    pub max_ticks: Option<u64>,
    /// Extents of the generated demo world.
    pub world: Dimensions,
    /// Seed for the demo world layout.
    #[serde(default)]
    pub world_seed: u64,
    /// Settings handed to the physics engine.
    #[serde(default)]
    pub physics: PhysicsConfig,
}

impl CinderConfig {
    /// Reads the config at `path`, writing the bundled default there first if
    /// it does not exist yet.
    pub fn load_or_create(path: &Path) -> anyhow::Result<Self> {
        let text = if path.exists() {
            fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            fs::write(path, DEFAULT_CONFIG)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("Wrote default config to {}", path.display());
            DEFAULT_CONFIG.to_owned()
        };

        let config =
            Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Parses and validates a JSON5 document.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json5::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=1000).contains(&self.tick_rate) {
            return Err(ConfigError::Invalid("Tick rate must be in range 1..=1000"));
        }
        if self.world.is_empty() {
            return Err(ConfigError::Invalid("World dimensions must be non-zero"));
        }
        let cells = self
            .world
            .width
            .checked_mul(self.world.height)
            .and_then(|area| area.checked_mul(self.world.length));
        if cells.is_none_or(|cells| cells > PackedEntry::POS_MASK as usize + 1) {
            return Err(ConfigError::Invalid(
                "World must have at most 134217728 cells",
            ));
        }
        Ok(())
    }
}
