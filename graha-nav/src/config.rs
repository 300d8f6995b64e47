//! Configuration loading for GrahaNav

use crate::error::{NavError, Result};
use graha_map::ArbiterConfig;
use serde::Deserialize;
use std::path::Path;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "graha.toml";

/// Main configuration structure
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NavConfig {
    #[serde(default)]
    pub arbiter: ArbiterConfig,
    #[serde(default)]
    pub mission: MissionConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Mission settings
#[derive(Clone, Debug, Deserialize)]
pub struct MissionConfig {
    /// Planet description driven by the simulated mothership (default: planets/robolab.toml)
    #[serde(default = "default_planet_file")]
    pub planet_file: String,

    /// Drive limit before the mission is abandoned (default: 500)
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

/// Simulated mothership settings
#[derive(Clone, Debug, Deserialize)]
pub struct SimulationConfig {
    /// Delay before the mothership answers a message, in milliseconds (default: 20)
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

/// Output configuration
#[derive(Clone, Debug, Deserialize)]
pub struct OutputConfig {
    /// Path to save the discovered planet (default: output/discovered.toml)
    #[serde(default = "default_planet_path")]
    pub planet_path: String,
}

// Default value functions
fn default_planet_file() -> String {
    "planets/robolab.toml".to_string()
}
fn default_max_steps() -> usize {
    500
}
fn default_latency_ms() -> u64 {
    20
}
fn default_planet_path() -> String {
    "output/discovered.toml".to_string()
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            planet_file: default_planet_file(),
            max_steps: default_max_steps(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            planet_path: default_planet_path(),
        }
    }
}

impl NavConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            NavError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        let config: NavConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration from `path`, else `graha.toml` in `dir`, else defaults.
    pub fn resolve(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            tracing::info!("Loading configuration from {:?}", path);
            return Self::load(path);
        }

        let fallback = dir.join(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            tracing::info!("Loading configuration from {:?}", fallback);
            Self::load(&fallback)
        } else {
            tracing::info!("Using default configuration");
            Ok(Self::default())
        }
    }

    /// Reject settings the mission cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.arbiter.group_id.is_empty() {
            return Err(NavError::Config("arbiter.group_id is empty".to_string()));
        }
        if self.mission.max_steps == 0 {
            return Err(NavError::Config("mission.max_steps must be positive".to_string()));
        }
        if self.arbiter.reply_timeout_ms == 0 {
            return Err(NavError::Config(
                "arbiter.reply_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
