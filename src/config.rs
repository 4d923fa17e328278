//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the swell-config.toml
//! file. It covers the scoring engine knobs, ephemeris cache sizing, the scheduler
//! loop and optional spot profile overrides.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::current::DEFAULT_MAX_AGE_MINUTES;
use crate::ephemeris::DEFAULT_CACHE_CAPACITY;
use crate::spots::{SpotError, SpotProfile, SpotRegistry};

/// Default configuration file name, relative to the working directory.
pub const CONFIG_FILE: &str = "swell-config.toml";

/// Errors from reading or writing the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config IO: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config serialization: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Application configuration loaded from swell-config.toml
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub ephemeris: EphemerisConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Extra or overriding spot profiles merged over the built-in registry
    #[serde(default)]
    pub spots: Vec<SpotProfile>,
}

/// Scoring and detection settings
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Oldest reading still considered "current"
    pub current_max_age_minutes: i64,
    /// Largest spacing between readings that still forms one swell window
    pub window_max_gap_minutes: i64,
}

/// Ephemeris cache settings
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct EphemerisConfig {
    /// Entries kept per cache before the oldest is evicted
    pub cache_capacity: usize,
    /// Decimal places of lat/lng kept in cache keys
    pub coordinate_precision: u32,
}

/// Alert loop settings
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Minutes between alert cycles
    pub interval_minutes: u64,
    /// JSON snapshot holding readings, subscriptions and the send log
    pub snapshot_path: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            current_max_age_minutes: DEFAULT_MAX_AGE_MINUTES,
            window_max_gap_minutes: 60,
        }
    }
}

impl Default for EphemerisConfig {
    fn default() -> Self {
        EphemerisConfig {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            coordinate_precision: 2,
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            interval_minutes: 60,
            snapshot_path: "swell-snapshot.json".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn current_max_age(&self) -> Duration {
        Duration::minutes(self.current_max_age_minutes)
    }

    pub fn window_max_gap(&self) -> Duration {
        Duration::minutes(self.window_max_gap_minutes)
    }
}

impl Config {
    /// Load configuration from swell-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load_from_path(&path) {
            Ok(config) => {
                info!(
                    path = %path.as_ref().display(),
                    spots = config.spots.len(),
                    "loaded configuration"
                );
                config
            }
            Err(ConfigError::Io(_)) => {
                info!(path = %path.as_ref().display(), "no config file found, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(path = %path.as_ref().display(), error = %e, "invalid config file, using defaults");
                Self::default()
            }
        }
    }

    /// Load configuration, surfacing IO and parse errors
    pub fn try_load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str::<Config>(&contents)?)
    }

    /// Save current configuration to the given path
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        info!(path = %path.as_ref().display(), "configuration saved");
        Ok(())
    }

    /// Built-in spot registry with this configuration's profiles merged in
    pub fn spot_registry(&self) -> Result<SpotRegistry, SpotError> {
        let mut registry = SpotRegistry::with_builtin();
        registry.merge(self.spots.iter().cloned())?;
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.engine.current_max_age_minutes, 60);
        assert_eq!(config.engine.window_max_gap(), Duration::hours(1));
        assert_eq!(config.ephemeris.cache_capacity, 256);
        assert_eq!(config.scheduler.interval_minutes, 60);
        assert!(config.spots.is_empty());
    }

    #[test]
    fn test_config_roundtrip() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.engine.window_max_gap_minutes = 180;
        config.save(file.path()).unwrap();

        let parsed = Config::try_load_from_path(file.path()).unwrap();
        assert_eq!(parsed.engine.window_max_gap(), Duration::hours(3));
        assert_eq!(parsed.scheduler.snapshot_path, config.scheduler.snapshot_path);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let file = NamedTempFile::new().unwrap();
        fs::write(
            file.path(),
            r#"
[engine]
current_max_age_minutes = 90

[[spots]]
id = "trestles"
name = "Lower Trestles"
latitude = 33.382
longitude = -117.589
ideal_direction_deg = 200.0
direction_tolerance_deg = 25.0
tide_min_ft = 1.0
tide_max_ft = 4.0
min_period_s = 9.0
amplification = 1.2
shore_normal_deg = 235.0
"#,
        )
        .unwrap();

        let config = Config::load_from_path(file.path());
        assert_eq!(config.engine.current_max_age_minutes, 90);
        assert_eq!(config.engine.window_max_gap_minutes, 60);
        let registry = config.spot_registry().unwrap();
        let trestles = registry.get("trestles").unwrap();
        assert_eq!(trestles.name, "Lower Trestles");
        assert_eq!(trestles.shore_normal_deg, 235.0);
        assert!(registry.get("blacks").is_some());
    }

    #[test]
    fn test_invalid_file_falls_back_to_default() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "engine = 12").unwrap();
        let config = Config::load_from_path(file.path());
        assert_eq!(config.engine.current_max_age_minutes, 60);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        // Should fallback to default
        assert_eq!(config.engine.current_max_age_minutes, 60);
    }
}
