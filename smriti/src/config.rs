//! Configuration for the Smriti demo harness
//!
//! Loaded from a TOML file. Every section and field has a default, so an
//! empty file (or no file at all) is a valid configuration.
//!
//! ```toml
//! [simulation]
//! arena_half_extent = 500.0
//! start_x = 0.0
//! start_y = 0.0
//! start_heading = 0.0
//! collision_mode = "stop"
//!
//! [walk]
//! steps = 10
//! seed = 42
//! max_distance = 100.0
//! max_angle = 360.0
//!
//! [logging]
//! level = "info"
//! ```

use crate::devices::CollisionMode;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
    pub walk: WalkConfig,
    pub logging: LoggingConfig,
}

/// Simulated robot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Half the side length of the square arena centred at the origin
    pub arena_half_extent: f64,
    /// Start X position
    pub start_x: f64,
    /// Start Y position
    pub start_y: f64,
    /// Start heading in degrees (CCW from +X)
    pub start_heading: f64,
    /// Behaviour when a move would leave the arena
    pub collision_mode: CollisionMode,
}

/// Random walk configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Number of commands to issue
    pub steps: usize,
    /// RNG seed; a random seed is drawn when absent
    pub seed: Option<u64>,
    /// Moves are drawn uniformly from `[0, max_distance)`
    pub max_distance: f64,
    /// Turns are drawn uniformly from `[0, max_angle)` degrees
    pub max_angle: f64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log filter (trace, debug, info, warn, error); `RUST_LOG` wins
    pub level: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            arena_half_extent: 500.0,
            start_x: 0.0,
            start_y: 0.0,
            start_heading: 0.0,
            collision_mode: CollisionMode::Stop,
        }
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            steps: 10,
            seed: None,
            max_distance: 100.0,
            max_angle: 360.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl SimulationConfig {
    /// Check arena size and start pose
    pub fn validate(&self) -> Result<()> {
        if !(self.arena_half_extent.is_finite() && self.arena_half_extent > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "arena_half_extent must be positive and finite, got {}",
                self.arena_half_extent
            )));
        }
        if !self.start_heading.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "start_heading must be finite, got {}",
                self.start_heading
            )));
        }
        let limit = self.arena_half_extent;
        // NaN fails both comparisons, so it is rejected here as well
        if !(self.start_x.abs() <= limit && self.start_y.abs() <= limit) {
            return Err(Error::InvalidParameter(format!(
                "start position ({}, {}) outside arena of half extent {}",
                self.start_x, self.start_y, limit
            )));
        }
        Ok(())
    }
}

impl WalkConfig {
    /// Check the sampling ranges
    pub fn validate(&self) -> Result<()> {
        if !(self.max_distance.is_finite() && self.max_distance > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "max_distance must be positive and finite, got {}",
                self.max_distance
            )));
        }
        if !(self.max_angle.is_finite() && self.max_angle > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "max_angle must be positive and finite, got {}",
                self.max_angle
            )));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load configuration from TOML file
    ///
    /// # Example
    /// ```no_run
    /// use smriti::config::AppConfig;
    ///
    /// let config = AppConfig::from_file("smriti.toml")?;
    /// # Ok::<(), smriti::Error>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;
        self.walk.validate()
    }
}
