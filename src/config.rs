//! Simulation configuration
//!
//! Fixed for the lifetime of a run. Loaded from JSON; any field left out
//! falls back to the stock scene.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{Color, STOCK_PALETTE};
use crate::consts::*;
use crate::sim::Arena;

/// How two balls are tested for contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverlapTest {
    /// Axis-aligned bounding squares intersect
    #[default]
    BoundingBox,
    /// Circles intersect
    Circle,
}

impl OverlapTest {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlapTest::BoundingBox => "bounding_box",
            OverlapTest::Circle => "circle",
        }
    }
}

/// One color group to spawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub color: Color,
    pub count: u32,
}

/// Errors raised while loading or validating a config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("arena must be non-empty, got {width}x{height}")]
    EmptyArena { width: u32, height: u32 },
    #[error("ball radius must be positive and finite, got {0}")]
    InvalidRadius(f32),
    #[error("tick rate must be positive and finite, got {0}")]
    InvalidTickRate(f32),
}

/// Complete simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub arena_width: u32,
    pub arena_height: u32,
    /// Radius given to every newly made ball
    pub ball_radius: f32,
    /// Ticks per second
    pub tick_rate: f32,
    /// RNG seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
    pub overlap: OverlapTest,
    /// Groups in iteration order
    pub groups: Vec<GroupConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            ball_radius: BALL_RADIUS,
            tick_rate: TICK_RATE,
            seed: None,
            overlap: OverlapTest::BoundingBox,
            groups: STOCK_PALETTE
                .iter()
                .map(|&color| GroupConfig {
                    color,
                    count: BALLS_PER_GROUP,
                })
                .collect(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.arena_width == 0 || self.arena_height == 0 {
            return Err(ConfigError::EmptyArena {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if !(self.ball_radius.is_finite() && self.ball_radius > 0.0) {
            return Err(ConfigError::InvalidRadius(self.ball_radius));
        }
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            return Err(ConfigError::InvalidTickRate(self.tick_rate));
        }
        Ok(())
    }

    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_width as f32, self.arena_height as f32)
    }

    /// Wall-clock duration of one tick
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.tick_rate)
    }

    /// Total balls spawned at start
    pub fn total_balls(&self) -> u32 {
        self.groups.iter().map(|g| g.count).sum()
    }
}
