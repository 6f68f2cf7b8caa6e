// src/config.rs

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("side length must be positive and finite, got {0}")]
    InvalidSideLength(f64),
    #[error("count range [{min}, {max}) is empty")]
    EmptyCountRange { min: usize, max: usize },
}

/// How many chords (or Voronoi seeds) to draw per cycle.
/// `min` is inclusive, `max` exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountRange {
    pub min: usize,
    pub max: usize,
}

/// Geometry engine configuration, supplied by the host once at startup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshConfig {
    pub side_length: f64,
    pub count: CountRange,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            side_length: 200.0,
            count: CountRange { min: 20, max: 50 },
        }
    }
}

impl MeshConfig {
    /// Validated at startup so bad configuration never reaches the
    /// subdivision code mid-cycle.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.side_length.is_finite() || self.side_length <= 0.0 {
            return Err(ConfigError::InvalidSideLength(self.side_length));
        }
        if self.count.min >= self.count.max {
            return Err(ConfigError::EmptyCountRange {
                min: self.count.min,
                max: self.count.max,
            });
        }
        Ok(())
    }
}
