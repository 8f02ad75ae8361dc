//! Simulation configuration.
//!
//! A configuration describes one of the two reference setups (or anything in
//! between): the bounded 2D system that is recentered, rescaled and kept inside
//! reflecting walls, and the unbounded 3D system that drifts freely.
//!
//! ```yaml
//! dimension: 2        # 2 or 3
//! dt: 0.01
//! body_count: 100
//! mass: 1.0
//! bounded: true       # walls + initial normalization
//! half_extent: 3.0    # walls at ±half_extent
//! velocity_scale: 0.1
//! seed: 0
//! ```
//!
//! Missing keys take the values of [`SimulationConfig::bounded_2d`].

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of spatial dimensions. Serialized as the plain number `2` or `3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Dimension {
    Two,
    Three,
}

impl Dimension {
    pub fn get(self) -> usize {
        match self {
            Dimension::Two => 2,
            Dimension::Three => 3,
        }
    }
}

impl TryFrom<u8> for Dimension {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Dimension::Two),
            3 => Ok(Dimension::Three),
            other => Err(ConfigError::UnsupportedDimension(other)),
        }
    }
}

impl From<Dimension> for u8 {
    fn from(dimension: Dimension) -> Self {
        dimension.get() as u8
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unsupported dimension {0}, expected 2 or 3")]
    UnsupportedDimension(u8),
    #[error("time step must be finite and positive, got {0}")]
    InvalidTimeStep(f64),
    #[error("body mass must be finite and positive, got {0}")]
    InvalidMass(f64),
    #[error("domain half extent must be finite and positive, got {0}")]
    InvalidHalfExtent(f64),
    #[error("velocity scale must be finite and non-negative, got {0}")]
    InvalidVelocityScale(f64),
    #[error("body count must be at least 1")]
    NoBodies,
    #[error("configuration is {found}D but the simulation was requested as {expected}D")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("failed to read configuration: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub dimension: Dimension,
    /// Fixed time step per call to `step`.
    pub dt: f64,
    pub body_count: usize,
    /// Mass given to every sampled body.
    pub mass: f64,
    /// Reflecting walls and initial recentering/rescaling.
    pub bounded: bool,
    /// Walls sit at `±half_extent` on every axis. Ignored when unbounded.
    pub half_extent: f64,
    /// Multiplier applied to sampled initial velocities.
    pub velocity_scale: f64,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::bounded_2d()
    }
}

impl SimulationConfig {
    pub const DEFAULT_DT: f64 = 0.01;
    pub const DEFAULT_N: usize = 100;
    pub const DEFAULT_MASS: f64 = 1.0;
    pub const DEFAULT_HALF_EXTENT: f64 = 3.0;
    pub const DEFAULT_VELOCITY_SCALE: f64 = 0.1;

    /// 2D system inside reflecting walls at ±3, normalized before the first step.
    pub fn bounded_2d() -> Self {
        Self {
            dimension: Dimension::Two,
            dt: Self::DEFAULT_DT,
            body_count: Self::DEFAULT_N,
            mass: Self::DEFAULT_MASS,
            bounded: true,
            half_extent: Self::DEFAULT_HALF_EXTENT,
            velocity_scale: Self::DEFAULT_VELOCITY_SCALE,
            seed: 0,
        }
    }

    /// 3D system drifting freely, no normalization.
    pub fn unbounded_3d() -> Self {
        Self {
            dimension: Dimension::Three,
            bounded: false,
            ..Self::bounded_2d()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ConfigError::InvalidTimeStep(self.dt));
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(ConfigError::InvalidMass(self.mass));
        }
        if self.bounded && !(self.half_extent.is_finite() && self.half_extent > 0.0) {
            return Err(ConfigError::InvalidHalfExtent(self.half_extent));
        }
        if !(self.velocity_scale.is_finite() && self.velocity_scale >= 0.0) {
            return Err(ConfigError::InvalidVelocityScale(self.velocity_scale));
        }
        if self.body_count == 0 {
            return Err(ConfigError::NoBodies);
        }
        Ok(())
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&source)
    }
}
