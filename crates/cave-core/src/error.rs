//! Configuration errors
//!
//! Everything that can go wrong before generation starts. Generation itself
//! cannot fail once a config has been validated.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use thiserror::Error;

/// Errors raised while building or validating a [`crate::CaveConfig`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("map dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("map of {width}x{height} tiles is too large")]
    MapTooLarge { width: usize, height: usize },

    #[error("fill percent must be within 0..=100, got {0}")]
    FillPercentOutOfRange(u32),

    #[error("room threshold {threshold} exceeds the {interior} interior tiles of the map")]
    UnsatisfiableRoomThreshold { threshold: usize, interior: usize },

    #[error("wall threshold {threshold} exceeds the {total} tiles of the map")]
    UnsatisfiableWallThreshold { threshold: usize, total: usize },

    #[error("passage radius must be at least 1")]
    PassageTooNarrow,

    #[error("random seed mode requires the std feature")]
    RandomSeedUnavailable,

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("missing value for option '{0}'")]
    MissingValue(String),

    #[error("invalid value '{1}' for option '{0}'")]
    InvalidValue(String, String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("parse error: {0}")]
    Parse(String),
}
