//! Error types for body construction and configuration

use std::fmt;

/// Errors raised while building a body or validating its configuration.
///
/// The per-frame solver never returns these; degenerate geometry at run
/// time is skipped instead.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Angle range is empty or not finite
    InvalidRange { min: f32, max: f32 },
    /// Particle index is out of bounds
    ParticleOutOfBounds { index: usize, count: usize },
    /// Stick index is out of bounds
    StickOutOfBounds { index: usize, count: usize },
    /// Stick joins a particle to itself
    DegenerateStick { index: usize },
    /// Rest length must be positive and finite
    InvalidRestLength { index: usize, length: f32 },
    /// Mass must be positive and finite
    InvalidMass { index: usize, mass: f32 },
    /// Visual radii must be non-negative and finite
    InvalidRadius { index: usize },
    /// Root particle index is out of bounds
    InvalidRoot { index: usize },
    /// A configuration field is out of its valid range
    InvalidConfig(&'static str),
    /// Configuration could not be read or parsed
    Config(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidRange { min, max } => {
                write!(f, "invalid angle range [{}, {}]", min, max)
            }
            SimError::ParticleOutOfBounds { index, count } => {
                write!(f, "particle index {} out of bounds (count: {})", index, count)
            }
            SimError::StickOutOfBounds { index, count } => {
                write!(f, "stick index {} out of bounds (count: {})", index, count)
            }
            SimError::DegenerateStick { index } => {
                write!(f, "stick {} joins a particle to itself", index)
            }
            SimError::InvalidRestLength { index, length } => {
                write!(f, "stick {} has invalid rest length {}", index, length)
            }
            SimError::InvalidMass { index, mass } => {
                write!(f, "particle {} has invalid mass {}", index, mass)
            }
            SimError::InvalidRadius { index } => {
                write!(f, "stick {} has invalid visual radii", index)
            }
            SimError::InvalidRoot { index } => write!(f, "root particle {} does not exist", index),
            SimError::InvalidConfig(field) => write!(f, "invalid configuration: {}", field),
            SimError::Config(msg) => write!(f, "could not load configuration: {}", msg),
        }
    }
}

impl std::error::Error for SimError {}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::Config(err.to_string())
    }
}

impl From<std::io::Error> for SimError {
    fn from(err: std::io::Error) -> Self {
        SimError::Config(err.to_string())
    }
}
