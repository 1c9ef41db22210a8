//! Solver configuration
//!
//! Every tunable of the step pipeline lives here so behavioural variants
//! (flat vs mass-scaled gravity, iteration budgets) are configuration
//! rather than separate code paths. Loaded from JSON by the runner.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// Tunables for one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Downward acceleration added each step (pixels/step²)
    pub gravity: f32,
    /// Fraction of implicit velocity kept each step (0-1]
    pub friction: f32,
    /// Stick relaxation sweeps per step
    pub distance_iterations: u32,
    /// Segment volume sweeps per step
    pub overlap_iterations: u32,
    /// Grab distance for the pointer
    pub pick_radius: f32,
    /// Multiply gravity by particle mass
    pub mass_scaled_gravity: bool,
    /// Split stick corrections by inverse mass instead of 50/50
    pub mass_weighted_sticks: bool,
    /// Leave segments that share a particle out of the volume pass
    pub skip_joined_overlaps: bool,
    /// Fraction of velocity reflected when a particle hits an edge (0 = stop)
    pub bounce: f32,
    /// World bounds [0, width] x [0, height]
    pub width: f32,
    pub height: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            friction: FRICTION,
            distance_iterations: DISTANCE_ITERATIONS,
            overlap_iterations: OVERLAP_ITERATIONS,
            pick_radius: PICK_RADIUS,
            mass_scaled_gravity: false,
            mass_weighted_sticks: false,
            skip_joined_overlaps: false,
            bounce: BOUNCE,
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
        }
    }
}

impl SimulationConfig {
    /// Set both iteration budgets
    pub fn with_iterations(mut self, distance: u32, overlap: u32) -> Self {
        self.distance_iterations = distance;
        self.overlap_iterations = overlap;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_mass_scaled_gravity(mut self, enabled: bool) -> Self {
        self.mass_scaled_gravity = enabled;
        self
    }

    pub fn with_mass_weighted_sticks(mut self, enabled: bool) -> Self {
        self.mass_weighted_sticks = enabled;
        self
    }

    pub fn with_skip_joined_overlaps(mut self, enabled: bool) -> Self {
        self.skip_joined_overlaps = enabled;
        self
    }

    pub fn with_bounce(mut self, bounce: f32) -> Self {
        self.bounce = bounce;
        self
    }

    pub fn with_bounds(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Check every field is usable by the solver
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.gravity.is_finite() {
            return Err(SimError::InvalidConfig("gravity must be finite"));
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(SimError::InvalidConfig("friction must be in (0, 1]"));
        }
        if self.distance_iterations == 0 {
            return Err(SimError::InvalidConfig("distance_iterations must be at least 1"));
        }
        if !(self.pick_radius >= 0.0 && self.pick_radius.is_finite()) {
            return Err(SimError::InvalidConfig("pick_radius must be non-negative"));
        }
        if !(0.0..=1.0).contains(&self.bounce) {
            return Err(SimError::InvalidConfig("bounce must be in [0, 1]"));
        }
        if !(self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()) {
            return Err(SimError::InvalidConfig("bounds must be positive"));
        }
        Ok(())
    }

    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.distance_iterations, 5);
        assert_eq!(config.overlap_iterations, 3);
        assert!(!config.mass_scaled_gravity);
        // Every distinct segment pair is checked for overlap
        assert!(!config.skip_joined_overlaps);
    }

    #[test]
    fn test_builders_chain() {
        let config = SimulationConfig::default()
            .with_iterations(12, 6)
            .with_skip_joined_overlaps(true)
            .with_bounds(400.0, 300.0);
        assert_eq!((config.distance_iterations, config.overlap_iterations), (12, 6));
        assert!(config.skip_joined_overlaps);
        assert_eq!((config.width, config.height), (400.0, 300.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = SimulationConfig::from_json(r#"{ "gravity": 0.3, "mass_scaled_gravity": true }"#).unwrap();
        assert_eq!(config.gravity, 0.3);
        assert!(config.mass_scaled_gravity);
        assert_eq!(config.friction, FRICTION);
        assert_eq!(config.width, VIEWPORT_WIDTH);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            SimulationConfig::from_json(r#"{ "friction": 1.5 }"#),
            Err(SimError::InvalidConfig(_))
        ));
        assert!(matches!(
            SimulationConfig::from_json(r#"{ "distance_iterations": 0 }"#),
            Err(SimError::InvalidConfig(_))
        ));
        assert!(matches!(
            SimulationConfig::from_json("not json"),
            Err(SimError::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            SimulationConfig::load("/nonexistent/ragdoll.json"),
            Err(SimError::Config(_))
        ));
    }
}
