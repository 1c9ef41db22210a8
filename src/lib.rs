//! Walker Ragdoll - a jointed point-mass body in a 2D viewport
//!
//! Core modules:
//! - `sim`: Deterministic simulation (particles, sticks, joint limits, dragging)
//! - `renderer`: Translation of solved state into draw primitives and vertices
//! - `config`: Solver tuning loaded from JSON
//! - `error`: Construction-time error type

pub mod config;
pub mod error;
pub mod renderer;
pub mod sim;

pub use config::SimulationConfig;
pub use error::SimError;

use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// Simulation configuration constants
pub mod consts {
    /// Reference viewport, in pixels
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Frame duration the step constants are tuned for (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Downward acceleration added each step (pixels/step²)
    pub const GRAVITY: f32 = 0.5;
    /// Velocity retained per step
    pub const FRICTION: f32 = 0.98;
    /// Fraction of velocity reflected off a viewport edge
    pub const BOUNCE: f32 = 0.5;

    /// Stick relaxation sweeps per step
    pub const DISTANCE_ITERATIONS: u32 = 5;
    /// Segment volume sweeps per step
    pub const OVERLAP_ITERATIONS: u32 = 3;

    /// Pointer must be this close to a particle to grab it
    pub const PICK_RADIUS: f32 = 20.0;

    /// Rendered head size
    pub const HEAD_RADIUS: f32 = 15.0;
    /// Half the side of the square drawn on every particle
    pub const MARKER_HALF_SIZE: f32 = 2.0;
}

/// Euclidean distance between two points. NaN propagates.
#[inline]
pub fn distance(p: Vec2, q: Vec2) -> f32 {
    (q - p).length()
}

/// Direction from `p` to `q`, in (-π, π]
#[inline]
pub fn angle_between(p: Vec2, q: Vec2) -> f32 {
    (q.y - p.y).atan2(q.x - p.x)
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    while angle >= PI {
        angle -= TAU;
    }
    while angle < -PI {
        angle += TAU;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Bring `angle` into `[min, max]` by whole turns.
///
/// When no turn of `angle` falls inside the range, the bound nearest to it
/// (measured around the circle) is returned. Angles already in range come
/// back untouched, which makes the function idempotent. A NaN angle comes
/// back as NaN.
pub fn clamp_angle_to_range(angle: f32, min: f32, max: f32) -> Result<f32, SimError> {
    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(SimError::InvalidRange { min, max });
    }
    if angle.is_nan() || (angle >= min && angle <= max) {
        return Ok(angle);
    }
    if !angle.is_finite() {
        return Ok(f32::NAN);
    }

    let offset = (angle - min).rem_euclid(TAU);
    let wrapped = min + offset;
    if wrapped <= max {
        return Ok(wrapped);
    }

    // Outside the arc: pick the closer bound
    let past_max = offset - (max - min);
    let before_min = TAU - offset;
    Ok(if past_max <= before_min { max } else { min })
}
