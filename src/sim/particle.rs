//! Verlet point masses
//!
//! Velocity is implicit: `pos - prev_pos` is the displacement of the last
//! step. Each step advances by exactly one frame, so there is no `dt` term.

use glam::Vec2;

use crate::config::SimulationConfig;

/// A point mass with current and previous position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub prev_pos: Vec2,
    pub mass: f32,
}

impl Particle {
    /// Particle at rest with unit mass
    pub fn new(pos: Vec2) -> Self {
        Self::with_mass(pos, 1.0)
    }

    pub fn with_mass(pos: Vec2, mass: f32) -> Self {
        Self {
            pos,
            prev_pos: pos,
            mass,
        }
    }

    /// Displacement over the last step
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.pos - self.prev_pos
    }

    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        1.0 / self.mass
    }

    /// Advance one step: damped implicit velocity, then gravity, then bounds
    pub fn integrate(&mut self, config: &SimulationConfig) {
        let velocity = self.velocity() * config.friction;
        self.prev_pos = self.pos;
        self.pos += velocity;

        let gravity = if config.mass_scaled_gravity {
            config.gravity * self.mass
        } else {
            config.gravity
        };
        self.pos.y += gravity;

        self.clamp_to_bounds(config);
    }

    /// Keep the particle inside [0, width] x [0, height].
    ///
    /// On contact while moving outward, the previous position is rewritten so
    /// the next implicit velocity along that axis is `-bounce` times the
    /// incoming one. A particle already heading back inside keeps its
    /// velocity. Returns true if any axis was clamped.
    pub fn clamp_to_bounds(&mut self, config: &SimulationConfig) -> bool {
        let x = clamp_axis(&mut self.pos.x, &mut self.prev_pos.x, config.width, config.bounce);
        let y = clamp_axis(&mut self.pos.y, &mut self.prev_pos.y, config.height, config.bounce);
        x || y
    }
}

fn clamp_axis(pos: &mut f32, prev: &mut f32, max: f32, bounce: f32) -> bool {
    if *pos >= 0.0 && *pos <= max {
        return false;
    }
    let velocity = *pos - *prev;
    let outward = if *pos < 0.0 { velocity < 0.0 } else { velocity > 0.0 };
    *pos = pos.clamp(0.0, max);
    *prev = if outward {
        *pos + velocity * bounce
    } else {
        *pos - velocity
    };
    true
}
