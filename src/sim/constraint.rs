//! Sticks and joint limits
//!
//! Sticks are relaxed Gauss-Seidel style: each correction is applied in
//! place and read by the next stick in the same sweep.

use glam::Vec2;

use super::particle::Particle;
use crate::{angle_between, clamp_angle_to_range, normalize_angle, polar_to_cartesian};

/// Directions closer than this are treated as equal by the joint pass
const ANGLE_EPSILON: f32 = 1e-6;

/// Distance constraint between two particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stick {
    /// Anchor end (kept fixed by the joint pass)
    pub a: usize,
    pub b: usize,
    pub rest_length: f32,
    /// Visual/volume ellipse radii: along the stick, across the stick
    pub major_radius: f32,
    pub minor_radius: f32,
}

impl Stick {
    pub fn new(a: usize, b: usize, rest_length: f32, major_radius: f32, minor_radius: f32) -> Self {
        Self {
            a,
            b,
            rest_length,
            major_radius,
            minor_radius,
        }
    }

    /// Radius of the circle used as this segment's collision volume
    #[inline]
    pub fn volume_radius(&self) -> f32 {
        self.major_radius.max(self.minor_radius)
    }

    #[inline]
    pub fn touches(&self, particle: usize) -> bool {
        self.a == particle || self.b == particle
    }

    #[inline]
    pub fn shares_particle(&self, other: &Stick) -> bool {
        self.touches(other.a) || self.touches(other.b)
    }

    pub fn midpoint(&self, particles: &[Particle]) -> Vec2 {
        (particles[self.a].pos + particles[self.b].pos) * 0.5
    }

    pub fn current_length(&self, particles: &[Particle]) -> f32 {
        (particles[self.b].pos - particles[self.a].pos).length()
    }

    /// Pull both ends toward the rest length.
    ///
    /// `pinned` is the particle held by the pointer, which never moves; the
    /// other end then takes the whole correction. With `mass_weighted` the
    /// split follows inverse mass, otherwise it is 50/50.
    /// Returns false when the stick was skipped (zero length or both ends pinned).
    pub fn relax(&self, particles: &mut [Particle], pinned: Option<usize>, mass_weighted: bool) -> bool {
        let delta = particles[self.b].pos - particles[self.a].pos;
        let length = delta.length();
        if !(length > f32::EPSILON) {
            log::trace!("Skipping zero-length stick {}-{}", self.a, self.b);
            return false;
        }

        let (mut wa, mut wb) = if mass_weighted {
            (particles[self.a].inverse_mass(), particles[self.b].inverse_mass())
        } else {
            (1.0, 1.0)
        };
        if pinned == Some(self.a) {
            wa = 0.0;
        }
        if pinned == Some(self.b) {
            wb = 0.0;
        }
        let total = wa + wb;
        if total <= 0.0 {
            return false;
        }

        // Full correction; with equal weights each end moves half of it
        let correction = delta * ((self.rest_length - length) / length);
        particles[self.a].pos -= correction * (wa / total);
        particles[self.b].pos += correction * (wb / total);
        true
    }
}

/// Allowed direction range for one stick, measured at its anchor end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointLimit {
    pub stick: usize,
    pub min_angle: f32,
    pub max_angle: f32,
}

impl JointLimit {
    pub fn new(stick: usize, min_angle: f32, max_angle: f32) -> Self {
        Self {
            stick,
            min_angle,
            max_angle,
        }
    }

    /// Swing the stick's far end back into range, keeping the anchor.
    ///
    /// The far end is placed at rest length along the clamped direction.
    /// Returns true if the stick was outside its range and got moved.
    pub fn enforce(&self, stick: &Stick, particles: &mut [Particle]) -> bool {
        let anchor = particles[stick.a].pos;
        let tip = particles[stick.b].pos;
        if anchor == tip {
            return false;
        }

        let current = angle_between(anchor, tip);
        let Ok(clamped) = clamp_angle_to_range(current, self.min_angle, self.max_angle) else {
            return false;
        };
        if normalize_angle(clamped - current).abs() <= ANGLE_EPSILON {
            return false;
        }

        particles[stick.b].pos = anchor + polar_to_cartesian(stick.rest_length, clamped);
        true
    }
}
