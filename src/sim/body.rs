//! The ragdoll body: particles, sticks, joint limits and drag state
//!
//! Topology is fixed once `BodyBuilder::build` succeeds; afterwards only
//! particle positions, rest lengths and the drag target change.

use std::collections::BTreeMap;

use glam::Vec2;

use super::constraint::{JointLimit, Stick};
use super::particle::Particle;
use crate::error::SimError;

/// Particle that is never moved by the joint pass
pub const DEFAULT_ROOT: usize = 0;

/// A jointed point-mass body
#[derive(Debug, Clone)]
pub struct Body {
    pub(crate) particles: Vec<Particle>,
    pub(crate) sticks: Vec<Stick>,
    /// Joint limits keyed by stick index (iterated in stick order)
    pub(crate) joints: BTreeMap<usize, JointLimit>,
    /// Joint limits on sticks touching this particle are not applied
    pub(crate) root: usize,
    /// Particle drawn as the head, if any
    pub(crate) head: Option<usize>,
    /// Particle currently held by the pointer
    pub(crate) drag_target: Option<usize>,
}

impl Body {
    pub fn builder() -> BodyBuilder {
        BodyBuilder::new()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn sticks(&self) -> &[Stick] {
        &self.sticks
    }

    pub fn joint_limits(&self) -> impl Iterator<Item = &JointLimit> {
        self.joints.values()
    }

    pub fn joint_limit(&self, stick: usize) -> Option<&JointLimit> {
        self.joints.get(&stick)
    }

    pub fn root(&self) -> usize {
        self.root
    }

    pub fn head(&self) -> Option<usize> {
        self.head
    }

    pub fn drag_target(&self) -> Option<usize> {
        self.drag_target
    }

    /// Current position of every particle, by index
    pub fn positions(&self) -> Vec<Vec2> {
        self.particles.iter().map(|p| p.pos).collect()
    }

    /// Rest length of every stick, by index
    pub fn rest_lengths(&self) -> Vec<f32> {
        self.sticks.iter().map(|s| s.rest_length).collect()
    }

    /// Current (solved) length of every stick, by index
    pub fn stick_lengths(&self) -> Vec<f32> {
        self.sticks
            .iter()
            .map(|s| s.current_length(&self.particles))
            .collect()
    }

    /// Teleport a particle, leaving it at rest.
    ///
    /// Out-of-range indices and non-finite positions are ignored; returns
    /// whether the particle was moved.
    pub fn set_particle_position(&mut self, index: usize, pos: Vec2) -> bool {
        if !pos.is_finite() {
            log::debug!("Ignoring non-finite position for particle {}", index);
            return false;
        }
        match self.particles.get_mut(index) {
            Some(particle) => {
                particle.pos = pos;
                particle.prev_pos = pos;
                true
            }
            None => {
                log::debug!("Ignoring position for missing particle {}", index);
                false
            }
        }
    }

    /// Give a particle an implicit velocity (displacement per step).
    /// Ignores out-of-range indices like `set_particle_position`.
    pub fn set_particle_velocity(&mut self, index: usize, velocity: Vec2) -> bool {
        if !velocity.is_finite() {
            log::debug!("Ignoring non-finite velocity for particle {}", index);
            return false;
        }
        match self.particles.get_mut(index) {
            Some(particle) => {
                particle.prev_pos = particle.pos - velocity;
                true
            }
            None => {
                log::debug!("Ignoring velocity for missing particle {}", index);
                false
            }
        }
    }

    /// Change a stick's rest length (for scripted posing).
    ///
    /// Out-of-range indices and lengths that are not positive are ignored;
    /// returns whether the stick was changed.
    pub fn set_rest_length(&mut self, index: usize, length: f32) -> bool {
        if !(length > 0.0 && length.is_finite()) {
            log::debug!("Ignoring rest length {} for stick {}", length, index);
            return false;
        }
        match self.sticks.get_mut(index) {
            Some(stick) => {
                stick.rest_length = length;
                true
            }
            None => {
                log::debug!("Ignoring rest length for missing stick {}", index);
                false
            }
        }
    }

    /// Index and distance of the particle nearest to `point`
    pub fn nearest_particle(&self, point: Vec2) -> Option<(usize, f32)> {
        self.particles
            .iter()
            .enumerate()
            .map(|(i, p)| (i, crate::distance(p.pos, point)))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    }
}

/// Stick waiting for `build`; rest length defaults to the posed distance
#[derive(Debug, Clone, Copy)]
struct PendingStick {
    a: usize,
    b: usize,
    rest_length: Option<f32>,
    radii: (f32, f32),
}

/// Validating builder for `Body`
#[derive(Debug, Clone, Default)]
pub struct BodyBuilder {
    particles: Vec<Particle>,
    sticks: Vec<PendingStick>,
    joints: Vec<JointLimit>,
    root: Option<usize>,
    head: Option<usize>,
}

impl BodyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a unit-mass particle at rest; returns its index
    pub fn particle(&mut self, pos: Vec2) -> usize {
        self.particle_with_mass(pos, 1.0)
    }

    pub fn particle_with_mass(&mut self, pos: Vec2, mass: f32) -> usize {
        self.particles.push(Particle::with_mass(pos, mass));
        self.particles.len() - 1
    }

    /// Add a stick whose rest length is the current distance between its ends
    pub fn stick(&mut self, a: usize, b: usize, major_radius: f32, minor_radius: f32) -> usize {
        self.sticks.push(PendingStick {
            a,
            b,
            rest_length: None,
            radii: (major_radius, minor_radius),
        });
        self.sticks.len() - 1
    }

    pub fn stick_with_length(
        &mut self,
        a: usize,
        b: usize,
        rest_length: f32,
        major_radius: f32,
        minor_radius: f32,
    ) -> usize {
        self.sticks.push(PendingStick {
            a,
            b,
            rest_length: Some(rest_length),
            radii: (major_radius, minor_radius),
        });
        self.sticks.len() - 1
    }

    /// Limit the world-space direction of a stick (anchor `a` to tip `b`)
    pub fn joint(&mut self, stick: usize, min_angle: f32, max_angle: f32) -> &mut Self {
        self.joints.push(JointLimit::new(stick, min_angle, max_angle));
        self
    }

    pub fn root(&mut self, particle: usize) -> &mut Self {
        self.root = Some(particle);
        self
    }

    /// Mark a particle to be drawn as the head
    pub fn head(&mut self, particle: usize) -> &mut Self {
        self.head = Some(particle);
        self
    }

    /// Validate the topology and produce the body
    pub fn build(&self) -> Result<Body, SimError> {
        let count = self.particles.len();

        for (index, particle) in self.particles.iter().enumerate() {
            if !(particle.mass > 0.0 && particle.mass.is_finite()) {
                return Err(SimError::InvalidMass {
                    index,
                    mass: particle.mass,
                });
            }
        }

        let mut sticks = Vec::with_capacity(self.sticks.len());
        for (index, pending) in self.sticks.iter().enumerate() {
            for end in [pending.a, pending.b] {
                if end >= count {
                    return Err(SimError::ParticleOutOfBounds { index: end, count });
                }
            }
            if pending.a == pending.b {
                return Err(SimError::DegenerateStick { index });
            }

            let rest_length = pending.rest_length.unwrap_or_else(|| {
                crate::distance(self.particles[pending.a].pos, self.particles[pending.b].pos)
            });
            if !(rest_length > 0.0 && rest_length.is_finite()) {
                return Err(SimError::InvalidRestLength {
                    index,
                    length: rest_length,
                });
            }

            let (major, minor) = pending.radii;
            if !(major >= 0.0 && minor >= 0.0 && major.is_finite() && minor.is_finite()) {
                return Err(SimError::InvalidRadius { index });
            }

            sticks.push(Stick::new(pending.a, pending.b, rest_length, major, minor));
        }

        let mut joints = BTreeMap::new();
        for limit in &self.joints {
            if limit.stick >= sticks.len() {
                return Err(SimError::StickOutOfBounds {
                    index: limit.stick,
                    count: sticks.len(),
                });
            }
            // Reuses the range check of the angle clamp
            crate::clamp_angle_to_range(limit.min_angle, limit.min_angle, limit.max_angle)?;
            joints.insert(limit.stick, *limit);
        }

        let root = self.root.unwrap_or(DEFAULT_ROOT);
        if count > 0 && root >= count {
            return Err(SimError::InvalidRoot { index: root });
        }
        if let Some(head) = self.head {
            if head >= count {
                return Err(SimError::ParticleOutOfBounds { index: head, count });
            }
        }

        log::info!(
            "Built body: {} particles, {} sticks, {} joint limits",
            count,
            sticks.len(),
            joints.len()
        );

        Ok(Body {
            particles: self.particles.clone(),
            sticks,
            joints,
            root,
            head: self.head,
            drag_target: None,
        })
    }
}
