//! Per-frame simulation step
//!
//! Order within one step is fixed and each pass reads what the previous one
//! wrote: pointer, integrate, stick sweeps, joint limits, volume sweeps,
//! bounds.

use super::body::Body;
use super::collision::resolve_overlaps;
use super::interaction::{PointerInput, apply_pointer};
use crate::config::SimulationConfig;

/// Advance the body by one frame.
///
/// The dragged particle (if any) is kinematic for the whole step: it sits
/// exactly on the pointer afterwards while its sticks pull the rest of the
/// body after it.
pub fn step(body: &mut Body, input: &PointerInput, config: &SimulationConfig) {
    apply_pointer(body, input, config);
    let pinned = body.drag_target;

    for (index, particle) in body.particles.iter_mut().enumerate() {
        if pinned != Some(index) {
            particle.integrate(config);
        }
    }

    for _ in 0..config.distance_iterations {
        for stick in &body.sticks {
            stick.relax(&mut body.particles, pinned, config.mass_weighted_sticks);
        }
    }

    enforce_joint_limits(body);

    let pushes = resolve_overlaps(
        &mut body.particles,
        &body.sticks,
        pinned,
        config.overlap_iterations,
        config.skip_joined_overlaps,
    );
    if pushes > 0 {
        log::trace!("Separated {} overlapping segment pairs", pushes);
    }

    for (index, particle) in body.particles.iter_mut().enumerate() {
        if pinned != Some(index) {
            particle.clamp_to_bounds(config);
        }
    }
}

/// Apply every joint limit whose stick does not touch the root particle.
/// A limit never moves the dragged particle.
fn enforce_joint_limits(body: &mut Body) {
    for (index, limit) in &body.joints {
        let stick = body.sticks[*index];
        if stick.touches(body.root) || body.drag_target == Some(stick.b) {
            continue;
        }
        limit.enforce(&stick, &mut body.particles);
    }
}
