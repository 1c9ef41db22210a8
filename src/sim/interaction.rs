//! Pointer dragging
//!
//! While the button is held the nearest particle within the pick radius
//! follows the pointer exactly. Only one particle is held at a time.

use glam::Vec2;

use super::body::Body;
use crate::config::SimulationConfig;

/// Pointer state for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerInput {
    /// Pointer position in world pixels
    pub position: Vec2,
    /// Primary button held
    pub held: bool,
}

impl PointerInput {
    pub fn held_at(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            held: true,
        }
    }

    pub fn released_at(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            held: false,
        }
    }
}

/// Pick, move or release the drag target.
///
/// Picking measures from the pointer as given. Placement is clamped to the
/// viewport, so the held particle matches the pointer exactly whenever the
/// pointer is on screen. The held particle's previous position becomes its
/// current one before it jumps to the pointer, so on release it keeps the
/// last frame's displacement as velocity.
pub fn apply_pointer(body: &mut Body, input: &PointerInput, config: &SimulationConfig) {
    if !input.held {
        if let Some(index) = body.drag_target.take() {
            log::debug!("Released particle {}", index);
        }
        return;
    }

    if body.drag_target.is_none() {
        if let Some((index, dist)) = body.nearest_particle(input.position) {
            if dist < config.pick_radius {
                log::debug!("Picked particle {} at distance {:.1}", index, dist);
                body.drag_target = Some(index);
            }
        }
    }

    if let Some(index) = body.drag_target {
        // An off-screen pointer drags along the nearest edge
        let target = input
            .position
            .clamp(Vec2::ZERO, Vec2::new(config.width, config.height));
        let particle = &mut body.particles[index];
        particle.prev_pos = particle.pos;
        particle.pos = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::skeleton::{parts, ragdoll};

    #[test]
    fn test_pick_within_radius() {
        let mut body = ragdoll().unwrap();
        let config = SimulationConfig::default();

        apply_pointer(&mut body, &PointerInput::held_at(405.0, 105.0), &config);
        assert_eq!(body.drag_target(), Some(parts::HEAD));
        assert_eq!(body.positions()[parts::HEAD], Vec2::new(405.0, 105.0));
    }

    #[test]
    fn test_no_pick_outside_radius() {
        let mut body = ragdoll().unwrap();
        let config = SimulationConfig::default();
        let before = body.positions();

        apply_pointer(&mut body, &PointerInput::held_at(100.0, 100.0), &config);
        assert_eq!(body.drag_target(), None);
        assert_eq!(body.positions(), before);
    }

    #[test]
    fn test_drag_keeps_target_when_pointer_moves_away() {
        let mut body = ragdoll().unwrap();
        let config = SimulationConfig::default();

        apply_pointer(&mut body, &PointerInput::held_at(400.0, 100.0), &config);
        apply_pointer(&mut body, &PointerInput::held_at(600.0, 300.0), &config);
        assert_eq!(body.drag_target(), Some(parts::HEAD));
        let head = body.particles()[parts::HEAD];
        assert_eq!(head.pos, Vec2::new(600.0, 300.0));
        // Velocity is the pointer's last displacement
        assert_eq!(head.velocity(), Vec2::new(200.0, 200.0));
    }

    #[test]
    fn test_release_clears_target() {
        let mut body = ragdoll().unwrap();
        let config = SimulationConfig::default();

        apply_pointer(&mut body, &PointerInput::held_at(400.0, 100.0), &config);
        apply_pointer(&mut body, &PointerInput::released_at(400.0, 100.0), &config);
        assert_eq!(body.drag_target(), None);
    }

    #[test]
    fn test_off_screen_pointer_out_of_reach() {
        let mut body = ragdoll().unwrap();
        let config = SimulationConfig::default();
        body.set_particle_position(parts::HEAD, Vec2::new(5.0, 100.0));

        // 25 px from the head, though only 5 px once clamped to the edge
        apply_pointer(&mut body, &PointerInput::held_at(-20.0, 100.0), &config);
        assert_eq!(body.drag_target(), None);
        assert_eq!(body.positions()[parts::HEAD], Vec2::new(5.0, 100.0));
    }

    #[test]
    fn test_off_screen_drag_stays_on_edge() {
        let mut body = ragdoll().unwrap();
        let config = SimulationConfig::default();
        body.set_particle_position(parts::HEAD, Vec2::new(795.0, 100.0));

        apply_pointer(&mut body, &PointerInput::held_at(810.0, 100.0), &config);
        assert_eq!(body.drag_target(), Some(parts::HEAD));
        assert_eq!(body.positions()[parts::HEAD], Vec2::new(800.0, 100.0));
    }
}
