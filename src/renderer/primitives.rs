//! Draw list for the external renderer
//!
//! A read-only view of a solved body: one line and one ellipse per stick,
//! one square marker per particle, and a filled disc on the head.

use glam::Vec2;
use serde::Serialize;

use crate::angle_between;
use crate::consts::{HEAD_RADIUS, MARKER_HALF_SIZE};
use crate::sim::Body;

/// A single shape to draw, in world pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderPrimitive {
    Line { from: Vec2, to: Vec2 },
    /// Outline ellipse; `radii.x` runs along `rotation`
    Ellipse { center: Vec2, radii: Vec2, rotation: f32 },
    /// Axis-aligned square
    Marker { center: Vec2, half_size: f32 },
    /// Filled circle
    Disc { center: Vec2, radius: f32 },
}

/// Translate the body into draw primitives.
///
/// Order: all sticks (line then ellipse each), all particle markers, then
/// the head disc so it draws on top.
pub fn render_primitives(body: &Body) -> Vec<RenderPrimitive> {
    let particles = body.particles();
    let mut out = Vec::with_capacity(body.sticks().len() * 2 + particles.len() + 1);

    for stick in body.sticks() {
        let from = particles[stick.a].pos;
        let to = particles[stick.b].pos;
        out.push(RenderPrimitive::Line { from, to });
        out.push(RenderPrimitive::Ellipse {
            center: (from + to) * 0.5,
            radii: Vec2::new(stick.major_radius, stick.minor_radius),
            rotation: if from == to { 0.0 } else { angle_between(from, to) },
        });
    }

    for particle in particles {
        out.push(RenderPrimitive::Marker {
            center: particle.pos,
            half_size: MARKER_HALF_SIZE,
        });
    }

    if let Some(head) = body.head() {
        out.push(RenderPrimitive::Disc {
            center: particles[head].pos,
            radius: HEAD_RADIUS,
        });
    }

    out
}
