//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list.

use glam::Vec2;
use std::f32::consts::TAU;

use super::primitives::RenderPrimitive;
use super::vertex::{Vertex, colors};

/// Width of bone lines and ellipse outlines, in pixels
const LINE_WIDTH: f32 = 1.5;
/// Segments used for ellipse outlines and discs
const CURVE_SEGMENTS: usize = 24;

/// Evenly spaced points on an ellipse.
///
/// `radii.x` lies along `rotation`, `radii.y` across it. The first point is
/// at the end of the major axis; the curve is not closed.
pub fn ellipse_points(center: Vec2, radii: Vec2, rotation: f32, segments: usize) -> Vec<Vec2> {
    let axis = Vec2::from_angle(rotation);
    let across = axis.perp();
    (0..segments)
        .map(|i| {
            let t = i as f32 / segments as f32 * TAU;
            center + axis * (radii.x * t.cos()) + across * (radii.y * t.sin())
        })
        .collect()
}

fn push_quad(vertices: &mut Vec<Vertex>, corners: [Vec2; 4], color: [f32; 4]) {
    let [a, b, c, d] = corners;
    for p in [a, b, c, c, b, d] {
        vertices.push(Vertex::new(p.x, p.y, color));
    }
}

/// Generate vertices for a thick line segment
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    push_line(&mut vertices, from, to, width, color);
    vertices
}

fn push_line(vertices: &mut Vec<Vertex>, from: Vec2, to: Vec2, width: f32, color: [f32; 4]) {
    let dir = (to - from).normalize_or_zero();
    // Perpendicular for width
    let perp = dir.perp() * (width * 0.5);
    push_quad(vertices, [from + perp, from - perp, to + perp, to - perp], color);
}

/// Generate vertices for an ellipse outline
pub fn ellipse_outline(center: Vec2, radii: Vec2, rotation: f32, color: [f32; 4]) -> Vec<Vertex> {
    let points = ellipse_points(center, radii, rotation, CURVE_SEGMENTS);
    let mut vertices = Vec::with_capacity(points.len() * 6);
    for (i, &p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        push_line(&mut vertices, p, q, LINE_WIDTH, color);
    }
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: usize) -> Vec<Vertex> {
    let rim = ellipse_points(center, Vec2::splat(radius), 0.0, segments);
    let mut vertices = Vec::with_capacity(segments * 3);

    for (i, &p) in rim.iter().enumerate() {
        let q = rim[(i + 1) % rim.len()];
        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p.x, p.y, color));
        vertices.push(Vertex::new(q.x, q.y, color));
    }

    vertices
}

/// Generate vertices for an axis-aligned filled square
pub fn square(center: Vec2, half_size: f32, color: [f32; 4]) -> Vec<Vertex> {
    let h = Vec2::splat(half_size);
    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        [
            center - h,
            center + Vec2::new(half_size, -half_size),
            center + Vec2::new(-half_size, half_size),
            center + h,
        ],
        color,
    );
    vertices
}

/// Tessellate a whole draw list, in order
pub fn tessellate(primitives: &[RenderPrimitive]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for primitive in primitives {
        match *primitive {
            RenderPrimitive::Line { from, to } => {
                vertices.extend(line(from, to, LINE_WIDTH, colors::BONE));
            }
            RenderPrimitive::Ellipse {
                center,
                radii,
                rotation,
            } => {
                vertices.extend(ellipse_outline(center, radii, rotation, colors::VOLUME));
            }
            RenderPrimitive::Marker { center, half_size } => {
                vertices.extend(square(center, half_size, colors::JOINT));
            }
            RenderPrimitive::Disc { center, radius } => {
                vertices.extend(circle(center, radius, colors::HEAD, CURVE_SEGMENTS));
            }
        }
    }
    vertices
}
