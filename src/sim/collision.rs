//! Segment volume overlap
//!
//! Each stick's volume is approximated by a circle at its midpoint with the
//! larger of its two visual radii. Overlapping segments are translated
//! rigidly apart along the line between their centers.
//!
//! Every sweep tests all pairs, O(sticks²). That is fine for the fixed
//! ten-stick skeleton and does not scale to large bodies.

use glam::Vec2;

use super::constraint::Stick;
use super::particle::Particle;

/// Result of a segment-vs-segment volume check
#[derive(Debug, Clone)]
pub struct OverlapResult {
    /// Whether the volumes overlap
    pub hit: bool,
    /// Unit direction from the first segment's center to the second's
    pub normal: Vec2,
    /// How far the centers must separate to just touch
    pub penetration: f32,
}

impl OverlapResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check whether two segments' volumes overlap.
///
/// Coincident centers report a miss since no separating direction exists.
pub fn segment_overlap(first: &Stick, second: &Stick, particles: &[Particle]) -> OverlapResult {
    let delta = second.midpoint(particles) - first.midpoint(particles);
    let dist = delta.length();
    let reach = first.volume_radius() + second.volume_radius();

    if dist >= reach || !(dist > 0.0) {
        return OverlapResult::miss();
    }

    OverlapResult {
        hit: true,
        normal: delta / dist,
        penetration: reach - dist,
    }
}

fn translate(stick: &Stick, particles: &mut [Particle], offset: Vec2) {
    particles[stick.a].pos += offset;
    particles[stick.b].pos += offset;
}

/// Push one pair of segments apart. A segment holding `pinned` stays put
/// and the other takes the whole separation. Returns true if anything moved.
pub fn separate_pair(
    first: &Stick,
    second: &Stick,
    particles: &mut [Particle],
    pinned: Option<usize>,
) -> bool {
    let result = segment_overlap(first, second, particles);
    if !result.hit {
        return false;
    }

    let first_fixed = pinned.is_some_and(|p| first.touches(p));
    let second_fixed = pinned.is_some_and(|p| second.touches(p));
    let push = result.normal * result.penetration;

    match (first_fixed, second_fixed) {
        (false, false) => {
            translate(first, particles, -push * 0.5);
            translate(second, particles, push * 0.5);
        }
        (true, false) => translate(second, particles, push),
        (false, true) => translate(first, particles, -push),
        (true, true) => return false,
    }
    true
}

/// Run `iterations` sweeps over every unordered pair of distinct sticks.
///
/// With `skip_joined`, pairs that share a particle are left alone. A joined
/// pair that is separated keeps its shared particle in place, since it gets
/// equal and opposite pushes. Returns how many separations were applied.
pub fn resolve_overlaps(
    particles: &mut [Particle],
    sticks: &[Stick],
    pinned: Option<usize>,
    iterations: u32,
    skip_joined: bool,
) -> usize {
    let mut pushes = 0;
    for _ in 0..iterations {
        for i in 0..sticks.len() {
            for j in (i + 1)..sticks.len() {
                if skip_joined && sticks[i].shares_particle(&sticks[j]) {
                    continue;
                }
                if separate_pair(&sticks[i], &sticks[j], particles, pinned) {
                    pushes += 1;
                }
            }
        }
    }
    pushes
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two horizontal sticks of length 10, stacked `gap` apart
    fn stacked(gap: f32) -> (Vec<Particle>, [Stick; 2]) {
        let particles = vec![
            Particle::new(Vec2::new(0.0, 0.0)),
            Particle::new(Vec2::new(10.0, 0.0)),
            Particle::new(Vec2::new(0.0, gap)),
            Particle::new(Vec2::new(10.0, gap)),
        ];
        let sticks = [Stick::new(0, 1, 10.0, 4.0, 2.0), Stick::new(2, 3, 10.0, 4.0, 2.0)];
        (particles, sticks)
    }

    #[test]
    fn test_overlap_detected() {
        let (particles, sticks) = stacked(5.0);
        let result = segment_overlap(&sticks[0], &sticks[1], &particles);
        assert!(result.hit);
        assert!((result.penetration - 3.0).abs() < 1e-5);
        assert!((result.normal - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn test_no_overlap_when_apart() {
        let (particles, sticks) = stacked(9.0);
        assert!(!segment_overlap(&sticks[0], &sticks[1], &particles).hit);
    }

    #[test]
    fn test_separation_is_symmetric() {
        let (mut particles, sticks) = stacked(5.0);
        let before: Vec<Vec2> = particles.iter().map(|p| p.pos).collect();
        assert!(separate_pair(&sticks[0], &sticks[1], &mut particles, None));

        let moved: Vec<Vec2> = particles.iter().zip(&before).map(|(p, b)| p.pos - *b).collect();
        // Both ends of a segment move together
        assert_eq!(moved[0], moved[1]);
        assert_eq!(moved[2], moved[3]);
        // Equal and opposite
        assert!((moved[0] + moved[2]).length() < 1e-6);
        assert!((moved[0].length() - 1.5).abs() < 1e-5);
        // Now just touching
        assert!(!segment_overlap(&sticks[0], &sticks[1], &particles).hit);
    }

    #[test]
    fn test_segments_keep_their_length() {
        let (mut particles, sticks) = stacked(2.0);
        separate_pair(&sticks[0], &sticks[1], &mut particles, None);
        for stick in &sticks {
            assert!((stick.current_length(&particles) - 10.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_coincident_centers_skipped() {
        let (mut particles, sticks) = stacked(0.0);
        let before: Vec<Vec2> = particles.iter().map(|p| p.pos).collect();
        assert!(!separate_pair(&sticks[0], &sticks[1], &mut particles, None));
        let after: Vec<Vec2> = particles.iter().map(|p| p.pos).collect();
        assert_eq!(before, after);
        assert!(after.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_pinned_segment_stays() {
        let (mut particles, sticks) = stacked(5.0);
        separate_pair(&sticks[0], &sticks[1], &mut particles, Some(1));
        assert_eq!(particles[0].pos, Vec2::new(0.0, 0.0));
        assert_eq!(particles[1].pos, Vec2::new(10.0, 0.0));
        assert!((particles[2].pos.y - 8.0).abs() < 1e-5);
    }

    /// Two sticks sharing particle 1, folded onto each other
    fn folded() -> (Vec<Particle>, [Stick; 2]) {
        let particles = vec![
            Particle::new(Vec2::new(0.0, 0.0)),
            Particle::new(Vec2::new(10.0, 0.0)),
            Particle::new(Vec2::new(1.0, 1.0)),
        ];
        let sticks = [Stick::new(0, 1, 10.0, 4.0, 2.0), Stick::new(1, 2, 9.0, 4.0, 2.0)];
        (particles, sticks)
    }

    #[test]
    fn test_resolve_separates_joined_sticks() {
        let (mut particles, sticks) = folded();
        let before = segment_overlap(&sticks[0], &sticks[1], &particles);
        assert!(before.hit);

        assert!(resolve_overlaps(&mut particles, &sticks, None, 3, false) > 0);
        // The shared particle gets equal and opposite pushes
        assert!((particles[1].pos - Vec2::new(10.0, 0.0)).length() < 1e-4);
        let after = segment_overlap(&sticks[0], &sticks[1], &particles);
        assert!(after.penetration < before.penetration);
    }

    #[test]
    fn test_resolve_can_skip_joined_sticks() {
        let (mut particles, sticks) = folded();
        assert_eq!(resolve_overlaps(&mut particles, &sticks, None, 3, true), 0);
        assert_eq!(particles[2].pos, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_resolve_counts_pushes() {
        let (mut particles, sticks) = stacked(5.0);
        // One push on the first sweep, none after
        assert_eq!(resolve_overlaps(&mut particles, &sticks, None, 3, false), 1);
    }
}
