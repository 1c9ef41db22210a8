//! Reference ragdoll topology and initial pose
//!
//! Pixel coordinates in the 800x600 reference frame, y pointing down.
//! Joint limits are world-space directions of each stick measured from its
//! anchor end, so π/2 means "hanging straight down".

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_6};

use super::body::Body;
use crate::error::SimError;

/// Particle indices of the reference skeleton
pub mod parts {
    pub const HEAD: usize = 0;
    pub const UPPER_TORSO: usize = 1;
    pub const LOWER_TORSO: usize = 2;
    pub const LEFT_UPPER_ARM: usize = 3;
    pub const LEFT_LOWER_ARM: usize = 4;
    pub const RIGHT_UPPER_ARM: usize = 5;
    pub const RIGHT_LOWER_ARM: usize = 6;
    pub const LEFT_UPPER_LEG: usize = 7;
    pub const LEFT_LOWER_LEG: usize = 8;
    pub const RIGHT_UPPER_LEG: usize = 9;
    pub const RIGHT_LOWER_LEG: usize = 10;

    pub const COUNT: usize = 11;
}

/// Stick indices of the reference skeleton
pub mod bones {
    pub const NECK: usize = 0;
    pub const SPINE: usize = 1;
    pub const LEFT_SHOULDER: usize = 2;
    pub const RIGHT_SHOULDER: usize = 3;
    pub const LEFT_ELBOW: usize = 4;
    pub const RIGHT_ELBOW: usize = 5;
    pub const LEFT_HIP: usize = 6;
    pub const RIGHT_HIP: usize = 7;
    pub const LEFT_KNEE: usize = 8;
    pub const RIGHT_KNEE: usize = 9;

    pub const COUNT: usize = 10;
}

/// Initial pose, indexed by `parts`
pub const INITIAL_POSE: [(f32, f32); parts::COUNT] = [
    (400.0, 100.0), // head
    (400.0, 140.0), // upper torso
    (400.0, 220.0), // lower torso
    (370.0, 180.0), // left upper arm
    (350.0, 230.0), // left lower arm
    (430.0, 180.0), // right upper arm
    (450.0, 230.0), // right lower arm
    (385.0, 290.0), // left upper leg
    (380.0, 360.0), // left lower leg
    (415.0, 290.0), // right upper leg
    (420.0, 360.0), // right lower leg
];

/// (anchor, tip, major radius, minor radius), indexed by `bones`
const STICKS: [(usize, usize, f32, f32); bones::COUNT] = {
    use parts::*;
    [
        (UPPER_TORSO, HEAD, 8.0, 6.0),
        (UPPER_TORSO, LOWER_TORSO, 16.0, 12.0),
        (UPPER_TORSO, LEFT_UPPER_ARM, 8.0, 6.0),
        (UPPER_TORSO, RIGHT_UPPER_ARM, 8.0, 6.0),
        (LEFT_UPPER_ARM, LEFT_LOWER_ARM, 7.0, 5.0),
        (RIGHT_UPPER_ARM, RIGHT_LOWER_ARM, 7.0, 5.0),
        (LOWER_TORSO, LEFT_UPPER_LEG, 10.0, 8.0),
        (LOWER_TORSO, RIGHT_UPPER_LEG, 10.0, 8.0),
        (LEFT_UPPER_LEG, LEFT_LOWER_LEG, 8.0, 6.0),
        (RIGHT_UPPER_LEG, RIGHT_LOWER_LEG, 8.0, 6.0),
    ]
};

/// Arms point downward, at least 30° below horizontal
const ARM_LIMIT: (f32, f32) = (FRAC_PI_6, 5.0 * FRAC_PI_6);
/// Legs stay within 30° of vertical
const LEG_LIMIT: (f32, f32) = (FRAC_PI_2 - FRAC_PI_6, FRAC_PI_2 + FRAC_PI_6);

const JOINTS: [(usize, (f32, f32)); 8] = {
    use bones::*;
    [
        (LEFT_SHOULDER, ARM_LIMIT),
        (RIGHT_SHOULDER, ARM_LIMIT),
        (LEFT_ELBOW, ARM_LIMIT),
        (RIGHT_ELBOW, ARM_LIMIT),
        (LEFT_HIP, LEG_LIMIT),
        (RIGHT_HIP, LEG_LIMIT),
        (LEFT_KNEE, LEG_LIMIT),
        (RIGHT_KNEE, LEG_LIMIT),
    ]
};

/// Build the reference ragdoll: 11 particles, 10 sticks, limits on
/// shoulders, elbows, hips and knees, rooted at the upper torso.
///
/// Shoulder limits are recorded but never applied, since shoulders touch
/// the root.
pub fn ragdoll() -> Result<Body, SimError> {
    ragdoll_at(Vec2::ZERO)
}

/// The reference ragdoll shifted by `offset`
pub fn ragdoll_at(offset: Vec2) -> Result<Body, SimError> {
    let mut builder = Body::builder();
    for (x, y) in INITIAL_POSE {
        builder.particle(Vec2::new(x, y) + offset);
    }
    for (a, b, major, minor) in STICKS {
        builder.stick(a, b, major, minor);
    }
    for (stick, (min, max)) in JOINTS {
        builder.joint(stick, min, max);
    }
    builder.root(parts::UPPER_TORSO).head(parts::HEAD);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle_between;

    #[test]
    fn test_reference_topology() {
        let body = ragdoll().unwrap();
        assert_eq!(body.particles().len(), 11);
        assert_eq!(body.sticks().len(), 10);
        assert_eq!(body.joint_limits().count(), 8);
        assert_eq!(body.root(), parts::UPPER_TORSO);
        assert_eq!(body.head(), Some(parts::HEAD));
        assert!(body.joint_limit(bones::NECK).is_none());
        assert!(body.joint_limit(bones::SPINE).is_none());
        assert!(body.joint_limit(bones::LEFT_KNEE).is_some());
    }

    #[test]
    fn test_rest_lengths_match_pose() {
        let body = ragdoll().unwrap();
        let rest = body.rest_lengths();
        assert!((rest[bones::NECK] - 40.0).abs() < 1e-4);
        assert!((rest[bones::SPINE] - 80.0).abs() < 1e-4);
        assert!((rest[bones::LEFT_SHOULDER] - 50.0).abs() < 1e-4);
        assert_eq!(rest[bones::LEFT_KNEE], rest[bones::RIGHT_KNEE]);
        assert_eq!(body.stick_lengths(), rest);
    }

    #[test]
    fn test_initial_pose_respects_limits() {
        let body = ragdoll().unwrap();
        for limit in body.joint_limits() {
            let stick = body.sticks()[limit.stick];
            let angle = angle_between(body.positions()[stick.a], body.positions()[stick.b]);
            assert!(
                angle >= limit.min_angle && angle <= limit.max_angle,
                "stick {} starts at {} outside [{}, {}]",
                limit.stick,
                angle,
                limit.min_angle,
                limit.max_angle
            );
        }
    }

    #[test]
    fn test_initial_pose_inside_viewport() {
        let body = ragdoll().unwrap();
        for pos in body.positions() {
            assert!(pos.x >= 0.0 && pos.x <= 800.0);
            assert!(pos.y >= 0.0 && pos.y <= 600.0);
        }
    }

    #[test]
    fn test_offset_pose() {
        let body = ragdoll_at(Vec2::new(-100.0, 50.0)).unwrap();
        assert_eq!(body.positions()[parts::HEAD], Vec2::new(300.0, 150.0));
        assert_eq!(body.rest_lengths(), ragdoll().unwrap().rest_lengths());
    }
}
