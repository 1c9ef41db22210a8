//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - One fixed step per frame, no wall-clock input
//! - Seeded RNG only (pointer scripts)
//! - Stable iteration order (particles and sticks by index)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod constraint;
pub mod interaction;
pub mod particle;
pub mod script;
pub mod skeleton;
pub mod tick;

pub use body::{Body, BodyBuilder};
pub use collision::{OverlapResult, resolve_overlaps, segment_overlap, separate_pair};
pub use constraint::{JointLimit, Stick};
pub use interaction::{PointerInput, apply_pointer};
pub use particle::Particle;
pub use script::PointerScript;
pub use skeleton::{bones, parts, ragdoll, ragdoll_at};
pub use tick::step;
