//! Seeded pointer scripts
//!
//! Generates reproducible grab-and-drag gestures for headless runs and
//! tests. The same seed and body always produce the same inputs.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::Body;
use super::interaction::PointerInput;
use crate::config::SimulationConfig;

/// Frames of a single drag gesture
const DRAG_FRAMES: std::ops::Range<u32> = 20..60;
/// Frames of rest between gestures
const IDLE_FRAMES: std::ops::Range<u32> = 30..120;
/// Pointer travel per frame while dragging
const DRAG_SPEED: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle { frames_left: u32 },
    Drag { frames_left: u32, target: Vec2 },
}

/// Deterministic pointer input generator
#[derive(Debug, Clone)]
pub struct PointerScript {
    seed: u64,
    rng: Pcg32,
    gesture: Gesture,
    pointer: Vec2,
}

impl PointerScript {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let frames_left = rng.random_range(IDLE_FRAMES);
        Self {
            seed,
            rng,
            gesture: Gesture::Idle { frames_left },
            pointer: Vec2::ZERO,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Input for the next frame.
    ///
    /// A drag starts exactly on a random particle so it is always picked,
    /// then walks the pointer toward a random point in the viewport.
    pub fn next_input(&mut self, body: &Body, config: &SimulationConfig) -> PointerInput {
        match self.gesture {
            Gesture::Idle { frames_left } if frames_left > 0 => {
                self.gesture = Gesture::Idle {
                    frames_left: frames_left - 1,
                };
                PointerInput {
                    position: self.pointer,
                    held: false,
                }
            }
            Gesture::Idle { .. } => {
                let particles = body.particles();
                if particles.is_empty() {
                    return PointerInput::default();
                }
                let grabbed = self.rng.random_range(0..particles.len());
                self.pointer = particles[grabbed].pos;
                let target = Vec2::new(
                    self.rng.random_range(0.0..config.width),
                    self.rng.random_range(0.0..config.height),
                );
                self.gesture = Gesture::Drag {
                    frames_left: self.rng.random_range(DRAG_FRAMES),
                    target,
                };
                PointerInput {
                    position: self.pointer,
                    held: true,
                }
            }
            Gesture::Drag { frames_left, target } if frames_left > 0 => {
                let to_target = target - self.pointer;
                self.pointer += to_target.clamp_length_max(DRAG_SPEED);
                self.gesture = Gesture::Drag {
                    frames_left: frames_left - 1,
                    target,
                };
                PointerInput {
                    position: self.pointer,
                    held: true,
                }
            }
            Gesture::Drag { .. } => {
                self.gesture = Gesture::Idle {
                    frames_left: self.rng.random_range(IDLE_FRAMES),
                };
                PointerInput {
                    position: self.pointer,
                    held: false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::skeleton::ragdoll;
    use crate::sim::tick::step;

    fn run(seed: u64, frames: usize) -> (Vec<PointerInput>, Vec<Vec2>) {
        let mut body = ragdoll().unwrap();
        let config = SimulationConfig::default();
        let mut script = PointerScript::new(seed);
        let mut inputs = Vec::with_capacity(frames);
        for _ in 0..frames {
            let input = script.next_input(&body, &config);
            step(&mut body, &input, &config);
            inputs.push(input);
        }
        (inputs, body.positions())
    }

    #[test]
    fn test_same_seed_same_run() {
        let (inputs1, positions1) = run(42, 400);
        let (inputs2, positions2) = run(42, 400);
        assert_eq!(inputs1, inputs2);
        assert_eq!(positions1, positions2);
    }

    #[test]
    fn test_script_drags_something() {
        let (inputs, positions) = run(7, 400);
        assert!(inputs.iter().any(|i| i.held));
        assert!(inputs.iter().any(|i| !i.held));
        assert!(positions.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_drag_starts_on_a_particle() {
        let mut body = ragdoll().unwrap();
        let config = SimulationConfig::default();
        let mut script = PointerScript::new(3);
        loop {
            let input = script.next_input(&body, &config);
            let was_dragging = body.drag_target().is_some();
            step(&mut body, &input, &config);
            if input.held && !was_dragging {
                assert!(body.drag_target().is_some());
                break;
            }
        }
    }
}
