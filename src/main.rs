//! Walker Ragdoll entry point
//!
//! Headless runner: drives the reference ragdoll with a seeded pointer
//! script and prints the final frame's draw list as JSON.
//!
//! Usage: `walker-ragdoll [config.json|-] [frames] [seed]`

use std::process::ExitCode;

use walker_ragdoll::consts::SIM_DT;
use walker_ragdoll::renderer::{render_primitives, tessellate};
use walker_ragdoll::sim::{PointerScript, ragdoll, step};
use walker_ragdoll::{SimError, SimulationConfig};

const DEFAULT_FRAMES: u32 = 600;
const DEFAULT_SEED: u64 = 1;

/// Parsed command line
struct RunArgs {
    config: SimulationConfig,
    frames: u32,
    seed: u64,
}

impl RunArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, SimError> {
        let config = match args.next() {
            Some(path) if path != "-" => {
                log::info!("Loading config from {}", path);
                SimulationConfig::load(&path)?
            }
            _ => SimulationConfig::default(),
        };
        let frames = match args.next() {
            Some(s) => s
                .parse()
                .map_err(|_| SimError::Config(format!("invalid frame count: {s}")))?,
            None => DEFAULT_FRAMES,
        };
        let seed = match args.next() {
            Some(s) => s
                .parse()
                .map_err(|_| SimError::Config(format!("invalid seed: {s}")))?,
            None => DEFAULT_SEED,
        };
        Ok(Self {
            config,
            frames,
            seed,
        })
    }
}

fn run() -> Result<(), SimError> {
    let RunArgs {
        config,
        frames,
        seed,
    } = RunArgs::parse(std::env::args().skip(1))?;

    let mut body = ragdoll()?;
    let mut script = PointerScript::new(seed);
    log::info!(
        "Running {} frames ({:.1}s) with seed {}",
        frames,
        frames as f32 * SIM_DT,
        script.seed()
    );

    let mut grabs = 0u32;
    for _ in 0..frames {
        let input = script.next_input(&body, &config);
        let was_dragging = body.drag_target().is_some();
        step(&mut body, &input, &config);
        if !was_dragging && body.drag_target().is_some() {
            grabs += 1;
        }
    }

    let stretch = body
        .stick_lengths()
        .iter()
        .zip(body.rest_lengths())
        .map(|(len, rest)| (len - rest).abs() / rest)
        .fold(0.0f32, f32::max);
    let primitives = render_primitives(&body);
    log::info!(
        "Done: {} grabs, max stretch {:.1}%, {} primitives, {} vertices",
        grabs,
        stretch * 100.0,
        primitives.len(),
        tessellate(&primitives).len()
    );

    println!("{}", serde_json::to_string(&primitives)?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Walker Ragdoll starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
