//! Headless tour of every phase.
//!
//! ```text
//! RUST_LOG=info cosmogenesis [config.json] [seconds]
//! ```
//!
//! Runs the tour at a fixed 60 Hz and logs buffer statistics as each phase
//! ends. With the `playback` feature the loop runs in real time and the
//! soundtrack plays through the default output device.

use cosmogenesis::prelude::*;
use log::{error, info};
use std::process::ExitCode;

const FRAME_RATE: f32 = 60.0;
const DEFAULT_SECONDS: f64 = 45.0;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match UniverseConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("failed to load {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => UniverseConfig::cosmic_dust(),
    };
    let seconds = args
        .next()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(DEFAULT_SECONDS);

    match run(config, seconds) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: UniverseConfig, seconds: f64) -> Result<(), ConfigError> {
    let mut universe = Universe::new(config)?;

    #[cfg(feature = "playback")]
    let _output = match AudioOutput::start(universe.audio()) {
        Ok(output) => Some(output),
        Err(e) => {
            log::warn!("continuing without sound: {}", e);
            None
        }
    };

    let mut clock = FrameClock::new();
    if cfg!(not(feature = "playback")) {
        clock.set_fixed_delta(Some(1.0 / FRAME_RATE));
    }

    let mut tour = Tour::new();
    tour.start(universe.controller_mut(), 0.0);

    while clock.elapsed() < seconds {
        let now = clock.tick();
        let ending = universe.current_phase();
        let voices = universe.audio().generator_count();
        if tour.poll(universe.controller_mut(), now).is_some() {
            report(&universe, ending, voices);
        }
        universe.step(now);

        #[cfg(not(feature = "playback"))]
        universe.audio().advance(clock.delta() as f64);
        #[cfg(feature = "playback")]
        std::thread::sleep(std::time::Duration::from_secs_f32(1.0 / FRAME_RATE));
    }
    report(&universe, universe.current_phase(), universe.audio().generator_count());

    info!(
        "ran {} frames over {:.1}s; audio clock at {:.1}s",
        universe.frame(),
        clock.elapsed(),
        universe.audio().now()
    );
    Ok(())
}

/// Log one line for `phase`. `voices` is sampled before any rebind so it
/// belongs to the same phase as the label.
fn report(universe: &Universe, phase: PhaseId, voices: usize) {
    let buffers = universe.buffers();
    let count = buffers.count().max(1);
    let mean_size = buffers.sizes().iter().sum::<f32>() / count as f32;
    info!(
        "{:<16} frame {:>5}  mean radius {:>7.2}  mean size {:>5.1}  voices {}",
        phase.phase().label,
        universe.frame(),
        buffers.mean_radius(),
        mean_size,
        voices
    );
}
