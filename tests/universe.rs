//! End-to-end tests driving a whole universe frame by frame.
//!
//! These use fixed seeds and a simulated 60 Hz clock so they are
//! deterministic and independent of the wall clock.

use cosmogenesis::target::{self, Jitter, TargetInput, TargetRules};
use cosmogenesis::{AudioConfig, PhaseId, Seed, Tour, Universe, UniverseConfig, Vec3};

const FRAME: f64 = 1.0 / 60.0;

fn universe(count: u32, phase: PhaseId) -> Universe {
    let config = UniverseConfig::default()
        .with_particle_count(count)
        .with_star_count(100)
        .with_initial_phase(phase)
        .with_rng_seed(2024)
        .with_audio(AudioConfig {
            sample_rate: 8_000,
            rng_seed: Some(2024),
            ..AudioConfig::default()
        });
    Universe::new(config).unwrap()
}

/// Step `frames` frames starting at `start`, returning the time after the last.
fn run(universe: &mut Universe, start: f64, frames: usize) -> f64 {
    let mut now = start;
    for _ in 0..frames {
        universe.step(now);
        now += FRAME;
    }
    now
}

fn input(universe: &Universe, index: usize, elapsed: f32, global: f64) -> TargetInput {
    let particle = universe.particles()[index];
    TargetInput {
        index,
        count: universe.particle_count(),
        seed: particle.seed,
        position: particle.position,
        elapsed_in_phase: elapsed,
        global_time: global,
    }
}

// ============================================================================
// Phase formations
// ============================================================================

#[test]
fn test_singularity_targets_within_point() {
    let universe = universe(4_000, PhaseId::Singularity);
    let rules = TargetRules::default();
    let mut jitter = Jitter::new(5);

    for i in 0..universe.particle_count() {
        let at_start = input(&universe, i, 0.0, 0.0);
        let target = rules.compute(Some(PhaseId::Singularity), &at_start, &mut jitter);
        assert!(target.position.length() < 0.05, "particle {} target {:?}", i, target.position);
        assert!((10.0..=25.0).contains(&target.size));
    }
}

#[test]
fn test_singularity_collapses_particles() {
    let mut universe = universe(4_000, PhaseId::Singularity);
    let before = {
        universe.step(0.0);
        universe.buffers().mean_radius()
    };
    run(&mut universe, FRAME, 600);

    let after = universe.buffers().mean_radius();
    assert!(before > 10.0, "spawn cloud mean radius {}", before);
    assert!(after < 0.06, "collapsed mean radius {}", after);
}

#[test]
fn test_galaxy_core_thicker_than_rim() {
    let seed = Seed {
        r1: 0.4,
        ..Seed::default()
    };
    let count = 4_000;
    let at = |index: usize| {
        let input = TargetInput {
            index,
            count,
            seed,
            position: Vec3::ZERO,
            elapsed_in_phase: 1.0,
            global_time: 1.0,
        };
        target::galaxy_formation(&input, &mut Jitter::new(0))
    };

    let core = at(0).position.y.abs();
    let rim = at(count - 1).position.y.abs();
    assert!(core > rim, "core {} rim {}", core, rim);
    assert!((core - 20.0).abs() < 1e-4);
}

#[test]
fn test_solar_system_star_and_disk() {
    let mut universe = universe(2_000, PhaseId::SolarSystem);
    run(&mut universe, 0.0, 900);

    let buffers = universe.buffers();
    let star_count = (2_000.0 * target::STAR_FRACTION) as usize;
    for i in 0..star_count {
        assert_eq!(buffers.size(i), 80.0);
        let position = buffers.position(i);
        assert!(position.length() < 1.5, "star particle {} at {:?}", i, position);
    }
    for i in star_count..universe.particle_count() {
        assert_eq!(buffers.size(i), 8.0);
    }
}

#[test]
fn test_pure_phases_are_deterministic() {
    let universe = universe(64, PhaseId::Inflation);
    let rules = TargetRules::default();
    for phase in [
        PhaseId::QuarkGluonPlasma,
        PhaseId::Inflation,
        PhaseId::GalaxyFormation,
        PhaseId::SolarSystem,
    ] {
        for i in 0..universe.particle_count() {
            let inp = input(&universe, i, 2.5, 12.0);
            let a = rules.compute(Some(phase), &inp, &mut Jitter::new(1));
            let b = rules.compute(Some(phase), &inp, &mut Jitter::new(99));
            assert_eq!(a, b, "{} particle {}", phase, i);
        }
    }
}

// ============================================================================
// Controller
// ============================================================================

#[test]
fn test_elapsed_resets_on_transition() {
    let mut universe = universe(100, PhaseId::Singularity);
    let now = run(&mut universe, 0.0, 30);
    universe.transition_to(PhaseId::Inflation, 10.0);

    let elapsed = universe.controller().elapsed(10.001);
    assert!((elapsed - 0.001).abs() < 1e-9);
    assert_eq!(universe.controller().elapsed(now), 0.0);
}

#[test]
fn test_unknown_phase_id_is_ignored() {
    let mut universe = universe(100, PhaseId::GalaxyFormation);
    run(&mut universe, 0.0, 10);
    let generation = universe.audio().binding_generation();

    assert_eq!(universe.transition_to_raw("BIG_CRUNCH", 5.0), None);
    assert_eq!(universe.current_phase(), PhaseId::GalaxyFormation);
    assert_eq!(universe.controller().started_at(), 0.0);
    assert_eq!(universe.audio().binding_generation(), generation);

    assert_eq!(
        universe.transition_to_raw("SOLAR_SYSTEM", 6.0),
        Some(PhaseId::GalaxyFormation)
    );
    assert_eq!(universe.current_phase(), PhaseId::SolarSystem);
}

#[test]
fn test_buffer_lengths_never_change() {
    let mut universe = universe(300, PhaseId::Singularity);
    let mut now = 0.0;
    for phase in PhaseId::order().iter().chain(PhaseId::order()) {
        universe.transition_to(*phase, now);
        now = run(&mut universe, now, 20);

        let buffers = universe.buffers();
        buffers.expect_count(300);
        assert_eq!(buffers.positions().len(), 900);
        assert_eq!(buffers.colors().len(), 900);
        assert_eq!(buffers.sizes().len(), 300);
        assert_eq!(buffers.angles().len(), 300);
    }
}

#[test]
fn test_tour_visits_every_phase_in_order() {
    let mut universe = universe(50, PhaseId::Singularity);
    let mut tour = Tour::new();
    tour.start(universe.controller_mut(), 0.0);
    assert_eq!(universe.current_phase(), PhaseId::QuarkGluonPlasma);

    let mut visited = Vec::new();
    for frame in 0..2_400 {
        let now = frame as f64 * FRAME;
        if let Some(phase) = tour.poll(universe.controller_mut(), now) {
            visited.push(phase);
        }
        universe.step(now);
    }

    assert_eq!(
        visited,
        vec![
            PhaseId::Inflation,
            PhaseId::GalaxyFormation,
            PhaseId::SolarSystem,
            PhaseId::Singularity,
            PhaseId::QuarkGluonPlasma,
        ]
    );
}

// ============================================================================
// Audio
// ============================================================================

#[test]
fn test_transition_leaves_one_generator_set() {
    let mut universe = universe(10, PhaseId::Inflation);
    universe.transition_to(PhaseId::QuarkGluonPlasma, 1.0);
    universe.transition_to(PhaseId::GalaxyFormation, 2.0);

    let audio = universe.audio();
    assert_eq!(audio.active_phase(), Some(PhaseId::GalaxyFormation));
    assert_eq!(audio.generator_count(), 3);
    audio.with_mixer(|mixer| {
        let set = mixer.active().unwrap();
        assert_eq!(set.generation, 3);
        assert!(!set.is_silent());
    });
}

#[test]
fn test_mute_during_solar_system_keeps_generators() {
    let universe = universe(10, PhaseId::SolarSystem);
    let audio = universe.audio();
    audio.advance(0.5);
    let generation = audio.binding_generation();
    let unmuted = audio.master_gain();

    universe.set_muted(true);
    assert!(universe.is_muted());
    audio.advance(0.05);
    let gliding = audio.master_gain();
    assert!(gliding < unmuted && gliding > 0.0, "gain {}", gliding);

    audio.advance(1.0);
    assert!(audio.master_gain() < 1e-3);
    assert_eq!(audio.active_phase(), Some(PhaseId::SolarSystem));
    assert_eq!(audio.generator_count(), 2);
    assert_eq!(audio.binding_generation(), generation);
}

#[test]
fn test_muted_render_is_silent() {
    let config = UniverseConfig::default()
        .with_particle_count(10)
        .with_audio(AudioConfig {
            sample_rate: 8_000,
            start_muted: true,
            rng_seed: Some(3),
            ..AudioConfig::default()
        });
    let universe = Universe::new(config).unwrap();
    let mut out = vec![1.0; 256];
    universe.audio().render(&mut out, 2);
    assert!(out.iter().all(|s| *s == 0.0));
}
