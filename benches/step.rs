//! # Frame step benchmark
//!
//! Measures one `Universe::step` (target computation plus spring
//! integration) for each phase at the two preset particle counts.
//!
//! Run with: `cargo bench --bench step`

use cosmogenesis::{AudioConfig, PhaseId, Universe, UniverseConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for config in [UniverseConfig::cosmic_dust(), UniverseConfig::dense()] {
        let count = config.particle_count;
        for phase in PhaseId::order() {
            let config = config
                .clone()
                .with_initial_phase(*phase)
                .with_rng_seed(1)
                .with_star_count(0)
                .with_audio(AudioConfig {
                    start_muted: true,
                    ..AudioConfig::default()
                });
            let Ok(mut universe) = Universe::new(config) else {
                continue;
            };

            let mut now = 0.0;
            group.bench_with_input(BenchmarkId::new(phase.as_str(), count), &count, |b, _| {
                b.iter(|| {
                    now += 1.0 / 60.0;
                    universe.step(black_box(now));
                })
            });
        }
    }

    group.finish();
}

fn bench_audio(c: &mut Criterion) {
    let config = UniverseConfig::default().with_particle_count(1).with_rng_seed(1);
    let Ok(universe) = Universe::new(config) else {
        return;
    };
    let audio = universe.audio().clone();
    audio.bind(PhaseId::GalaxyFormation);
    let mut buffer = vec![0.0f32; 1024];

    c.bench_function("audio/render_512_stereo", |b| {
        b.iter(|| audio.render(black_box(&mut buffer), 2))
    });
}

criterion_group!(benches, bench_step, bench_audio);
criterion_main!(benches);
