//! Per-phase generator graphs.

use super::voice::{Lfo, Voice, Waveform};
use crate::phase::PhaseId;
use rand::Rng;

/// Build the voices for `phase`, with fade-ins starting at `now`.
///
/// | Phase | Voices |
/// |-------|--------|
/// | Singularity | sawtooth 50 → 200 Hz over 5 s, 10 Hz detune wobble |
/// | Quark-gluon plasma | square 100 → 800 Hz, detuned sawtooth 150 → 600 Hz, over 8 s |
/// | Inflation | sine 800 → 50 Hz over 4 s |
/// | Galaxy formation | A2 / E3 / G3 sines, randomly detuned |
/// | Solar system | C3 triangle and G3 sine drone |
pub fn soundscape<R: Rng + ?Sized>(
    phase: PhaseId,
    now: f64,
    fade_in: f32,
    rng: &mut R,
) -> Vec<Voice> {
    match phase {
        PhaseId::Singularity => {
            // Deep, rising rumble
            let mut rumble = Voice::new(Waveform::Sawtooth, 50.0)
                .fade_in(0.2, now, fade_in)
                .with_lfo(Lfo::new(10.0, 500.0));
            rumble.frequency.exponential_ramp_to(200.0, now, now + 5.0);
            vec![rumble]
        }
        PhaseId::QuarkGluonPlasma => {
            let mut low = Voice::new(Waveform::Square, 100.0).fade_in(0.05, now, fade_in);
            low.frequency.linear_ramp_to(800.0, now, now + 8.0);

            let mut high = Voice::new(Waveform::Sawtooth, 150.0)
                .fade_in(0.05, now, fade_in)
                .detuned(100.0, now);
            high.frequency.linear_ramp_to(600.0, now, now + 8.0);

            vec![low, high]
        }
        PhaseId::Inflation => {
            // Cooling whoosh
            let mut whoosh = Voice::new(Waveform::Sine, 800.0).fade_in(0.2, now, fade_in);
            whoosh.frequency.exponential_ramp_to(50.0, now, now + 4.0);
            vec![whoosh]
        }
        PhaseId::GalaxyFormation => [110.0, 164.81, 196.0]
            .into_iter()
            .map(|hz| {
                Voice::new(Waveform::Sine, hz)
                    .fade_in(0.1, now, fade_in)
                    .detuned(rng.gen_range(0.0..10.0), now)
            })
            .collect(),
        PhaseId::SolarSystem => vec![
            Voice::new(Waveform::Triangle, 130.81).fade_in(0.05, now, fade_in),
            Voice::new(Waveform::Sine, 196.0).fade_in(0.1, now, fade_in),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn build(phase: PhaseId) -> Vec<Voice> {
        let mut rng = SmallRng::seed_from_u64(0);
        soundscape(phase, 0.0, 2.0, &mut rng)
    }

    #[test]
    fn test_voice_counts() {
        assert_eq!(build(PhaseId::Singularity).len(), 1);
        assert_eq!(build(PhaseId::QuarkGluonPlasma).len(), 2);
        assert_eq!(build(PhaseId::Inflation).len(), 1);
        assert_eq!(build(PhaseId::GalaxyFormation).len(), 3);
        assert_eq!(build(PhaseId::SolarSystem).len(), 2);
    }

    #[test]
    fn test_every_voice_fades_in() {
        for phase in PhaseId::order() {
            for voice in build(*phase) {
                assert_eq!(voice.gain.value_at(0.0), 0.0);
                assert!(voice.gain.value_at(2.0) > 0.0);
            }
        }
    }

    #[test]
    fn test_singularity_rises_and_wobbles() {
        let voices = build(PhaseId::Singularity);
        let rumble = &voices[0];
        assert!((rumble.frequency.value_at(0.0) - 50.0).abs() < 1e-3);
        assert!((rumble.frequency.value_at(5.0) - 200.0).abs() < 1e-3);
        assert!(rumble.lfo.is_some());
    }

    #[test]
    fn test_plasma_rises() {
        for voice in build(PhaseId::QuarkGluonPlasma) {
            assert!(voice.frequency.value_at(8.0) > voice.frequency.value_at(0.0));
        }
    }

    #[test]
    fn test_inflation_falls() {
        let voices = build(PhaseId::Inflation);
        assert!((voices[0].frequency.value_at(4.0) - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_galaxy_triad_slightly_detuned() {
        let voices = build(PhaseId::GalaxyFormation);
        let bases: Vec<f32> = voices.iter().map(|v| v.frequency.value_at(1.0)).collect();
        assert_eq!(bases, vec![110.0, 164.81, 196.0]);
        for voice in &voices {
            let cents = voice.detune.value_at(1.0);
            assert!((0.0..10.0).contains(&cents));
        }
    }
}
