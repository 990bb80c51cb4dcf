//! The mixer: the single owner of the active generator set and master gain.
//!
//! The mixer keeps its own clock, advanced one sample at a time by
//! [`render`](Mixer::render). All automation is scheduled against that
//! clock, so ramps line up with what the listener actually hears.

use super::param::Param;
use super::soundscape::soundscape;
use super::voice::Voice;
use crate::config::AudioConfig;
use crate::phase::PhaseId;
use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// The voices bound to one phase.
#[derive(Debug, Clone)]
pub struct GeneratorSet {
    pub phase: PhaseId,
    /// Increments with every bind; identifies which binding built the set.
    pub generation: u64,
    voices: Vec<Voice>,
}

impl GeneratorSet {
    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Whether every voice has been stopped.
    pub fn is_silent(&self) -> bool {
        self.voices.iter().all(|v| !v.is_running())
    }

    /// Stop every voice, ignoring voices that already stopped.
    fn stop_all(&mut self) {
        for voice in &mut self.voices {
            if let Err(e) = voice.stop() {
                debug!("teardown of {} generator: {}", self.phase, e);
            }
        }
    }
}

/// Additive oscillator mixer with a master gain stage.
#[derive(Debug)]
pub struct Mixer {
    sample_rate: f32,
    clock: f64,
    master: Param,
    baseline: f32,
    mute_time_constant: f32,
    fade_in: f32,
    muted: bool,
    active: Option<GeneratorSet>,
    generation: u64,
    rng: SmallRng,
}

impl Mixer {
    pub fn new(config: &AudioConfig) -> Self {
        let baseline = config.master_volume;
        let initial = if config.start_muted { 0.0 } else { baseline };
        Self {
            sample_rate: config.sample_rate.max(1) as f32,
            clock: 0.0,
            master: Param::new(initial),
            baseline,
            mute_time_constant: config.mute_time_constant,
            fade_in: config.fade_in,
            muted: config.start_muted,
            active: None,
            generation: 0,
            rng: match config.rng_seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_entropy(),
            },
        }
    }

    /// Seconds on the audio clock.
    #[inline]
    pub fn now(&self) -> f64 {
        self.clock
    }

    #[inline]
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Switch to the output device's rate. The clock keeps its position.
    pub fn set_sample_rate(&mut self, rate: f32) {
        if rate > 0.0 {
            self.sample_rate = rate;
        }
    }

    #[inline]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Master gain at the current clock time.
    #[inline]
    pub fn master_gain(&self) -> f32 {
        self.master.value_at(self.clock)
    }

    /// The bound generator set, if any.
    #[inline]
    pub fn active(&self) -> Option<&GeneratorSet> {
        self.active.as_ref()
    }

    /// Number of bindings performed so far.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Tear down the current set and build the one for `phase`.
    ///
    /// Returns the retired set, fully stopped and disconnected.
    pub fn bind(&mut self, phase: PhaseId) -> Option<GeneratorSet> {
        let retired = self.unbind();
        self.generation += 1;
        let voices = soundscape(phase, self.clock, self.fade_in, &mut self.rng);
        debug!(
            "bound {} voices for {} (generation {})",
            voices.len(),
            phase,
            self.generation
        );
        self.active = Some(GeneratorSet {
            phase,
            generation: self.generation,
            voices,
        });
        retired
    }

    /// Stop and drop the current set.
    pub fn unbind(&mut self) -> Option<GeneratorSet> {
        let mut retired = self.active.take()?;
        retired.stop_all();
        debug!(
            "tore down {} voices for {}",
            retired.voices.len(),
            retired.phase
        );
        Some(retired)
    }

    /// Glide the master gain toward silence or back to the baseline.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        let target = if muted { 0.0 } else { self.baseline };
        self.master.set_target(target, self.clock, self.mute_time_constant);
    }

    /// Mix one sample and advance the clock.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let t = self.clock;
        let mut sum = 0.0;
        if let Some(set) = self.active.as_mut() {
            for voice in &mut set.voices {
                sum += voice.next_sample(t, self.sample_rate);
            }
        }
        let out = (sum * self.master.value_at(t)).tanh();
        self.clock += 1.0 / self.sample_rate as f64;
        out
    }

    /// Fill an interleaved buffer, writing the same sample to every channel.
    pub fn render(&mut self, out: &mut [f32], channels: usize) {
        for frame in out.chunks_mut(channels.max(1)) {
            let s = self.next_sample();
            frame.fill(s);
        }
    }

    /// Run the clock forward by `seconds` without keeping the output.
    pub fn advance(&mut self, seconds: f64) {
        let frames = (seconds * self.sample_rate as f64).round() as usize;
        for _ in 0..frames {
            self.next_sample();
        }
    }

    #[cfg(test)]
    fn active_mut(&mut self) -> Option<&mut GeneratorSet> {
        self.active.as_mut()
    }
}
