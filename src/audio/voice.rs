//! Sound generators.
//!
//! A [`Voice`] is one periodic oscillator with its own gain envelope, pitch
//! automation, static detune and an optional low-frequency oscillator that
//! wobbles the detune.

use super::param::Param;
use crate::error::AudioError;
use std::f32::consts::TAU;

/// Oscillator shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    /// Sample the waveform at `phase` in `[0, 1)`. Output is in `[-1, 1]`.
    #[inline]
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (phase * TAU).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Triangle => 4.0 * (phase - 0.5).abs() - 1.0,
        }
    }
}

/// Low-frequency oscillator modulating a voice's detune.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lfo {
    /// Rate in Hz.
    pub frequency: f32,
    /// Peak deviation in cents.
    pub depth: f32,
    phase: f32,
}

impl Lfo {
    pub fn new(frequency: f32, depth: f32) -> Self {
        Self {
            frequency,
            depth,
            phase: 0.0,
        }
    }

    /// Current deviation in cents, then step forward one sample.
    #[inline]
    fn next_cents(&mut self, sample_rate: f32) -> f32 {
        let cents = Waveform::Sine.sample(self.phase) * self.depth;
        self.phase = (self.phase + self.frequency / sample_rate).fract();
        cents
    }
}

/// One oscillator-plus-envelope unit.
#[derive(Debug, Clone)]
pub struct Voice {
    pub waveform: Waveform,
    /// Base pitch in Hz.
    pub frequency: Param,
    /// Pitch offset in cents.
    pub detune: Param,
    /// Output level.
    pub gain: Param,
    pub lfo: Option<Lfo>,
    phase: f32,
    stopped: bool,
}

impl Voice {
    /// A silent voice at `frequency` Hz. Give it a gain envelope with
    /// [`fade_in`](Self::fade_in).
    pub fn new(waveform: Waveform, frequency: f32) -> Self {
        Self {
            waveform,
            frequency: Param::new(frequency),
            detune: Param::new(0.0),
            gain: Param::new(0.0),
            lfo: None,
            phase: 0.0,
            stopped: false,
        }
    }

    /// Ramp the gain from silence to `volume` over `seconds`, starting at `now`.
    pub fn fade_in(mut self, volume: f32, now: f64, seconds: f32) -> Self {
        self.gain.set_value(0.0, now);
        self.gain.linear_ramp_to(volume, now, now + seconds as f64);
        self
    }

    /// Fixed detune in cents.
    pub fn detuned(mut self, cents: f32, now: f64) -> Self {
        self.detune.set_value(cents, now);
        self
    }

    /// Attach a detune LFO.
    pub fn with_lfo(mut self, lfo: Lfo) -> Self {
        self.lfo = Some(lfo);
        self
    }

    /// Whether the voice still produces sound.
    #[inline]
    pub fn is_running(&self) -> bool {
        !self.stopped
    }

    /// Silence the voice. Stopping twice is an error the caller may ignore.
    pub fn stop(&mut self) -> Result<(), AudioError> {
        if self.stopped {
            return Err(AudioError::AlreadyStopped);
        }
        self.stopped = true;
        Ok(())
    }

    /// Effective pitch in Hz at time `t`, ignoring the LFO.
    pub fn pitch_at(&self, t: f64) -> f32 {
        self.frequency.value_at(t) * cents_to_ratio(self.detune.value_at(t))
    }

    /// Produce one sample at time `t` and advance the oscillator.
    #[inline]
    pub fn next_sample(&mut self, t: f64, sample_rate: f32) -> f32 {
        if self.stopped {
            return 0.0;
        }
        let mut cents = self.detune.value_at(t);
        if let Some(lfo) = self.lfo.as_mut() {
            cents += lfo.next_cents(sample_rate);
        }
        let hz = self.frequency.value_at(t) * cents_to_ratio(cents);

        let out = self.waveform.sample(self.phase) * self.gain.value_at(t);
        self.phase = (self.phase + hz / sample_rate).fract();
        out
    }
}

/// Frequency ratio for an offset in cents.
#[inline]
pub fn cents_to_ratio(cents: f32) -> f32 {
    (cents / 1200.0).exp2()
}
