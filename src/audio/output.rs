//! Audio output through the default device (feature `playback`).

use super::AudioEngine;
use crate::error::AudioError;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use log::{info, warn};

/// A running output stream. Dropping it stops playback.
pub struct AudioOutput {
    _stream: cpal::Stream,
    sample_rate: u32,
    channels: u16,
}

impl AudioOutput {
    /// Open the default output device and start rendering `engine` into it.
    ///
    /// The engine's mixer is switched to the device's sample rate.
    pub fn start(engine: &AudioEngine) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;
        let supported = device
            .default_output_config()
            .map_err(|e| AudioError::StreamConfig(e.to_string()))?;

        let sample_rate = supported.sample_rate().0;
        let channels = supported.channels();
        engine.with_mixer(|mixer| mixer.set_sample_rate(sample_rate as f32));

        let config: cpal::StreamConfig = supported.config();
        let stream = match supported.sample_format() {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config, engine.clone()),
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config, engine.clone()),
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config, engine.clone()),
            other => {
                return Err(AudioError::StreamConfig(format!(
                    "unsupported sample format {:?}",
                    other
                )))
            }
        }?;

        stream
            .play()
            .map_err(|e| AudioError::PlayStream(e.to_string()))?;
        info!(
            "audio output started: {} Hz, {} channels",
            sample_rate, channels
        );

        Ok(Self {
            _stream: stream,
            sample_rate,
            channels,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    engine: AudioEngine,
) -> Result<cpal::Stream, AudioError>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = config.channels as usize;
    let mut scratch: Vec<f32> = Vec::new();

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                scratch.resize(data.len(), 0.0);
                engine.render(&mut scratch, channels);
                for (out, s) in data.iter_mut().zip(&scratch) {
                    *out = T::from_sample(*s);
                }
            },
            |err| warn!("audio stream error: {}", err),
            None,
        )
        .map_err(|e| AudioError::BuildStream(e.to_string()))
}
