//! Configuration for a [`Universe`](crate::Universe).
//!
//! Configurations can be built in code with the `with_*` methods or loaded
//! from JSON. Missing JSON fields fall back to their defaults.
//!
//! ```ignore
//! let config = UniverseConfig::dense()
//!     .with_initial_phase(PhaseId::GalaxyFormation)
//!     .with_rng_seed(7);
//!
//! let from_disk = UniverseConfig::load("cosmos.json")?;
//! ```

use crate::error::ConfigError;
use crate::integrator::{DEFAULT_ATTRACTION, DEFAULT_DAMPING};
use crate::phase::PhaseId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Largest particle count accepted.
pub const MAX_PARTICLES: u32 = 200_000;

fn default_particle_count() -> u32 {
    4_000
}

fn default_spawn_extent() -> f32 {
    50.0
}

fn default_attraction() -> f32 {
    DEFAULT_ATTRACTION
}

fn default_damping() -> f32 {
    DEFAULT_DAMPING
}

fn default_star_count() -> u32 {
    3_000
}

/// Complete simulation configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UniverseConfig {
    #[serde(default = "default_particle_count")]
    pub particle_count: u32,
    /// Half-size of the cube particles are scattered in at startup.
    #[serde(default = "default_spawn_extent")]
    pub spawn_extent: f32,
    #[serde(default = "default_attraction")]
    pub attraction: f32,
    #[serde(default = "default_damping")]
    pub damping: f32,
    /// Frame rate the spring constants are tuned for. When set, the
    /// integrator rescales them by the real frame delta.
    #[serde(default)]
    pub reference_rate: Option<f32>,
    #[serde(default)]
    pub initial_phase: PhaseId,
    /// Fixed seed for particle seeds and jitter. Random when absent.
    #[serde(default)]
    pub rng_seed: Option<u64>,
    /// Background stars.
    #[serde(default = "default_star_count")]
    pub star_count: u32,
    #[serde(default)]
    pub audio: AudioConfig,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            particle_count: default_particle_count(),
            spawn_extent: default_spawn_extent(),
            attraction: default_attraction(),
            damping: default_damping(),
            reference_rate: None,
            initial_phase: PhaseId::default(),
            rng_seed: None,
            star_count: default_star_count(),
            audio: AudioConfig::default(),
        }
    }
}

impl UniverseConfig {
    /// The 4,000-particle point-sprite setup.
    pub fn cosmic_dust() -> Self {
        Self::default()
    }

    /// A denser 12,000-particle setup.
    pub fn dense() -> Self {
        Self {
            particle_count: 12_000,
            ..Self::default()
        }
    }

    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_spawn_extent(mut self, extent: f32) -> Self {
        self.spawn_extent = extent;
        self
    }

    pub fn with_attraction(mut self, attraction: f32) -> Self {
        self.attraction = attraction;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_reference_rate(mut self, rate: Option<f32>) -> Self {
        self.reference_rate = rate;
        self
    }

    pub fn with_initial_phase(mut self, phase: PhaseId) -> Self {
        self.initial_phase = phase;
        self
    }

    /// Fix every random stream (particle seeds, jitter, audio detune).
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self.audio.rng_seed = Some(seed);
        self
    }

    pub fn with_star_count(mut self, count: u32) -> Self {
        self.star_count = count;
        self
    }

    pub fn with_audio(mut self, audio: AudioConfig) -> Self {
        self.audio = audio;
        self
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 || self.particle_count > MAX_PARTICLES {
            return Err(ConfigError::Invalid(format!(
                "particle_count must be between 1 and {}, got {}",
                MAX_PARTICLES, self.particle_count
            )));
        }
        if !(self.spawn_extent.is_finite() && self.spawn_extent > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "spawn_extent must be positive, got {}",
                self.spawn_extent
            )));
        }
        if !(self.attraction.is_finite() && self.attraction > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "attraction must be positive, got {}",
                self.attraction
            )));
        }
        if !(0.0..1.0).contains(&self.damping) {
            return Err(ConfigError::Invalid(format!(
                "damping must be in [0, 1), got {}",
                self.damping
            )));
        }
        if let Some(rate) = self.reference_rate {
            if !(rate.is_finite() && rate > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "reference_rate must be positive, got {}",
                    rate
                )));
            }
        }
        self.audio.validate()
    }

    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write the configuration to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

fn default_sample_rate() -> u32 {
    44_100
}

fn default_master_volume() -> f32 {
    0.1
}

fn default_mute_time_constant() -> f32 {
    0.1
}

fn default_fade_in() -> f32 {
    2.0
}

/// Audio engine settings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AudioConfig {
    /// Rate for headless rendering; an output device overrides it.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Master gain when unmuted.
    #[serde(default = "default_master_volume")]
    pub master_volume: f32,
    /// Time constant (seconds) of the mute/unmute glide.
    #[serde(default = "default_mute_time_constant")]
    pub mute_time_constant: f32,
    /// Seconds each new voice takes to fade in.
    #[serde(default = "default_fade_in")]
    pub fade_in: f32,
    #[serde(default)]
    pub start_muted: bool,
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            master_volume: default_master_volume(),
            mute_time_constant: default_mute_time_constant(),
            fade_in: default_fade_in(),
            start_muted: false,
            rng_seed: None,
        }
    }
}

impl AudioConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::Invalid("audio.sample_rate must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.master_volume) {
            return Err(ConfigError::Invalid(format!(
                "audio.master_volume must be in [0, 1], got {}",
                self.master_volume
            )));
        }
        if !(self.mute_time_constant.is_finite() && self.mute_time_constant > 0.0) {
            return Err(ConfigError::Invalid(
                "audio.mute_time_constant must be positive".into(),
            ));
        }
        if !(self.fade_in.is_finite() && self.fade_in >= 0.0) {
            return Err(ConfigError::Invalid("audio.fade_in must not be negative".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(UniverseConfig::cosmic_dust().particle_count, 4_000);
        assert_eq!(UniverseConfig::dense().particle_count, 12_000);
        assert!(UniverseConfig::dense().validate().is_ok());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = UniverseConfig::from_json("{}").unwrap();
        assert_eq!(config, UniverseConfig::default());
    }

    #[test]
    fn test_json_round_trip_preserves_overrides() {
        let config = UniverseConfig::dense()
            .with_initial_phase(PhaseId::SolarSystem)
            .with_rng_seed(9)
            .with_reference_rate(Some(60.0));
        let json = config.to_json().unwrap();
        assert!(json.contains("\"SOLAR_SYSTEM\""));
        assert_eq!(UniverseConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_partial_json() {
        let config = UniverseConfig::from_json(
            r#"{
                "particle_count": 8000,
                "initial_phase": "GALAXY",
                "audio": { "start_muted": true }
            }"#,
        )
        .unwrap();
        assert_eq!(config.particle_count, 8000);
        assert_eq!(config.initial_phase, PhaseId::GalaxyFormation);
        assert!(config.audio.start_muted);
        assert_eq!(config.audio.master_volume, 0.1);
        assert_eq!(config.damping, DEFAULT_DAMPING);
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            UniverseConfig::default().with_particle_count(0).validate(),
            Err(ConfigError::Invalid(_))
        ));
        assert!(UniverseConfig::default().with_damping(1.0).validate().is_err());
        assert!(UniverseConfig::default().with_attraction(-0.1).validate().is_err());
        assert!(UniverseConfig::default()
            .with_reference_rate(Some(0.0))
            .validate()
            .is_err());
        assert!(matches!(
            UniverseConfig::from_json(r#"{ "particle_count": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            UniverseConfig::from_json(r#"{ "initial_phase": "BIG_CRUNCH" }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            UniverseConfig::load("/nonexistent/cosmos.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
