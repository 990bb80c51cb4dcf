//! Error types for cosmogenesis.
//!
//! The simulation itself never fails: unknown phases hold still and audio
//! faults are swallowed. Errors only surface at the edges, when loading a
//! configuration or opening an audio device.

use std::fmt;

/// A phase identifier that does not name any registered phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPhase(pub String);

impl fmt::Display for UnknownPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown phase id: {:?}", self.0)
    }
}

impl std::error::Error for UnknownPhase {}

/// Errors that can occur while loading or validating a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    Io(std::io::Error),
    /// The configuration is not valid JSON for [`UniverseConfig`](crate::UniverseConfig).
    Parse(serde_json::Error),
    /// A value is out of its accepted range.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read configuration: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse configuration: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Errors raised by the audio engine and output device.
///
/// None of these ever reach the particle simulation. Teardown errors are
/// swallowed by [`AudioEngine::bind`](crate::audio::AudioEngine::bind) and
/// device errors are logged by callers that then carry on silently.
#[derive(Debug)]
pub enum AudioError {
    /// No default output device is available.
    NoDevice,
    /// The device refused to report a usable output configuration.
    StreamConfig(String),
    /// Building the output stream failed.
    BuildStream(String),
    /// Starting playback failed.
    PlayStream(String),
    /// A generator was stopped twice.
    AlreadyStopped,
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::NoDevice => write!(f, "No audio output device available"),
            AudioError::StreamConfig(msg) => {
                write!(f, "Unsupported audio output configuration: {}", msg)
            }
            AudioError::BuildStream(msg) => write!(f, "Failed to build audio stream: {}", msg),
            AudioError::PlayStream(msg) => write!(f, "Failed to start audio stream: {}", msg),
            AudioError::AlreadyStopped => write!(f, "Sound generator already stopped"),
        }
    }
}

impl std::error::Error for AudioError {}
