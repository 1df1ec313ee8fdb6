//! Render configuration.
//!
//! A render is described by a small JSON document. Every field is optional
//! and falls back to the defaults below; command-line flags override
//! whatever the file sets.
//!
//! ```json
//! {
//!   "sample_rate": 44100,
//!   "channels": "stereo",
//!   "seconds": 2.0,
//!   "format": "f32",
//!   "tone": { "frequency": 277.183, "decay": 3.0 }
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use wavegen_core::wav::{Channels, SampleFormat};

/// Default sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
/// Default duration in seconds.
pub const DEFAULT_SECONDS: f32 = 2.0;
/// Default tone frequency in Hz (C#4).
pub const DEFAULT_FREQUENCY: f64 = 277.183;
/// Default drop-off rate.
pub const DEFAULT_DECAY: f64 = 3.0;

/// Parameters of a render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Samples per second, per channel.
    pub sample_rate: u32,
    /// Channel layout.
    pub channels: Channels,
    /// Duration in seconds.
    pub seconds: f32,
    /// Output sample representation.
    pub format: SampleFormat,
    /// Demo tone parameters.
    pub tone: ToneConfig,
}

/// Parameters of the built-in demo tone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToneConfig {
    /// Base frequency in Hz.
    pub frequency: f64,
    /// How quickly the tone fades; larger is faster.
    pub decay: f64,
}

/// Values given on the command line. `None` keeps the configured value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOverrides {
    /// `--sample-rate`
    pub sample_rate: Option<u32>,
    /// `--channels`
    pub channels: Option<Channels>,
    /// `--seconds`
    pub seconds: Option<f32>,
    /// `--format`
    pub format: Option<SampleFormat>,
    /// `--frequency`
    pub frequency: Option<f64>,
    /// `--decay`
    pub decay: Option<f64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: Channels::Stereo,
            seconds: DEFAULT_SECONDS,
            format: SampleFormat::Float32,
            tone: ToneConfig::default(),
        }
    }
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_FREQUENCY,
            decay: DEFAULT_DECAY,
        }
    }
}

impl RenderConfig {
    /// Parses a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse render config")
    }

    /// Reads a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Loads `path` if given, otherwise starts from defaults, then applies
    /// command-line overrides.
    pub fn resolve(path: Option<&Path>, overrides: &RenderOverrides) -> Result<Self> {
        let base = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(overrides))
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, overrides: &RenderOverrides) -> Self {
        if let Some(sample_rate) = overrides.sample_rate {
            self.sample_rate = sample_rate;
        }
        if let Some(channels) = overrides.channels {
            self.channels = channels;
        }
        if let Some(seconds) = overrides.seconds {
            self.seconds = seconds;
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        if let Some(frequency) = overrides.frequency {
            self.tone.frequency = frequency;
        }
        if let Some(decay) = overrides.decay {
            self.tone.decay = decay;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.channels, Channels::Stereo);
        assert_eq!(config.seconds, 2.0);
        assert_eq!(config.format, SampleFormat::Float32);
        assert_eq!(config.tone.frequency, 277.183);
        assert_eq!(config.tone.decay, 3.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = RenderConfig::from_json(r#"{"sample_rate": 8000, "format": "i16"}"#).unwrap();
        assert_eq!(config.sample_rate, 8000);
        assert_eq!(config.format, SampleFormat::Int16);
        assert_eq!(config.channels, Channels::Stereo);
        assert_eq!(config.tone, ToneConfig::default());
    }

    #[test]
    fn test_full_json() {
        let json = r#"{
            "sample_rate": 22050,
            "channels": "mono",
            "seconds": 0.5,
            "format": "f64",
            "tone": { "frequency": 440.0, "decay": 1.5 }
        }"#;
        let config = RenderConfig::from_json(json).unwrap();
        assert_eq!(
            config,
            RenderConfig {
                sample_rate: 22050,
                channels: Channels::Mono,
                seconds: 0.5,
                format: SampleFormat::Float64,
                tone: ToneConfig {
                    frequency: 440.0,
                    decay: 1.5,
                },
            }
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(RenderConfig::from_json(r#"{"sample_rat": 8000}"#).is_err());
        assert!(RenderConfig::from_json(r#"{"format": "i24"}"#).is_err());
    }

    #[test]
    fn test_overrides_win() {
        let overrides = RenderOverrides {
            channels: Some(Channels::Mono),
            frequency: Some(880.0),
            ..Default::default()
        };
        let config = RenderConfig::default().with_overrides(&overrides);
        assert_eq!(config.channels, Channels::Mono);
        assert_eq!(config.tone.frequency, 880.0);
        assert_eq!(config.sample_rate, DEFAULT_SAMPLE_RATE);
    }

    #[test]
    fn test_resolve_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render.json");
        fs::write(&path, r#"{"seconds": 1.0, "format": "i32"}"#).unwrap();

        let overrides = RenderOverrides {
            seconds: Some(0.25),
            ..Default::default()
        };
        let config = RenderConfig::resolve(Some(&path), &overrides).unwrap();
        assert_eq!(config.seconds, 0.25);
        assert_eq!(config.format, SampleFormat::Int32);
    }

    #[test]
    fn test_resolve_missing_file() {
        let path = Path::new("/nonexistent/render.json");
        let err = RenderConfig::resolve(Some(path), &RenderOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
