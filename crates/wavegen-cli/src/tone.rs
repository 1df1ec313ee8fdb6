//! Built-in demo tone.

use crate::config::ToneConfig;

/// A self-modulated sine at `frequency` that fades out with a cubic
/// drop-off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoubleTone {
    frequency: f64,
    decay: f64,
}

impl DoubleTone {
    /// Tone at `frequency` Hz fading out at rate `decay`.
    pub fn new(frequency: f64, decay: f64) -> Self {
        Self { frequency, decay }
    }

    /// Signal value in `[-1.0, 1.0]` at angular position `hz` and time
    /// `seconds`. Both channels get the same value.
    pub fn sample(&self, hz: f64, seconds: f64) -> f64 {
        let phase = self.frequency * hz;
        (phase + (phase * 0.5).sin()).sin() * self.drop_off(seconds)
    }

    fn drop_off(&self, seconds: f64) -> f64 {
        1.0 / (1.0 + (seconds * self.decay).powi(3))
    }
}

impl From<&ToneConfig> for DoubleTone {
    fn from(config: &ToneConfig) -> Self {
        Self::new(config.frequency, config.decay)
    }
}
