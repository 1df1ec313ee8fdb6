//! Header tags: audio format and channel layout.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of sample data, as written to the `fmt ` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u16)]
pub enum AudioFormat {
    /// Integer samples.
    Pcm = 1,
    /// IEEE-754 floating point samples.
    Float = 3,
}

impl AudioFormat {
    /// Tag value stored in the header.
    pub fn tag(self) -> u16 {
        self as u16
    }

    /// Maps a header tag back to a format.
    pub fn from_tag(tag: u16) -> Option<Self> {
        match tag {
            1 => Some(AudioFormat::Pcm),
            3 => Some(AudioFormat::Float),
            _ => None,
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioFormat::Pcm => write!(f, "pcm"),
            AudioFormat::Float => write!(f, "float"),
        }
    }
}

/// Number of interleaved channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u16)]
pub enum Channels {
    /// One channel.
    Mono = 1,
    /// Two channels, left then right within each block.
    #[default]
    Stereo = 2,
}

impl Channels {
    /// Channel count.
    pub fn count(self) -> u16 {
        self as u16
    }

    /// Maps a header channel count back to a layout.
    pub fn from_count(count: u16) -> Option<Self> {
        match count {
            1 => Some(Channels::Mono),
            2 => Some(Channels::Stereo),
            _ => None,
        }
    }
}

impl fmt::Display for Channels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channels::Mono => write!(f, "mono"),
            Channels::Stereo => write!(f, "stereo"),
        }
    }
}

impl FromStr for Channels {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mono" | "1" => Ok(Channels::Mono),
            "stereo" | "2" => Ok(Channels::Stereo),
            other => Err(format!(
                "unknown channel layout '{}', expected mono or stereo",
                other
            )),
        }
    }
}
