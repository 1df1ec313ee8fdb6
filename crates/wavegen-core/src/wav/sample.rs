//! Sample representations.
//!
//! The set of representations is closed: every type implementing [`Sample`]
//! is defined here. Each one knows its [`SampleFormat`] and how to serialize
//! itself little-endian.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use num_traits::{Float, FloatConst};
use serde::{Deserialize, Serialize};

use super::format::AudioFormat;
use crate::error::{WavError, WavResult};

pub(crate) const HALF_FLOAT_REASON: &str = "16-bit floating point is not a valid sample format";

/// Runtime description of a sample representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SampleFormat {
    /// Unsigned 8-bit PCM.
    #[serde(rename = "u8")]
    UInt8,
    /// Signed 16-bit PCM.
    #[serde(rename = "i16")]
    Int16,
    /// Signed 32-bit PCM.
    #[serde(rename = "i32")]
    Int32,
    /// 16-bit float. Never accepted for output.
    #[serde(rename = "f16")]
    Float16,
    /// 32-bit float.
    #[default]
    #[serde(rename = "f32")]
    Float32,
    /// 64-bit float.
    #[serde(rename = "f64")]
    Float64,
}

impl SampleFormat {
    /// All formats, in the order they are listed to users.
    pub const ALL: [SampleFormat; 6] = [
        SampleFormat::UInt8,
        SampleFormat::Int16,
        SampleFormat::Int32,
        SampleFormat::Float16,
        SampleFormat::Float32,
        SampleFormat::Float64,
    ];

    /// Width of one sample in bytes.
    pub fn bytes_per_sample(self) -> u16 {
        match self {
            SampleFormat::UInt8 => 1,
            SampleFormat::Int16 | SampleFormat::Float16 => 2,
            SampleFormat::Int32 | SampleFormat::Float32 => 4,
            SampleFormat::Float64 => 8,
        }
    }

    /// Header tag for this representation.
    pub fn audio_format(self) -> AudioFormat {
        match self {
            SampleFormat::UInt8 | SampleFormat::Int16 | SampleFormat::Int32 => AudioFormat::Pcm,
            SampleFormat::Float16 | SampleFormat::Float32 | SampleFormat::Float64 => {
                AudioFormat::Float
            }
        }
    }

    /// Rejects representations the container cannot carry.
    pub fn ensure_supported(self) -> WavResult<()> {
        if self.audio_format() == AudioFormat::Float && self.bytes_per_sample() < 4 {
            return Err(WavError::UnsupportedSampleFormat {
                format: self,
                reason: HALF_FLOAT_REASON,
            });
        }
        Ok(())
    }

    fn name(self) -> &'static str {
        match self {
            SampleFormat::UInt8 => "u8",
            SampleFormat::Int16 => "i16",
            SampleFormat::Int32 => "i32",
            SampleFormat::Float16 => "f16",
            SampleFormat::Float32 => "f32",
            SampleFormat::Float64 => "f64",
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SampleFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        SampleFormat::ALL
            .into_iter()
            .find(|format| format.name() == lower)
            .ok_or_else(|| {
                format!(
                    "unknown sample format '{}', expected one of u8, i16, i32, f16, f32, f64",
                    s
                )
            })
    }
}

mod private {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for i16 {}
    impl Sealed for i32 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// A scalar sample value that can be written to the data chunk.
pub trait Sample: Copy + private::Sealed {
    /// Runtime description of this representation.
    const FORMAT: SampleFormat;

    /// Appends the little-endian encoding of `self` to `sink`.
    fn write_le<W: Write + ?Sized>(self, sink: &mut W) -> io::Result<()>;

    /// Converts a signal value in `[-1.0, 1.0]` to this representation.
    ///
    /// Integer types clip out-of-range values. Float types pass the value
    /// through unchanged.
    fn from_unit(value: f64) -> Self;
}

/// Floating point samples. Angular position and elapsed time are computed
/// in the sample type itself.
pub trait FloatSample: Sample + Float + FloatConst {
    /// Converts a sample index or rate to this type.
    fn from_index(value: usize) -> Self;
}

/// Integer PCM samples. The signal function sees `f32` time values.
pub trait IntSample: Sample {}

macro_rules! impl_sample {
    ($ty:ty, $format:expr, |$value:ident| $from_unit:expr) => {
        impl Sample for $ty {
            const FORMAT: SampleFormat = $format;

            #[inline]
            fn write_le<W: Write + ?Sized>(self, sink: &mut W) -> io::Result<()> {
                sink.write_all(&self.to_le_bytes())
            }

            #[inline]
            fn from_unit($value: f64) -> Self {
                $from_unit
            }
        }
    };
}

// 8-bit PCM is unsigned with its midpoint at 128.
impl_sample!(u8, SampleFormat::UInt8, |value| {
    (value.clamp(-1.0, 1.0) * 127.0).round() as i16 as u8 ^ 0x80
});
impl_sample!(i16, SampleFormat::Int16, |value| {
    (value.clamp(-1.0, 1.0) * f64::from(i16::MAX)).round() as i16
});
impl_sample!(i32, SampleFormat::Int32, |value| {
    (value.clamp(-1.0, 1.0) * f64::from(i32::MAX)).round() as i32
});
impl_sample!(f32, SampleFormat::Float32, |value| value as f32);
impl_sample!(f64, SampleFormat::Float64, |value| value);

impl IntSample for u8 {}
impl IntSample for i16 {}
impl IntSample for i32 {}

impl FloatSample for f32 {
    #[inline]
    fn from_index(value: usize) -> Self {
        value as f32
    }
}

impl FloatSample for f64 {
    #[inline]
    fn from_index(value: usize) -> Self {
        value as f64
    }
}
