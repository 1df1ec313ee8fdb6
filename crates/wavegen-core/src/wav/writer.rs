//! Sample writers.
//!
//! Both writers walk `0..sample_count` once, where `sample_count` is the
//! total number of scalars across all channels. Scalar `i` belongs to
//! channel `i % channels` at sample index `i / channels`, which yields the
//! interleaved order `(0,0), (1,0), (0,1), (1,1), ...`.

use std::io::Write;

use super::sample::{FloatSample, IntSample};
use crate::error::{WavError, WavResult};

/// Streams floating point samples into `sink`.
///
/// `f` receives `(channel, sample, hz, seconds)` where
/// `hz = TAU * sample / sample_rate` and `seconds = sample / sample_rate`,
/// both computed in `T`.
///
/// # Returns
/// Number of bytes appended to `sink`.
pub fn write_float_samples<W, T, F>(
    sink: &mut W,
    sample_count: usize,
    sample_rate: u32,
    channels: u16,
    mut f: F,
) -> WavResult<usize>
where
    W: Write + ?Sized,
    T: FloatSample,
    F: FnMut(usize, usize, T, T) -> T,
{
    check_layout(sample_rate, channels)?;
    T::FORMAT.ensure_supported()?;

    let channels = usize::from(channels);
    let rate = T::from_index(sample_rate as usize);

    for i in 0..sample_count {
        let channel = i % channels;
        let sample = i / channels;

        let position = T::from_index(sample);
        let hz = T::TAU() * position / rate;
        let seconds = position / rate;

        f(channel, sample, hz, seconds).write_le(sink)?;
    }

    Ok(sample_count * usize::from(T::FORMAT.bytes_per_sample()))
}

/// Streams integer samples into `sink`.
///
/// Same contract as [`write_float_samples`], except `hz` and `seconds`
/// are always `f32` and the integer returned by `f` is written unchanged.
pub fn write_int_samples<W, T, F>(
    sink: &mut W,
    sample_count: usize,
    sample_rate: u32,
    channels: u16,
    mut f: F,
) -> WavResult<usize>
where
    W: Write + ?Sized,
    T: IntSample,
    F: FnMut(usize, usize, f32, f32) -> T,
{
    check_layout(sample_rate, channels)?;

    let channels = usize::from(channels);
    let rate = sample_rate as f32;

    for i in 0..sample_count {
        let channel = i % channels;
        let sample = i / channels;

        let hz = std::f32::consts::TAU * sample as f32 / rate;
        let seconds = sample as f32 / rate;

        f(channel, sample, hz, seconds).write_le(sink)?;
    }

    Ok(sample_count * usize::from(T::FORMAT.bytes_per_sample()))
}

fn check_layout(sample_rate: u32, channels: u16) -> WavResult<()> {
    if sample_rate == 0 {
        return Err(WavError::InvalidSampleRate { rate: sample_rate });
    }
    if channels == 0 {
        return Err(WavError::InvalidChannelCount { count: channels });
    }
    Ok(())
}
