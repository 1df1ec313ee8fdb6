//! Top-level generation entry point.

use std::io::{Cursor, Write};

use super::format::Channels;
use super::header::{build_header, WaveHeader, HEADER_SIZE};
use super::sample::{FloatSample, IntSample, Sample, SampleFormat, HALF_FLOAT_REASON};
use super::writer::{write_float_samples, write_int_samples};
use crate::error::{WavError, WavResult};

/// Renders a fixed duration of audio into a WAV file.
///
/// Every operation builds the header first, so the exact output length is
/// known before a buffer is acquired or a byte is written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveGenerator {
    sample_rate: u32,
    channels: Channels,
    seconds: f32,
}

/// Output of a provider-backed render.
///
/// The buffer may be longer than the encoded file (for example when it
/// comes from a pool); only the first [`Rendered::len`] bytes are valid.
#[derive(Debug)]
pub struct Rendered<B> {
    buffer: B,
    len: usize,
}

impl<B> Rendered<B> {
    /// Number of valid bytes at the start of the buffer.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if nothing was written.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the buffer, including any unused tail.
    pub fn into_inner(self) -> B {
        self.buffer
    }
}

impl<B: AsRef<[u8]>> Rendered<B> {
    /// The encoded file.
    pub fn bytes(&self) -> &[u8] {
        &self.buffer.as_ref()[..self.len]
    }
}

impl Rendered<Vec<u8>> {
    /// Returns the encoded file as a vector trimmed to its valid length.
    pub fn into_vec(mut self) -> Vec<u8> {
        self.buffer.truncate(self.len);
        self.buffer
    }
}

impl WaveGenerator {
    /// Creates a generator for `seconds` of audio.
    pub fn new(sample_rate: u32, channels: Channels, seconds: f32) -> Self {
        Self {
            sample_rate,
            channels,
            seconds,
        }
    }

    /// Samples per second, per channel.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Channel layout.
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Duration in seconds.
    pub fn seconds(&self) -> f32 {
        self.seconds
    }

    /// Total number of scalar samples across all channels.
    ///
    /// `sample_rate * channels * seconds` is computed in `f32` and truncated
    /// once, so a fractional duration may end partway through a block.
    pub fn sample_count(&self) -> WavResult<usize> {
        if self.sample_rate == 0 {
            return Err(WavError::InvalidSampleRate {
                rate: self.sample_rate,
            });
        }
        if !self.seconds.is_finite() || self.seconds < 0.0 {
            return Err(WavError::InvalidDuration {
                seconds: self.seconds,
            });
        }

        let channels = f32::from(self.channels.count());
        Ok((self.sample_rate as f32 * channels * self.seconds) as usize)
    }

    /// Header for a render in `format`.
    ///
    /// # Errors
    /// Rejects 16-bit float and any invalid rate or duration.
    pub fn header_for_format(&self, format: SampleFormat) -> WavResult<WaveHeader> {
        format.ensure_supported()?;
        build_header(
            self.sample_rate,
            self.channels,
            format.audio_format(),
            format.bytes_per_sample(),
            self.sample_count()?,
        )
    }

    /// Header for a render with sample type `T`.
    pub fn header_for<T: Sample>(&self) -> WavResult<WaveHeader> {
        self.header_for_format(T::FORMAT)
    }

    /// Exact length of the encoded file in `format`.
    pub fn encoded_len(&self, format: SampleFormat) -> WavResult<usize> {
        Ok(self.header_for_format(format)?.file_len())
    }

    /// Renders floating point samples into a freshly allocated buffer.
    pub fn gen_float<T, F>(&self, f: F) -> WavResult<Vec<u8>>
    where
        T: FloatSample,
        F: FnMut(usize, usize, T, T) -> T,
    {
        Ok(self.gen_float_with(f, |len| vec![0u8; len])?.into_vec())
    }

    /// Renders integer samples into a freshly allocated buffer.
    pub fn gen_int<T, F>(&self, f: F) -> WavResult<Vec<u8>>
    where
        T: IntSample,
        F: FnMut(usize, usize, f32, f32) -> T,
    {
        Ok(self.gen_int_with(f, |len| vec![0u8; len])?.into_vec())
    }

    /// Renders floating point samples into a buffer obtained from `provider`.
    ///
    /// `provider` is called once with the exact required length. A shorter
    /// buffer is rejected with [`WavError::BufferTooSmall`] before anything
    /// is written to it.
    pub fn gen_float_with<T, F, B, P>(&self, f: F, provider: P) -> WavResult<Rendered<B>>
    where
        T: FloatSample,
        F: FnMut(usize, usize, T, T) -> T,
        B: AsMut<[u8]>,
        P: FnOnce(usize) -> B,
    {
        let header = self.header_for::<T>()?;
        let (rate, channels) = (self.sample_rate, self.channels.count());
        render_into(header, provider, |cursor| {
            write_float_samples(cursor, header.sample_count(), rate, channels, f)
        })
    }

    /// Renders integer samples into a buffer obtained from `provider`.
    pub fn gen_int_with<T, F, B, P>(&self, f: F, provider: P) -> WavResult<Rendered<B>>
    where
        T: IntSample,
        F: FnMut(usize, usize, f32, f32) -> T,
        B: AsMut<[u8]>,
        P: FnOnce(usize) -> B,
    {
        let header = self.header_for::<T>()?;
        let (rate, channels) = (self.sample_rate, self.channels.count());
        render_into(header, provider, |cursor| {
            write_int_samples(cursor, header.sample_count(), rate, channels, f)
        })
    }

    /// Streams header and floating point samples to `sink`.
    ///
    /// # Returns
    /// Total number of bytes written.
    pub fn write_float<W, T, F>(&self, sink: &mut W, f: F) -> WavResult<usize>
    where
        W: Write + ?Sized,
        T: FloatSample,
        F: FnMut(usize, usize, T, T) -> T,
    {
        let header = self.header_for::<T>()?;
        header.write_to(sink)?;
        let data = write_float_samples(
            sink,
            header.sample_count(),
            self.sample_rate,
            self.channels.count(),
            f,
        )?;
        Ok(HEADER_SIZE + data)
    }

    /// Streams header and integer samples to `sink`.
    pub fn write_int<W, T, F>(&self, sink: &mut W, f: F) -> WavResult<usize>
    where
        W: Write + ?Sized,
        T: IntSample,
        F: FnMut(usize, usize, f32, f32) -> T,
    {
        let header = self.header_for::<T>()?;
        header.write_to(sink)?;
        let data = write_int_samples(
            sink,
            header.sample_count(),
            self.sample_rate,
            self.channels.count(),
            f,
        )?;
        Ok(HEADER_SIZE + data)
    }

    /// Streams a unit-range signal to `sink` in a format picked at runtime.
    ///
    /// `signal` always sees `f64` time values and returns a value in
    /// `[-1.0, 1.0]`, which is converted with [`Sample::from_unit`].
    /// Unsupported formats are rejected before anything is written.
    pub fn write_unit<W, F>(
        &self,
        format: SampleFormat,
        sink: &mut W,
        mut signal: F,
    ) -> WavResult<usize>
    where
        W: Write + ?Sized,
        F: FnMut(usize, usize, f64, f64) -> f64,
    {
        format.ensure_supported()?;

        match format {
            SampleFormat::UInt8 => self.write_int(sink, |c, s, hz, t| {
                u8::from_unit(signal(c, s, f64::from(hz), f64::from(t)))
            }),
            SampleFormat::Int16 => self.write_int(sink, |c, s, hz, t| {
                i16::from_unit(signal(c, s, f64::from(hz), f64::from(t)))
            }),
            SampleFormat::Int32 => self.write_int(sink, |c, s, hz, t| {
                i32::from_unit(signal(c, s, f64::from(hz), f64::from(t)))
            }),
            SampleFormat::Float32 => self.write_float(sink, |c, s, hz: f32, t: f32| {
                f32::from_unit(signal(c, s, f64::from(hz), f64::from(t)))
            }),
            SampleFormat::Float64 => self.write_float(sink, signal),
            SampleFormat::Float16 => Err(WavError::UnsupportedSampleFormat {
                format,
                reason: HALF_FLOAT_REASON,
            }),
        }
    }

    /// Renders a unit-range signal into a freshly allocated buffer.
    pub fn gen_unit<F>(&self, format: SampleFormat, signal: F) -> WavResult<Vec<u8>>
    where
        F: FnMut(usize, usize, f64, f64) -> f64,
    {
        let mut out = Vec::with_capacity(self.encoded_len(format)?);
        self.write_unit(format, &mut out, signal)?;
        Ok(out)
    }
}

fn render_into<B, P, W>(
    header: WaveHeader,
    provider: P,
    write_samples: W,
) -> WavResult<Rendered<B>>
where
    B: AsMut<[u8]>,
    P: FnOnce(usize) -> B,
    W: FnOnce(&mut Cursor<&mut [u8]>) -> WavResult<usize>,
{
    let required = header.file_len();
    let mut buffer = provider(required);

    let actual = buffer.as_mut().len();
    if actual < required {
        return Err(WavError::BufferTooSmall { required, actual });
    }

    let mut cursor = Cursor::new(&mut buffer.as_mut()[..required]);
    header.write_to(&mut cursor)?;
    write_samples(&mut cursor)?;
    let len = cursor.position() as usize;

    Ok(Rendered { buffer, len })
}
