//! Canonical 44-byte RIFF/WAVE header.

use std::io::{self, Write};

use serde::Serialize;

use super::format::{AudioFormat, Channels};
use crate::error::{WavError, WavResult};

/// Size of the canonical header in bytes.
pub const HEADER_SIZE: usize = 44;

/// Size of the `fmt ` chunk body for PCM and float data.
pub const FMT_CHUNK_SIZE: u32 = 16;

const RIFF: [u8; 4] = *b"RIFF";
const WAVE: [u8; 4] = *b"WAVE";
const FMT: [u8; 4] = *b"fmt ";
const DATA: [u8; 4] = *b"data";

/// Immutable WAV header.
///
/// Derived fields are computed once by [`build_header`] (or read back by
/// [`WaveHeader::parse`]) and cannot be changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WaveHeader {
    size: u32,
    format: AudioFormat,
    channels: Channels,
    sample_rate: u32,
    bytes_per_second: u32,
    bytes_per_block: u16,
    bits_per_sample: u16,
    samples_byte_count: u32,
}

/// Builds the header for `sample_count` scalar samples.
///
/// `sample_count` is the total number of scalars across all channels, so
/// `samples_byte_count` already covers every channel.
///
/// # Errors
/// - [`WavError::InvalidSampleRate`] if `sample_rate` is zero
/// - [`WavError::InvalidSampleWidth`] if `bytes_per_sample` is zero or too wide
/// - [`WavError::DataTooLarge`] if the data does not fit the 32-bit size fields
pub fn build_header(
    sample_rate: u32,
    channels: Channels,
    format: AudioFormat,
    bytes_per_sample: u16,
    sample_count: usize,
) -> WavResult<WaveHeader> {
    if sample_rate == 0 {
        return Err(WavError::InvalidSampleRate { rate: sample_rate });
    }
    if bytes_per_sample == 0 {
        return Err(WavError::InvalidSampleWidth { bytes: 0 });
    }

    let too_wide = || WavError::InvalidSampleWidth {
        bytes: u32::from(bytes_per_sample),
    };
    let bits_per_sample = bytes_per_sample.checked_mul(8).ok_or_else(too_wide)?;
    let bytes_per_block = channels
        .count()
        .checked_mul(bytes_per_sample)
        .ok_or_else(too_wide)?;
    let bytes_per_second = sample_rate
        .checked_mul(u32::from(bytes_per_block))
        .ok_or_else(too_wide)?;

    let data_bytes = (sample_count as u64).saturating_mul(u64::from(bytes_per_sample));
    let too_large = WavError::DataTooLarge { bytes: data_bytes };
    let samples_byte_count = u32::try_from(data_bytes).map_err(|_| too_large)?;
    let overall_size = (HEADER_SIZE as u32)
        .checked_add(samples_byte_count)
        .ok_or(WavError::DataTooLarge { bytes: data_bytes })?;

    Ok(WaveHeader {
        size: overall_size - 8,
        format,
        channels,
        sample_rate,
        bytes_per_second,
        bytes_per_block,
        bits_per_sample,
        samples_byte_count,
    })
}

impl WaveHeader {
    /// File size minus 8 (the `RIFF` marker and this field).
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Always 16.
    pub fn chunk_size(&self) -> u32 {
        FMT_CHUNK_SIZE
    }

    /// Sample data kind.
    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// Channel layout.
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Samples per second, per channel.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// `sample_rate * bytes_per_block`.
    pub fn bytes_per_second(&self) -> u32 {
        self.bytes_per_second
    }

    /// Bytes in one interleaved block (one sample per channel).
    pub fn bytes_per_block(&self) -> u16 {
        self.bytes_per_block
    }

    /// Bits per scalar sample.
    pub fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }

    /// Bytes per scalar sample.
    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Length of the `data` chunk body.
    pub fn samples_byte_count(&self) -> u32 {
        self.samples_byte_count
    }

    /// Total number of scalar samples in the data chunk.
    pub fn sample_count(&self) -> usize {
        (self.samples_byte_count / u32::from(self.bytes_per_sample())) as usize
    }

    /// Length of the complete file: header plus sample data.
    pub fn file_len(&self) -> usize {
        self.size as usize + 8
    }

    /// Encodes the header in the canonical little-endian layout.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&RIFF);
        out[4..8].copy_from_slice(&self.size.to_le_bytes());
        out[8..12].copy_from_slice(&WAVE);
        out[12..16].copy_from_slice(&FMT);
        out[16..20].copy_from_slice(&FMT_CHUNK_SIZE.to_le_bytes());
        out[20..22].copy_from_slice(&self.format.tag().to_le_bytes());
        out[22..24].copy_from_slice(&self.channels.count().to_le_bytes());
        out[24..28].copy_from_slice(&self.sample_rate.to_le_bytes());
        out[28..32].copy_from_slice(&self.bytes_per_second.to_le_bytes());
        out[32..34].copy_from_slice(&self.bytes_per_block.to_le_bytes());
        out[34..36].copy_from_slice(&self.bits_per_sample.to_le_bytes());
        out[36..40].copy_from_slice(&DATA);
        out[40..44].copy_from_slice(&self.samples_byte_count.to_le_bytes());
        out
    }

    /// Writes the encoded header to `writer`.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())
    }

    /// Reads a header in the canonical layout from the start of `bytes`.
    ///
    /// Only the layout produced by [`WaveHeader::to_bytes`] is accepted:
    /// `fmt ` directly after `WAVE`, a 16-byte format chunk, and `data`
    /// at offset 36.
    pub fn parse(bytes: &[u8]) -> WavResult<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(WavError::invalid_header(format!(
                "expected at least {} bytes, found {}",
                HEADER_SIZE,
                bytes.len()
            )));
        }

        expect_marker(bytes, 0, &RIFF)?;
        expect_marker(bytes, 8, &WAVE)?;
        expect_marker(bytes, 12, &FMT)?;
        expect_marker(bytes, 36, &DATA)?;

        let chunk_size = read_u32(bytes, 16);
        if chunk_size != FMT_CHUNK_SIZE {
            return Err(WavError::invalid_header(format!(
                "fmt chunk size {} is not {}",
                chunk_size, FMT_CHUNK_SIZE
            )));
        }

        let tag = read_u16(bytes, 20);
        let format = AudioFormat::from_tag(tag)
            .ok_or_else(|| WavError::invalid_header(format!("unknown format tag {}", tag)))?;
        let count = read_u16(bytes, 22);
        let channels = Channels::from_count(count).ok_or_else(|| {
            WavError::invalid_header(format!("unsupported channel count {}", count))
        })?;

        let bits_per_sample = read_u16(bytes, 34);
        if bits_per_sample == 0 || bits_per_sample % 8 != 0 {
            return Err(WavError::invalid_header(format!(
                "unsupported bit depth {}",
                bits_per_sample
            )));
        }

        Ok(WaveHeader {
            size: read_u32(bytes, 4),
            format,
            channels,
            sample_rate: read_u32(bytes, 24),
            bytes_per_second: read_u32(bytes, 28),
            bytes_per_block: read_u16(bytes, 32),
            bits_per_sample,
            samples_byte_count: read_u32(bytes, 40),
        })
    }
}

fn expect_marker(bytes: &[u8], offset: usize, marker: &[u8; 4]) -> WavResult<()> {
    if &bytes[offset..offset + 4] != marker {
        return Err(WavError::invalid_header(format!(
            "missing {:?} marker at offset {}",
            String::from_utf8_lossy(marker),
            offset
        )));
    }
    Ok(())
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
