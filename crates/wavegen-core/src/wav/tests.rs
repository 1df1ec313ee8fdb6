//! Tests for the WAV module.

use pretty_assertions::assert_eq;

use super::format::{AudioFormat, Channels};
use super::generate::WaveGenerator;
use super::header::{build_header, WaveHeader, HEADER_SIZE};
use super::pcm::{compute_pcm_hash, extract_pcm_data};
use super::sample::SampleFormat;
use super::writer::{write_float_samples, write_int_samples};
use crate::error::WavError;

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

// =========================================================================
// Header builder tests
// =========================================================================

#[test]
fn test_header_pcm16_mono_one_second() {
    let header = build_header(8000, Channels::Mono, AudioFormat::Pcm, 2, 8000).unwrap();

    assert_eq!(header.samples_byte_count(), 16000);
    assert_eq!(header.size(), 16036);
    assert_eq!(header.file_len(), 16044);
    assert_eq!(header.bytes_per_block(), 2);
    assert_eq!(header.bytes_per_second(), 16000);
    assert_eq!(header.bits_per_sample(), 16);
    assert_eq!(header.chunk_size(), 16);
}

#[test]
fn test_header_float_stereo() {
    // 44100 Hz, stereo, 2 seconds of f32
    let header =
        build_header(44100, Channels::Stereo, AudioFormat::Float, 4, 44100 * 2 * 2).unwrap();

    assert_eq!(header.format(), AudioFormat::Float);
    assert_eq!(header.channels(), Channels::Stereo);
    assert_eq!(header.bytes_per_block(), 8);
    assert_eq!(header.bytes_per_second(), 352800);
    assert_eq!(header.bits_per_sample(), 32);
    assert_eq!(header.samples_byte_count(), 705600);
}

#[test]
fn test_header_byte_count_matches_duration() {
    for &rate in &[8000u32, 22050, 44100, 48000] {
        for channels in [Channels::Mono, Channels::Stereo] {
            for seconds in 1..=3usize {
                for bytes_per_sample in [1u16, 2, 4, 8] {
                    let count = rate as usize * usize::from(channels.count()) * seconds;
                    let header =
                        build_header(rate, channels, AudioFormat::Pcm, bytes_per_sample, count)
                            .unwrap();

                    assert_eq!(
                        header.samples_byte_count() as usize,
                        count * usize::from(bytes_per_sample)
                    );
                    assert_eq!(header.size(), 44 + header.samples_byte_count() - 8);
                }
            }
        }
    }
}

#[test]
fn test_header_empty_data() {
    let header = build_header(44100, Channels::Mono, AudioFormat::Pcm, 2, 0).unwrap();
    assert_eq!(header.samples_byte_count(), 0);
    assert_eq!(header.size(), 36);
    assert_eq!(header.file_len(), HEADER_SIZE);
}

#[test]
fn test_header_rejects_zero_sample_rate() {
    let result = build_header(0, Channels::Mono, AudioFormat::Pcm, 2, 10);
    assert!(matches!(result, Err(WavError::InvalidSampleRate { rate: 0 })));
}

#[test]
fn test_header_rejects_zero_sample_width() {
    let result = build_header(8000, Channels::Mono, AudioFormat::Pcm, 0, 10);
    assert!(matches!(result, Err(WavError::InvalidSampleWidth { bytes: 0 })));
}

#[test]
fn test_header_rejects_oversized_data() {
    let result = build_header(8000, Channels::Mono, AudioFormat::Pcm, 4, usize::MAX / 2);
    assert!(matches!(result, Err(WavError::DataTooLarge { .. })));

    // Fits in u32 by itself but not once the header is added
    let result = build_header(8000, Channels::Mono, AudioFormat::Pcm, 1, u32::MAX as usize - 10);
    assert!(matches!(result, Err(WavError::DataTooLarge { .. })));
}

// =========================================================================
// Header encoding tests
// =========================================================================

#[test]
fn test_header_layout() {
    let header = build_header(8000, Channels::Stereo, AudioFormat::Pcm, 2, 16000).unwrap();
    let bytes = header.to_bytes();

    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(read_u32(&bytes, 4), 44 + 32000 - 8);
    assert_eq!(&bytes[8..12], b"WAVE");
    assert_eq!(&bytes[12..16], b"fmt ");
    assert_eq!(read_u32(&bytes, 16), 16);
    assert_eq!(read_u16(&bytes, 20), 1);
    assert_eq!(read_u16(&bytes, 22), 2);
    assert_eq!(read_u32(&bytes, 24), 8000);
    assert_eq!(read_u32(&bytes, 28), 32000);
    assert_eq!(read_u16(&bytes, 32), 4);
    assert_eq!(read_u16(&bytes, 34), 16);
    assert_eq!(&bytes[36..40], b"data");
    assert_eq!(read_u32(&bytes, 40), 32000);
}

#[test]
fn test_header_float_tag() {
    let header = build_header(48000, Channels::Mono, AudioFormat::Float, 8, 10).unwrap();
    let bytes = header.to_bytes();
    assert_eq!(read_u16(&bytes, 20), 3);
    assert_eq!(read_u16(&bytes, 34), 64);
}

#[test]
fn test_header_parse_roundtrip() {
    let header = build_header(22050, Channels::Stereo, AudioFormat::Float, 4, 1000).unwrap();
    let parsed = WaveHeader::parse(&header.to_bytes()).unwrap();
    assert_eq!(parsed, header);

    let bytes = parsed.to_bytes();
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(&bytes[8..12], b"WAVE");
    assert_eq!(&bytes[12..16], b"fmt ");
    assert_eq!(&bytes[36..40], b"data");
}

#[test]
fn test_header_parse_rejects_bad_input() {
    let good = build_header(8000, Channels::Mono, AudioFormat::Pcm, 2, 8).unwrap().to_bytes();

    assert!(matches!(
        WaveHeader::parse(&good[..20]),
        Err(WavError::InvalidHeader { .. })
    ));

    let mut bad_magic = good;
    bad_magic[0..4].copy_from_slice(b"RIFX");
    assert!(WaveHeader::parse(&bad_magic).is_err());

    let mut bad_tag = good;
    bad_tag[20] = 2;
    assert!(WaveHeader::parse(&bad_tag).is_err());

    let mut bad_channels = good;
    bad_channels[22] = 6;
    assert!(WaveHeader::parse(&bad_channels).is_err());

    let mut bad_chunk = good;
    bad_chunk[16] = 18;
    assert!(WaveHeader::parse(&bad_chunk).is_err());
}

// =========================================================================
// Sample writer tests
// =========================================================================

#[test]
fn test_stereo_interleaving_order() {
    let mut order = Vec::new();
    let mut sink = Vec::new();

    let written = write_float_samples(&mut sink, 6, 8000, 2, |channel, sample, _hz, _s| {
        order.push((channel, sample));
        0.0f32
    })
    .unwrap();

    assert_eq!(order, vec![(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2)]);
    assert_eq!(written, 24);
    assert_eq!(sink.len(), 24);
}

#[test]
fn test_float_time_values() {
    let mut seen = Vec::new();
    let mut sink = Vec::new();

    write_float_samples(&mut sink, 4, 4, 2, |_c, _s, hz: f64, seconds: f64| {
        seen.push((hz, seconds));
        0.0
    })
    .unwrap();

    // Both channels of a block see the same time
    let tau = std::f64::consts::TAU;
    assert_eq!(seen, vec![(0.0, 0.0), (0.0, 0.0), (tau / 4.0, 0.25), (tau / 4.0, 0.25)]);
}

#[test]
fn test_int_time_values_are_single_precision() {
    let mut seen = Vec::new();
    let mut sink = Vec::new();

    write_int_samples(&mut sink, 3, 3, 1, |_c, sample, hz, seconds| {
        seen.push((hz, seconds));
        sample as i16
    })
    .unwrap();

    let tau = std::f32::consts::TAU;
    assert_eq!(seen[2], (tau * 2.0 / 3.0, 2.0f32 / 3.0));
    assert_eq!(sink, vec![0, 0, 1, 0, 2, 0]);
}

#[test]
fn test_int_values_written_unchanged() {
    let mut sink = Vec::new();
    let values = [i32::MIN, -1, 0, i32::MAX];

    write_int_samples(&mut sink, 4, 8000, 1, |_c, s, _hz, _t| values[s]).unwrap();

    let decoded: Vec<i32> = sink
        .chunks_exact(4)
        .map(|chunk| i32::from_le_bytes(chunk.try_into().unwrap()))
        .collect();
    assert_eq!(decoded, values.to_vec());
}

#[test]
fn test_writer_rejects_zero_channels() {
    let mut sink = Vec::new();
    let result = write_int_samples(&mut sink, 4, 8000, 0, |_c, _s, _hz, _t| 0u8);
    assert!(matches!(result, Err(WavError::InvalidChannelCount { count: 0 })));
    assert!(sink.is_empty());
}

// =========================================================================
// Generator tests
// =========================================================================

#[test]
fn test_generate_pcm16_mono_length() {
    let generator = WaveGenerator::new(8000, Channels::Mono, 1.0);
    let wav = generator.gen_int(|_c, _s, _hz, _t| 0i16).unwrap();

    assert_eq!(wav.len(), 16044);
    assert_eq!(read_u32(&wav, 40), 16000);
    assert_eq!(read_u32(&wav, 4), 16036);
}

#[test]
fn test_generate_constant_decodes_back() {
    let generator = WaveGenerator::new(8000, Channels::Stereo, 0.5);

    let wav = generator.gen_int(|_c, _s, _hz, _t| -1234i16).unwrap();
    let data = extract_pcm_data(&wav).unwrap();
    assert_eq!(data.len(), 8000 * 2 * 2 / 2);
    assert!(data
        .chunks_exact(2)
        .all(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]) == -1234));

    let wav = generator.gen_float(|_c, _s, _hz, _t| 0.125f64).unwrap();
    let data = extract_pcm_data(&wav).unwrap();
    assert!(data
        .chunks_exact(8)
        .all(|chunk| f64::from_le_bytes(chunk.try_into().unwrap()) == 0.125));
}

#[test]
fn test_generate_sample_count_truncates_total() {
    let generator = WaveGenerator::new(10, Channels::Stereo, 0.35);
    assert_eq!(generator.sample_count().unwrap(), 7);

    let generator = WaveGenerator::new(1, Channels::Stereo, 1.5);
    assert_eq!(generator.sample_count().unwrap(), 3);

    let generator = WaveGenerator::new(44100, Channels::Stereo, 2.0);
    assert_eq!(generator.sample_count().unwrap(), 176400);
}

#[test]
fn test_generate_partial_block_roundtrip() {
    // 3 scalars in stereo: the last block only carries the left channel
    let generator = WaveGenerator::new(1, Channels::Stereo, 1.5);
    let mut calls = Vec::new();
    let wav = generator
        .gen_int(|c, s, _hz, _t| {
            calls.push((c, s));
            1i16
        })
        .unwrap();
    assert_eq!(calls, vec![(0, 0), (1, 0), (0, 1)]);
    assert_eq!(wav.len(), HEADER_SIZE + 6);

    let header = WaveHeader::parse(&wav).unwrap();
    assert_eq!(header.samples_byte_count(), 6);
    assert_eq!(header.sample_count(), 3);
    assert_eq!(extract_pcm_data(&wav).unwrap().len(), 6);
}

#[test]
fn test_generate_rejects_invalid_duration() {
    for seconds in [-1.0f32, f32::NAN, f32::INFINITY] {
        let generator = WaveGenerator::new(8000, Channels::Mono, seconds);
        assert!(matches!(
            generator.gen_int(|_c, _s, _hz, _t| 0i16),
            Err(WavError::InvalidDuration { .. })
        ));
    }
}

#[test]
fn test_generate_rejects_zero_sample_rate() {
    let generator = WaveGenerator::new(0, Channels::Mono, 1.0);
    assert!(matches!(
        generator.gen_float(|_c, _s, _hz, _t| 0.0f32),
        Err(WavError::InvalidSampleRate { rate: 0 })
    ));
}

#[test]
fn test_half_float_rejected_before_write() {
    let generator = WaveGenerator::new(8000, Channels::Mono, 1.0);
    let mut sink = Vec::new();
    let mut calls = 0;

    let result = generator.write_unit(SampleFormat::Float16, &mut sink, |_c, _s, _hz, _t| {
        calls += 1;
        0.0
    });

    assert!(matches!(
        result,
        Err(WavError::UnsupportedSampleFormat {
            format: SampleFormat::Float16,
            ..
        })
    ));
    assert!(sink.is_empty());
    assert_eq!(calls, 0);
    assert!(generator.header_for_format(SampleFormat::Float16).is_err());
}

#[test]
fn test_provider_receives_exact_length() {
    let generator = WaveGenerator::new(8000, Channels::Mono, 1.0);
    let mut requested = None;

    let rendered = generator
        .gen_int_with(
            |_c, _s, _hz, _t| 7i16,
            |len| {
                requested = Some(len);
                vec![0u8; len]
            },
        )
        .unwrap();

    assert_eq!(requested, Some(16044));
    assert_eq!(rendered.len(), 16044);
}

#[test]
fn test_provider_oversized_buffer() {
    // Pools hand out buffers larger than requested; only `len` bytes are valid
    let generator = WaveGenerator::new(100, Channels::Stereo, 1.0);
    let rendered = generator
        .gen_float_with(|_c, _s, _hz, _t| 1.0f32, |len| vec![0xAAu8; len + 100])
        .unwrap();

    assert_eq!(rendered.len(), 44 + 200 * 4);
    assert_eq!(rendered.bytes().len(), rendered.len());
    assert_eq!(rendered.bytes(), generator.gen_float(|_c, _s, _hz, _t| 1.0f32).unwrap());

    let buffer = rendered.into_inner();
    assert_eq!(buffer.len(), 44 + 200 * 4 + 100);
    assert!(buffer[44 + 800..].iter().all(|&b| b == 0xAA));
}

#[test]
fn test_provider_slice_buffer() {
    let generator = WaveGenerator::new(4, Channels::Mono, 1.0);
    let mut backing = [0u8; 64];
    let slice = &mut backing[..];

    let rendered = generator
        .gen_int_with(|_c, s, _hz, _t| s as u8, move |_len| slice)
        .unwrap();
    let len = rendered.len();

    assert_eq!(len, 48);
    assert_eq!(&backing[44..48], &[0, 1, 2, 3]);
}

#[test]
fn test_provider_too_small_is_rejected_untouched() {
    let generator = WaveGenerator::new(8000, Channels::Mono, 1.0);
    let mut small = [0xEEu8; 100];
    let slice = &mut small[..];

    let result = generator.gen_int_with(|_c, _s, _hz, _t| 1i16, move |_len| slice);

    match result {
        Err(WavError::BufferTooSmall { required, actual }) => {
            assert_eq!(required, 16044);
            assert_eq!(actual, 100);
        }
        other => panic!("expected BufferTooSmall, got {:?}", other),
    }
    assert!(small.iter().all(|&b| b == 0xEE));
}

#[test]
fn test_write_to_sink_matches_buffer_render() {
    let generator = WaveGenerator::new(1000, Channels::Stereo, 0.25);
    let signal = |c: usize, _s: usize, hz: f32, _t: f32| if c == 0 { hz.sin() } else { -hz.sin() };

    let mut sink = Vec::new();
    let written = generator.write_float(&mut sink, signal).unwrap();
    let buffered = generator.gen_float(signal).unwrap();

    assert_eq!(written, sink.len());
    assert_eq!(sink, buffered);
}

#[test]
fn test_unit_render_formats() {
    let generator = WaveGenerator::new(100, Channels::Mono, 0.1);

    for format in SampleFormat::ALL {
        if format == SampleFormat::Float16 {
            continue;
        }
        let wav = generator.gen_unit(format, |_c, _s, _hz, _t| 1.0).unwrap();
        let header = WaveHeader::parse(&wav).unwrap();

        assert_eq!(wav.len(), header.file_len());
        assert_eq!(header.format(), format.audio_format());
        assert_eq!(header.bytes_per_sample(), format.bytes_per_sample());
        assert_eq!(header.sample_count(), 10);
        assert_eq!(generator.encoded_len(format).unwrap(), wav.len());
    }

    let wav = generator.gen_unit(SampleFormat::Int16, |_c, _s, _hz, _t| 1.0).unwrap();
    assert_eq!(i16::from_le_bytes([wav[44], wav[45]]), i16::MAX);
}

// =========================================================================
// PCM extraction tests
// =========================================================================

#[test]
fn test_extract_pcm_data() {
    let generator = WaveGenerator::new(100, Channels::Mono, 1.0);
    let wav = generator.gen_int(|_c, _s, _hz, _t| 3i16).unwrap();

    let pcm = extract_pcm_data(&wav).expect("should extract PCM");
    assert_eq!(pcm.len(), 200);
}

#[test]
fn test_extract_pcm_data_skips_extra_chunks() {
    let mut wav = Vec::new();
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&0u32.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"LIST");
    wav.extend_from_slice(&3u32.to_le_bytes());
    wav.extend_from_slice(&[1, 2, 3, 0]); // odd chunk plus pad byte
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&2u32.to_le_bytes());
    wav.extend_from_slice(&[9, 9]);

    assert_eq!(extract_pcm_data(&wav), Some(&[9u8, 9][..]));
}

#[test]
fn test_extract_pcm_data_invalid() {
    assert_eq!(extract_pcm_data(b"RIFF"), None);
    assert_eq!(extract_pcm_data(&[0u8; 64]), None);
}

#[test]
fn test_pcm_hash_determinism() {
    let generator = WaveGenerator::new(8000, Channels::Stereo, 0.5);
    let signal = |_c: usize, _s: usize, hz: f32, t: f32| (440.0 * hz).sin() * (1.0 - t);

    let hash1 = compute_pcm_hash(&generator.gen_float(signal).unwrap()).unwrap();
    let hash2 = compute_pcm_hash(&generator.gen_float(signal).unwrap()).unwrap();

    assert_eq!(hash1, hash2);
    assert_eq!(hash1.len(), 64);
}
