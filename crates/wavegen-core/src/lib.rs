//! wavegen core
//!
//! Generates audio sample data from a caller-supplied signal function and
//! encodes it, behind a canonical 44-byte RIFF/WAVE header, into a byte
//! buffer or stream.
//!
//! # Overview
//!
//! The caller picks a sample type, a sample rate, a channel layout and a
//! duration. The header is built first, so the exact output length is known
//! before any buffer is acquired. Samples are then produced one at a time,
//! in channel-interleaved order, and appended straight after the header.
//!
//! Supported sample types:
//!
//! - **PCM** - `u8`, `i16`, `i32`
//! - **Float** - `f32`, `f64`
//!
//! 16-bit floating point is rejected: it has too little dynamic range for
//! audio and most players do not recognize it in a WAV container.
//!
//! # Determinism
//!
//! Generation is a single straight-line pass. Given the same parameters and
//! a pure signal function the output is byte-identical across runs, and
//! [`wav::compute_pcm_hash`] can be used to compare renders.
//!
//! # Example
//!
//! ```
//! use wavegen_core::wav::{Channels, WaveGenerator};
//!
//! let generator = WaveGenerator::new(8000, Channels::Mono, 1.0);
//! let wav = generator
//!     .gen_float::<f32, _>(|_channel, _sample, hz, _seconds| (440.0 * hz).sin())
//!     .unwrap();
//!
//! assert_eq!(wav.len(), 44 + 8000 * 4);
//! ```
//!
//! # Crate Structure
//!
//! - [`wav::build_header`] - Header builder
//! - [`wav::write_float_samples`] / [`wav::write_int_samples`] - Sample writers
//! - [`wav::WaveGenerator`] - Top-level generation entry point
//! - [`error`] - Error types

pub mod error;
pub mod wav;

pub use error::{WavError, WavResult};
