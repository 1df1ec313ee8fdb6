//! WAV encoding.
//!
//! Header builder, sample writers and the [`WaveGenerator`] entry point.
//! Output is always the canonical 44-byte header followed by interleaved
//! little-endian sample data.

mod format;
mod generate;
mod header;
mod pcm;
mod sample;
mod writer;

#[cfg(test)]
mod tests;

// Re-export public API
pub use format::{AudioFormat, Channels};
pub use generate::{Rendered, WaveGenerator};
pub use header::{build_header, WaveHeader, FMT_CHUNK_SIZE, HEADER_SIZE};
pub use pcm::{compute_pcm_hash, extract_pcm_data};
pub use sample::{FloatSample, IntSample, Sample, SampleFormat};
pub use writer::{write_float_samples, write_int_samples};
