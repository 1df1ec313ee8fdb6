//! Error types for WAV generation.

use thiserror::Error;

use crate::wav::SampleFormat;

/// Result type for WAV operations.
pub type WavResult<T> = Result<T, WavError>;

/// Errors that can occur while building headers or generating sample data.
///
/// Every configuration error is raised before the first byte reaches the
/// sink, so a failed call never leaves a partially written buffer behind.
#[derive(Debug, Error)]
pub enum WavError {
    /// Sample rate of zero.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Sample width that cannot be described by the header.
    #[error("invalid sample width: {bytes} bytes per sample")]
    InvalidSampleWidth {
        /// The invalid width in bytes.
        bytes: u32,
    },

    /// Channel count of zero passed to a sample writer.
    #[error("invalid channel count: {count}")]
    InvalidChannelCount {
        /// The invalid channel count.
        count: u16,
    },

    /// Negative, NaN or infinite duration.
    #[error("invalid duration: {seconds} seconds")]
    InvalidDuration {
        /// The invalid duration.
        seconds: f32,
    },

    /// Sample representation the container cannot carry.
    #[error("unsupported sample format: {format} ({reason})")]
    UnsupportedSampleFormat {
        /// The rejected format.
        format: SampleFormat,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Sample data larger than the 32-bit RIFF size fields allow.
    #[error("sample data too large for a WAV file: {bytes} bytes")]
    DataTooLarge {
        /// Required number of sample bytes.
        bytes: u64,
    },

    /// Buffer handed out by a provider is shorter than the encoded file.
    #[error("buffer too small: {required} bytes required, {actual} provided")]
    BufferTooSmall {
        /// Exact number of bytes the output needs.
        required: usize,
        /// Length of the buffer that was provided.
        actual: usize,
    },

    /// Bytes that do not form a canonical WAV header.
    #[error("invalid WAV header: {message}")]
    InvalidHeader {
        /// Error message.
        message: String,
    },

    /// I/O error from the sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WavError {
    /// Creates an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Stable error code for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            WavError::InvalidSampleRate { .. } => "WAV_001",
            WavError::InvalidSampleWidth { .. } => "WAV_002",
            WavError::InvalidChannelCount { .. } => "WAV_003",
            WavError::InvalidDuration { .. } => "WAV_004",
            WavError::UnsupportedSampleFormat { .. } => "WAV_005",
            WavError::DataTooLarge { .. } => "WAV_006",
            WavError::BufferTooSmall { .. } => "WAV_007",
            WavError::InvalidHeader { .. } => "WAV_008",
            WavError::Io(_) => "WAV_009",
        }
    }

    /// Error category.
    pub fn category(&self) -> &'static str {
        "wav"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_header_helper() {
        let err = WavError::invalid_header("missing RIFF marker");
        assert!(err.to_string().contains("missing RIFF marker"));
        assert_eq!(err.code(), "WAV_008");
    }

    #[test]
    fn test_unsupported_format_message() {
        let err = WavError::UnsupportedSampleFormat {
            format: SampleFormat::Float16,
            reason: "too little dynamic range",
        };
        assert!(err.to_string().contains("f16"));
        assert!(err.to_string().contains("dynamic range"));
        assert_eq!(err.category(), "wav");
    }

    #[test]
    fn test_buffer_too_small_message() {
        let err = WavError::BufferTooSmall {
            required: 16044,
            actual: 100,
        };
        assert_eq!(
            err.to_string(),
            "buffer too small: 16044 bytes required, 100 provided"
        );
    }
}
