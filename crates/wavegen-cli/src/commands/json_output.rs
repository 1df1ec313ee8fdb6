//! JSON output types for machine-readable CLI output.
//!
//! Used by the `--json` flag on `generate` and `inspect`.

use serde::{Deserialize, Serialize};
use wavegen_core::wav::WaveHeader;
use wavegen_core::WavError;

/// Error codes for CLI operations.
///
/// Library errors keep their own `WAV_XXX` codes.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// File could not be written
    pub const FILE_WRITE: &str = "CLI_002";
    /// Render config could not be loaded
    pub const CONFIG: &str = "CLI_003";
    /// Output could not be opened for playback
    pub const OPEN: &str = "CLI_004";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "WAV_005")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl JsonError {
    /// Creates an error with an explicit code.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Wraps an error, keeping the library code when there is one.
    pub fn from_anyhow(fallback_code: &str, err: &anyhow::Error) -> Self {
        let code = err
            .downcast_ref::<WavError>()
            .map(WavError::code)
            .unwrap_or(fallback_code);
        Self::new(code, format!("{:#}", err))
    }
}

/// Output of `generate --json`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOutput {
    /// Whether the render succeeded
    pub success: bool,
    /// Render details (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GenerateResult>,
    /// Errors (present on failure)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
}

/// A completed render.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResult {
    /// Path the file was written to
    pub path: String,
    /// Sample representation, e.g. "f32"
    pub sample_format: String,
    /// Bytes written, header included
    pub bytes_written: usize,
    /// Duration of the render in seconds
    pub duration_seconds: f64,
    /// BLAKE3 hash of the sample data
    pub pcm_hash: String,
    /// Header that was written
    pub header: WaveHeader,
}

/// Output of `inspect --json`.
#[derive(Debug, Clone, Serialize)]
pub struct InspectOutput {
    /// Whether the file could be read and parsed
    pub success: bool,
    /// Inspection details (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<InspectResult>,
    /// Errors (present on failure)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
}

/// Header and hash of an existing file.
#[derive(Debug, Clone, Serialize)]
pub struct InspectResult {
    /// Path that was read
    pub path: String,
    /// Size of the file on disk
    pub file_size: usize,
    /// Duration described by the header
    pub duration_seconds: f64,
    /// BLAKE3 hash of the sample data, `None` if the data chunk is truncated
    pub pcm_hash: Option<String>,
    /// Parsed header
    pub header: WaveHeader,
}

impl GenerateOutput {
    /// Successful output wrapping `result`.
    pub fn success(result: GenerateResult) -> Self {
        Self {
            success: true,
            result: Some(result),
            errors: Vec::new(),
        }
    }

    /// Failed output carrying `errors`.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            result: None,
            errors,
        }
    }
}

impl InspectOutput {
    /// Successful output wrapping `result`.
    pub fn success(result: InspectResult) -> Self {
        Self {
            success: true,
            result: Some(result),
            errors: Vec::new(),
        }
    }

    /// Failed output carrying `errors`.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            result: None,
            errors,
        }
    }
}

/// Duration in seconds described by `header`.
pub fn header_duration(header: &WaveHeader) -> f64 {
    let blocks = header.sample_count() / usize::from(header.channels().count());
    blocks as f64 / f64::from(header.sample_rate())
}
