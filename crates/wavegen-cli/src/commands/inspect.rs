//! Inspect command implementation
//!
//! Reads the canonical header of a WAV file and prints its fields together
//! with a hash of the sample data.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::process::ExitCode;

use wavegen_core::wav::{compute_pcm_hash, WaveHeader};

use super::json_output::{error_codes, header_duration, InspectOutput, InspectResult, JsonError};

/// Run the inspect command
///
/// # Arguments
/// * `input` - Path to the WAV file
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(input: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        let output = match inspect(input) {
            Ok(result) => InspectOutput::success(result),
            Err(e) => {
                InspectOutput::failure(vec![JsonError::from_anyhow(error_codes::FILE_READ, &e)])
            }
        };
        let code = if output.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        };
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize output")?;
        println!("{}", json);
        return Ok(code);
    }

    let result = inspect(input)?;
    let header = &result.header;

    println!("{} {}", "Inspect:".cyan().bold(), result.path);
    println!("  {} {}", "Format:".dimmed(), header.format());
    println!("  {} {}", "Channels:".dimmed(), header.channels());
    println!("  {} {} Hz", "Sample rate:".dimmed(), header.sample_rate());
    println!("  {} {}", "Bits/sample:".dimmed(), header.bits_per_sample());
    println!("  {} {}", "Bytes/block:".dimmed(), header.bytes_per_block());
    println!("  {} {}", "Bytes/second:".dimmed(), header.bytes_per_second());
    println!("  {} {}", "Data bytes:".dimmed(), header.samples_byte_count());
    println!("  {} {:.3} s", "Duration:".dimmed(), result.duration_seconds);

    match &result.pcm_hash {
        Some(hash) => println!("  {} {}", "PCM hash:".dimmed(), &hash[..16]),
        None => println!(
            "  {} data chunk is truncated; file is shorter than its header claims",
            "!!".yellow()
        ),
    }

    if result.file_size != header.file_len() {
        println!(
            "  {} file is {} bytes, header describes {}",
            "!!".yellow(),
            result.file_size,
            header.file_len()
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Reads and parses `input`.
pub fn inspect(input: &str) -> Result<InspectResult> {
    let bytes = fs::read(input).with_context(|| format!("Failed to read file: {}", input))?;
    let header =
        WaveHeader::parse(&bytes).with_context(|| format!("Not a canonical WAV file: {}", input))?;

    Ok(InspectResult {
        path: input.to_string(),
        file_size: bytes.len(),
        duration_seconds: header_duration(&header),
        pcm_hash: compute_pcm_hash(&bytes),
        header,
    })
}
