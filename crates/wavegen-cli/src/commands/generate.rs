//! Generate command implementation
//!
//! Renders the built-in tone to a WAV file and optionally opens it with the
//! system default player.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use wavegen_core::wav::{compute_pcm_hash, WaveGenerator};

use super::json_output::{error_codes, header_duration, GenerateOutput, GenerateResult, JsonError};
use crate::config::{RenderConfig, RenderOverrides};
use crate::tone::DoubleTone;

/// Default output path.
pub const DEFAULT_OUTPUT: &str = "sample.wav";

/// Run the generate command
///
/// # Arguments
/// * `config_path` - Optional JSON render config
/// * `overrides` - Values given on the command line
/// * `out_path` - Output WAV path
/// * `play` - Open the file with the default application afterwards
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(
    config_path: Option<&str>,
    overrides: &RenderOverrides,
    out_path: &str,
    play: bool,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        run_json(config_path, overrides, out_path, play)
    } else {
        run_human(config_path, overrides, out_path, play)
    }
}

/// Run generate with human-readable (colored) output
fn run_human(
    config_path: Option<&str>,
    overrides: &RenderOverrides,
    out_path: &str,
    play: bool,
) -> Result<ExitCode> {
    let config = RenderConfig::resolve(config_path.map(Path::new), overrides)?;

    println!(
        "{} {} Hz, {}, {} s, {}",
        "Rendering:".cyan().bold(),
        config.sample_rate,
        config.channels,
        config.seconds,
        config.format
    );

    let result = render(&config, out_path)?;

    println!("{} {}", "Wrote:".green().bold(), result.path);
    println!("  {} {}", "Bytes:".dimmed(), result.bytes_written);
    println!(
        "  {} {} ({} bytes)",
        "Samples:".dimmed(),
        result.header.sample_count(),
        result.header.samples_byte_count()
    );
    println!("  {} {:.3} s", "Duration:".dimmed(), result.duration_seconds);
    println!("  {} {}", "PCM hash:".dimmed(), &result.pcm_hash[..16]);

    if play {
        open::that(out_path).with_context(|| format!("Failed to open {}", out_path))?;
        println!("{} {}", "Playing:".cyan().bold(), out_path);
    }

    Ok(ExitCode::SUCCESS)
}

/// Run generate with machine-readable JSON output
fn run_json(
    config_path: Option<&str>,
    overrides: &RenderOverrides,
    out_path: &str,
    play: bool,
) -> Result<ExitCode> {
    let config = match RenderConfig::resolve(config_path.map(Path::new), overrides) {
        Ok(config) => config,
        Err(e) => {
            let output =
                GenerateOutput::failure(vec![JsonError::from_anyhow(error_codes::CONFIG, &e)]);
            return print_output(&output, ExitCode::from(1));
        }
    };

    let result = match render(&config, out_path) {
        Ok(result) => result,
        Err(e) => {
            let output =
                GenerateOutput::failure(vec![JsonError::from_anyhow(error_codes::FILE_WRITE, &e)]);
            return print_output(&output, ExitCode::from(1));
        }
    };

    if play {
        if let Err(e) = open::that(out_path) {
            let error = JsonError::new(
                error_codes::OPEN,
                format!("Failed to open {}: {}", out_path, e),
            );
            return print_output(&GenerateOutput::failure(vec![error]), ExitCode::from(1));
        }
    }

    print_output(&GenerateOutput::success(result), ExitCode::SUCCESS)
}

/// Renders `config` to `out_path`.
///
/// Invalid settings (including 16-bit float) are rejected before the
/// output file is created.
pub fn render(config: &RenderConfig, out_path: &str) -> Result<GenerateResult> {
    let generator = WaveGenerator::new(config.sample_rate, config.channels, config.seconds);
    let header = generator.header_for_format(config.format)?;

    let tone = DoubleTone::from(&config.tone);
    let wav = generator.gen_unit(config.format, |_channel, _sample, hz, seconds| {
        tone.sample(hz, seconds)
    })?;

    fs::write(out_path, &wav).with_context(|| format!("Failed to write {}", out_path))?;

    Ok(GenerateResult {
        path: out_path.to_string(),
        sample_format: config.format.to_string(),
        bytes_written: wav.len(),
        duration_seconds: header_duration(&header),
        pcm_hash: compute_pcm_hash(&wav).context("Rendered file has no data chunk")?,
        header,
    })
}

fn print_output(output: &GenerateOutput, code: ExitCode) -> Result<ExitCode> {
    let json = serde_json::to_string_pretty(output).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(code)
}
