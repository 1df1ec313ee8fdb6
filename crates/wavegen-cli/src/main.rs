//! wavegen CLI - render and inspect WAV files
//!
//! `generate` renders the built-in tone to a file; `inspect` prints the
//! header of an existing file.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use wavegen_cli::commands;
use wavegen_cli::config::RenderOverrides;
use wavegen_core::wav::{Channels, SampleFormat};

/// wavegen - WAV sample generator
#[derive(Parser)]
#[command(name = "wavegen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the built-in tone to a WAV file
    Generate {
        /// Path to a JSON render config
        #[arg(short, long)]
        config: Option<String>,

        /// Output file path
        #[arg(short, long, default_value = commands::generate::DEFAULT_OUTPUT)]
        output: String,

        /// Sample rate in Hz
        #[arg(long)]
        sample_rate: Option<u32>,

        /// Channel layout (mono, stereo)
        #[arg(long)]
        channels: Option<Channels>,

        /// Duration in seconds
        #[arg(long)]
        seconds: Option<f32>,

        /// Sample format (u8, i16, i32, f16, f32, f64)
        #[arg(short, long)]
        format: Option<SampleFormat>,

        /// Tone frequency in Hz
        #[arg(long)]
        frequency: Option<f64>,

        /// Tone drop-off rate
        #[arg(long)]
        decay: Option<f64>,

        /// Open the rendered file with the default application
        #[arg(long)]
        play: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the header of a WAV file
    Inspect {
        /// Path to the WAV file
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            config,
            output,
            sample_rate,
            channels,
            seconds,
            format,
            frequency,
            decay,
            play,
            json,
        } => {
            let overrides = RenderOverrides {
                sample_rate,
                channels,
                seconds,
                format,
                frequency,
                decay,
            };
            commands::generate::run(config.as_deref(), &overrides, &output, play, json)
        }
        Commands::Inspect { input, json } => commands::inspect::run(&input, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
