//! Command-line tool for PLG mesh files
//!
//! Usage:
//!   plg inspect level.json                    # Per-section summary
//!   plg import level.json                     # Import into an in-memory scene
//!   plg sidecar level.json                    # Write level.txt (Y-JSON)
//!   plg reencode in.json out.json --text      # Import, then export again
//!
//! Set `RUST_LOG=plg_scene=debug` for per-object logging.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::constants::TEXT_FLOAT_DECIMALS;
use config::settings::ColorSource;

use commands::ReencodeOptions;

#[derive(Parser)]
#[command(name = "plg")]
#[command(about = "Inspect, import and re-encode PLG mesh files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a PLG file and print every section without building a scene
    Inspect {
        /// PLG JSON file
        file: PathBuf,
    },
    /// Import a PLG file into an in-memory scene and report the result
    Import {
        /// PLG JSON file
        file: PathBuf,
    },
    /// Write the Y-JSON text sidecar next to an existing PLG JSON file
    Sidecar {
        /// PLG JSON file
        file: PathBuf,
        /// Fixed decimals for floats in the text form
        #[arg(long, default_value_t = TEXT_FLOAT_DECIMALS)]
        decimals: u32,
    },
    /// Import a PLG file, then export the imported collection again
    Reencode {
        /// PLG JSON file to read
        input: PathBuf,
        /// Output path (`.json` is appended if missing)
        output: PathBuf,
        /// Also write the Y-JSON text sidecar
        #[arg(long)]
        text: bool,
        /// Color source: none, heuristic, vertex-layer
        #[arg(long, default_value_t = ColorSource::Heuristic)]
        color_source: ColorSource,
        /// Fixed decimals for floats in the text form
        #[arg(long, default_value_t = TEXT_FLOAT_DECIMALS)]
        decimals: u32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plg_scene=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Inspect { file } => commands::inspect(&file, &mut out),
        Commands::Import { file } => commands::import_file(&file, &mut out),
        Commands::Sidecar { file, decimals } => commands::sidecar(&file, decimals, &mut out),
        Commands::Reencode {
            input,
            output,
            text,
            color_source,
            decimals,
        } => commands::reencode(
            &input,
            &output,
            ReencodeOptions {
                emit_text: text,
                color_source,
                text_decimals: decimals,
            },
            &mut out,
        ),
    }
}
