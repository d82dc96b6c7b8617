//! CLI binary entry point for dmn-cli

mod commands;
mod error;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use commands::{handle_inspect, handle_roundtrip, handle_validate, load_config};

#[derive(Parser)]
#[command(name = "dmn-cli")]
#[command(about = "Inspect, validate and round-trip DMN documents")]
#[command(version)]
struct Cli {
    /// Directory holding a .dmn-editor.toml configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a JSON summary of a DMN document
    Inspect {
        /// Input file path or '-' for stdin
        #[arg(default_value = "-")]
        input: String,
    },
    /// Read a DMN document into a diagram graph and write it back
    Roundtrip {
        /// Input file path or '-' for stdin
        #[arg(default_value = "-")]
        input: String,
        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a DMN document
    Validate {
        /// Input file path or '-' for stdin
        #[arg(default_value = "-")]
        input: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Inspect { input } => handle_inspect(&input, &config),
        Commands::Roundtrip { input, output } => {
            handle_roundtrip(&input, output.as_deref(), &config)
        }
        Commands::Validate { input } => handle_validate(&input, &config),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
