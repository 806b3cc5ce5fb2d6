//! Reveal CLI
//!
//! Command-line companion for the reveal engine:
//! - `reveal replay`: run a recorded pointer trace and print each frame
//! - `reveal config`: print the default configuration as TOML

mod config;
mod replay;
mod trace;

use anyhow::Result;
use clap::{Parser, Subcommand};
use reveal_core::EmitterStrategy;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::replay::OutputFormat;
use crate::trace::PointerTrace;

/// Cursor-driven reveal engine tools
#[derive(Parser, Debug)]
#[command(name = "reveal")]
#[command(about = "Replay pointer traces through the reveal engine")]
#[command(version)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a recorded pointer trace
    Replay {
        /// Trace file (JSON)
        trace: PathBuf,

        /// Configuration file or directory containing reveal.toml
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the emitter strategy (path, attributes, mask)
        #[arg(short, long)]
        strategy: Option<EmitterStrategy>,

        /// Frames per second used to sample the trace
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the configuration as TOML
    Config {
        /// Configuration file or directory to load instead of the defaults
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the emitter strategy (path, attributes, mask)
        #[arg(short, long)]
        strategy: Option<EmitterStrategy>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Commands::Replay {
            trace,
            config: config_path,
            strategy,
            fps,
            format,
        } => {
            let config = config::resolve(config_path.as_deref(), strategy)?;
            let trace = PointerTrace::load(&trace)?;
            let reports = replay::replay(&trace, config, fps)?;
            print!("{}", replay::render(&reports, format)?);
        }
        Commands::Config {
            config: config_path,
            strategy,
        } => {
            let config = config::resolve(config_path.as_deref(), strategy)?;
            print!("{}", config::to_toml(&config)?);
        }
    }

    Ok(())
}
