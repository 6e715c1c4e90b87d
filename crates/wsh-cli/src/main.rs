//! # wsh CLI entry point
//!
//! Parses arguments, resolves the engine configuration (defaults, then
//! `--config`, then `WSH_*` environment), and dispatches to the handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wsh_cli::hash::{run_hash, HashArgs};
use wsh_cli::layout::{run_layout, LayoutArgs};
use wsh_engine::EngineConfig;

/// Arena-hosted SHA-256 toolchain.
///
/// Hashes input through a digest engine that shares a growable linear
/// memory with the host, and inspects the padded message layout.
#[derive(Parser, Debug)]
#[command(name = "wsh", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML engine configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Hash text, a file, or stdin and print the hex digest.
    Hash(HashArgs),

    /// Show the padded SHA-256 blocks written into the arena.
    Layout(LayoutArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over the -v count when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match EngineConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(1);
        }
    };
    tracing::debug!(engine = %config.engine, "resolved engine configuration");

    let result = match cli.command {
        Commands::Hash(args) => run_hash(&args, &config),
        Commands::Layout(args) => run_layout(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
