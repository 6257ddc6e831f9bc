//! Lattice CLI - Command Line Driver for Binomial Option Pricing
//!
//! This is the operational entry point for the binomial lattice engine.
//!
//! # Commands
//!
//! - `lattice price --style american --kind put` - Price the configured contract once
//! - `lattice sweep --from 10 --to 1000 --step 10` - Price across lattice sizes
//! - `lattice check` - Validate and print the effective configuration
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate loads configuration,
//! initialises logging, and drives `pricer_lattice`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod timing;

use commands::ContractArgs;
use config::LatticeConfig;
pub use error::{CliError, Result};

/// Binomial Lattice Option Pricer CLI
#[derive(Parser)]
#[command(name = "lattice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "lattice.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price the configured contract once
    Price {
        #[command(flatten)]
        contract: ContractArgs,

        /// Number of lattice steps; defaults to the configured steps
        #[arg(short = 'n', long)]
        steps: Option<usize>,
    },

    /// Price the configured contract across lattice sizes
    Sweep {
        #[command(flatten)]
        contract: ContractArgs,

        /// Smallest lattice size
        #[arg(long, default_value = "10")]
        from: usize,

        /// Largest lattice size
        #[arg(long, default_value = "1000")]
        to: usize,

        /// Increment between lattice sizes
        #[arg(long, default_value = "10")]
        step: usize,
    },

    /// Check configuration and print calibrated constants
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = LatticeConfig::load_with_env_and_validate(&cli.config)?;

    // Initialise tracing; RUST_LOG wins over the configured level
    let default_level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    info!("Configuration: {}", cli.config.display());

    match cli.command {
        Commands::Price { contract, steps } => commands::price::run(&config, &contract, steps),
        Commands::Sweep {
            contract,
            from,
            to,
            step,
        } => commands::sweep::run(&config, &contract, from, to, step),
        Commands::Check => commands::check::run(&config),
    }
}
