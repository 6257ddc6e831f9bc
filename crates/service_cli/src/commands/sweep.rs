//! Sweep command implementation
//!
//! Prices the configured contract across a range of lattice sizes. Each
//! size is an independent valuation timed on its own.

use pricer_lattice::BinomialEngine;
use serde::Serialize;
use tracing::info;

use super::{ContractArgs, OutputFormat};
use crate::config::LatticeConfig;
use crate::timing::{as_millis, Stopwatch};
use crate::{CliError, Result};

/// One lattice size of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepRow {
    /// Lattice steps
    pub steps: usize,
    /// Root value
    pub price: f64,
    /// Wall time of the valuation in milliseconds
    pub elapsed_ms: f64,
}

/// Lattice sizes `from, from + step, ..` up to and including `to`.
pub fn lattice_sizes(from: usize, to: usize, step: usize) -> Result<Vec<usize>> {
    if step == 0 {
        return Err(CliError::invalid_argument("--step must be greater than 0"));
    }
    if from > to {
        return Err(CliError::invalid_argument(format!(
            "--from ({}) must not exceed --to ({})",
            from, to
        )));
    }
    Ok((from..=to).step_by(step).collect())
}

/// Prices every size, stopping at the first failure.
pub fn sweep(
    config: &LatticeConfig,
    args: &ContractArgs,
    sizes: &[usize],
) -> Result<Vec<SweepRow>> {
    let policy = args.policy(config)?;
    let engine = BinomialEngine::new(args.strategy(config));

    sizes
        .iter()
        .map(|&steps| -> Result<SweepRow> {
            let params = args.parameters(config, Some(steps));
            let stopwatch = Stopwatch::start("sweep");
            let price = engine.price(&params, &policy)?;
            let elapsed = stopwatch.elapsed();
            info!(steps, price, elapsed_ms = as_millis(elapsed), "Priced lattice");
            Ok(SweepRow {
                steps,
                price,
                elapsed_ms: as_millis(elapsed),
            })
        })
        .collect()
}

/// Run the sweep command
pub fn run(
    config: &LatticeConfig,
    args: &ContractArgs,
    from: usize,
    to: usize,
    step: usize,
) -> Result<()> {
    let sizes = lattice_sizes(from, to, step)?;
    info!("Starting sweep over {} lattice sizes...", sizes.len());
    info!("  Strategy: {}", args.strategy(config));

    let rows = sweep(config, args, &sizes)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Table => {
            println!("\n┌────────────┬──────────────────────┬──────────────┐");
            println!("│ Steps      │ Price                │ Elapsed (ms) │");
            println!("├────────────┼──────────────────────┼──────────────┤");
            for row in &rows {
                println!(
                    "│ {:<10} │ {:<20.10} │ {:<12.3} │",
                    row.steps, row.price, row.elapsed_ms
                );
            }
            println!("└────────────┴──────────────────────┴──────────────┘");
        }
    }

    info!("Sweep complete");
    Ok(())
}
