//! Price command implementation
//!
//! Prices the configured contract once with the lattice engine, timing the
//! call.

use pricer_lattice::{BinomialEngine, LatticeValuation};
use serde::Serialize;
use tracing::info;

use super::{ContractArgs, OutputFormat, Style};
use crate::config::LatticeConfig;
use crate::timing::{as_millis, Stopwatch};
use crate::Result;

/// Single valuation report.
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    /// Exercise style
    pub style: Style,
    /// Option kind
    pub kind: String,
    /// Induction strategy
    pub strategy: String,
    /// Lattice steps
    pub steps: usize,
    /// Root value
    pub price: f64,
    /// Risk-neutral up probability (absent for a zero-step lattice)
    pub probability: Option<f64>,
    /// One-step discount factor (absent for a zero-step lattice)
    pub discount: Option<f64>,
    /// Wall time of the valuation in milliseconds
    pub elapsed_ms: f64,
}

impl PriceReport {
    fn new(style: Style, kind: String, valuation: &LatticeValuation<f64>, elapsed_ms: f64) -> Self {
        Self {
            style,
            kind,
            strategy: valuation.strategy.to_string(),
            steps: valuation.steps,
            price: valuation.price,
            probability: valuation.calibration.map(|c| c.probability()),
            discount: valuation.calibration.map(|c| c.discount()),
            elapsed_ms,
        }
    }
}

/// Run the price command
pub fn run(config: &LatticeConfig, args: &ContractArgs, steps: Option<usize>) -> Result<()> {
    let kind = args.kind(config);
    let params = args.parameters(config, steps);
    let policy = args.policy(config)?;
    let engine = BinomialEngine::new(args.strategy(config));

    info!("Starting pricing...");
    info!("  Style: {:?}", args.style);
    info!("  Kind: {}", kind);
    info!("  Steps: {}", params.steps());
    info!("  Strategy: {}", engine.strategy());

    let stopwatch = Stopwatch::start("price");
    let valuation = engine.price_with_diagnostics(&params, &policy)?;
    let elapsed = stopwatch.stop();

    let report = PriceReport::new(args.style, kind.to_string(), &valuation, as_millis(elapsed));
    info!(price = report.price, "Pricing complete");

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print_table(&report),
    }
    Ok(())
}

fn print_table(report: &PriceReport) {
    let optional =
        |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| format!("{:.10}", v));

    println!("\n┌──────────────┬──────────────────────┐");
    println!("│ Field        │ Value                │");
    println!("├──────────────┼──────────────────────┤");
    println!("│ {:<12} │ {:<20} │", "Style", format!("{:?}", report.style).to_lowercase());
    println!("│ {:<12} │ {:<20} │", "Kind", report.kind);
    println!("│ {:<12} │ {:<20} │", "Strategy", report.strategy);
    println!("│ {:<12} │ {:<20} │", "Steps", report.steps);
    println!("│ {:<12} │ {:<20.10} │", "Price", report.price);
    println!("│ {:<12} │ {:<20} │", "q", optional(report.probability));
    println!("│ {:<12} │ {:<20} │", "disc", optional(report.discount));
    println!("│ {:<12} │ {:<20.3} │", "Elapsed (ms)", report.elapsed_ms);
    println!("└──────────────┴──────────────────────┘");
}
